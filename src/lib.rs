//! # folio-navigator
//!
//! Navigation core and filter input for a portfolio tracker front-end.
//!
//! The crate has no renderer. A host UI drives it with explicit calls and
//! reads back plain data: match stacks to render, scroll actions to apply,
//! chips and suggestions to draw, match state to persist.
//!
//! ## Routing
//!
//! - [`Route`] and [`RouteTable`]: a validated tree of paths to lazily built
//!   [`Page`]s, with nested tabs, redirects and per-route metadata.
//! - [`Router`]: history, guards and scroll restoration in one pipeline.
//! - [`SessionGuard`]: keeps logged-out users on the login screens and
//!   logged-in users away from them.
//! - [`PageRegistry`]: factories invoked only when a page is navigated to.
//!
//! ```
//! use folio_navigator::{app_router, RouterOptions, ScrollAction, SessionAuth};
//!
//! let mut router = app_router(&RouterOptions::default()).unwrap();
//! router.set_session(SessionAuth::logged_in());
//!
//! let result = router.push("/history");
//! assert_eq!(result.path(), Some("/history/trades"));
//! assert_eq!(result.scroll(), Some(&ScrollAction::Reset));
//!
//! let current = router.current().unwrap();
//! assert_eq!(current.stack.patterns(), vec!["/history", "/history/trades"]);
//! ```
//!
//! ## Filter input
//!
//! See [`filter`] (feature `filter`, on by default).
//!
//! ## Features
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `log` | yes | diagnostics through the `log` crate |
//! | `tracing` | no | diagnostics through `tracing` instead |
//! | `cache` | yes | LRU caches for resolution and built pages |
//! | `filter` | yes | the [`filter`] module |

pub mod app;
#[cfg(feature = "cache")]
pub mod cache;
pub mod error;
#[cfg(feature = "filter")]
pub mod filter;
pub mod guards;
pub mod location;
pub mod logging;
pub mod navigation;
pub mod pages;
pub mod params;
pub mod path;
pub mod resolve;
pub mod route;
pub mod router;
pub mod scroll;
pub mod session;
pub mod state;
pub mod table;

pub use app::{app_route_table, app_router, app_routes, Routes};
pub use error::{FilterError, NavigationError, NavigationResult, RouteTableError};
pub use guards::{guard_fn, FnGuard, GuardBuilder, Guards, RouteGuard, SessionGuard};
pub use location::Location;
pub use navigation::{NavigationAction, NavigationDirection, NavigationRequest, RouteChangeEvent};
pub use pages::{Page, PageFactory, PageProps, PageRegistry};
pub use params::{QueryParams, RouteParams};
pub use path::{join_paths, normalize_path, param_name};
pub use resolve::{MatchEntry, MatchStack, Resolution, ResolvedRoute};
pub use route::{Layout, NoteLocation, PropsMode, Route, RouteConfig, RouteMeta, RouteTarget};
pub use router::{HistoryMode, Router, RouterOptions, MAX_REDIRECTS};
pub use scroll::{scroll_behavior, ScrollAction, ScrollPosition, ScrollRestorer, Viewport};
pub use session::SessionAuth;
pub use state::{HistoryEntry, RouterState};
pub use table::{RouteSummary, RouteTable};
