//! Route records.
//!
//! A [`Route`] maps a path pattern to either a lazily loaded [`Page`] or a
//! redirect. Routes nest: tabbed sections are a parent page whose children
//! render inside it, and a parent usually sends bare visits to its first tab
//! through [`default_child`](Route::default_child).
//!
//! ```
//! use folio_navigator::{NoteLocation, Page, Route};
//!
//! let history = Route::page("/history", Page::History)
//!     .default_child("/history/trades")
//!     .children(vec![
//!         Route::page("/history/trades", Page::HistoryTrades)
//!             .name("trades")
//!             .note(NoteLocation::HistoryTrades),
//!         Route::page("deposits-withdrawals", Page::HistoryDepositsWithdrawals),
//!     ]);
//!
//! assert_eq!(history.get_children().len(), 2);
//! ```

use crate::pages::Page;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Metadata
// ============================================================================

/// Where contextual user notes attach for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoteLocation {
    Dashboard,
    AccountsBalancesBlockchain,
    AccountsBalancesExchange,
    AccountsBalancesNonFungible,
    AccountsBalancesManual,
    Nfts,
    HistoryTrades,
    HistoryDepositsWithdrawals,
    HistoryEvents,
    Defi,
    Statistics,
    Staking,
    ProfitLossReports,
    Assets,
    PriceManager,
    AddressBookManager,
    ApiKeys,
    Import,
    SettingsGeneral,
    SettingsAccounting,
    SettingsDataSecurity,
    SettingsModules,
    Locations,
    Calendar,
}

/// Page chrome a route is rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    #[default]
    Default,
    /// Bare layout used by the login and account creation screens.
    Auth,
}

/// Per-route metadata.
///
/// Every field is optional so that a child only overrides what it sets; see
/// [`RouteMeta::inherit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub note_location: Option<NoteLocation>,
    pub can_navigate_back: Option<bool>,
    pub layout: Option<Layout>,
}

impl RouteMeta {
    /// Metadata of `child` with unset fields taken from `self`.
    #[must_use]
    pub fn inherit(&self, child: &RouteMeta) -> RouteMeta {
        RouteMeta {
            note_location: child.note_location.or(self.note_location),
            can_navigate_back: child.can_navigate_back.or(self.can_navigate_back),
            layout: child.layout.or(self.layout),
        }
    }
}

// ============================================================================
// Props
// ============================================================================

/// How a page's props are derived from the resolved route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PropsMode {
    /// The page takes no props.
    #[default]
    None,
    /// Every path parameter becomes a prop of the same name.
    Params,
    /// One prop read from a path parameter, `None` when absent.
    Param { prop: String, param: String },
    /// One prop read from the query string, `None` when absent.
    Query { prop: String, key: String },
}

impl PropsMode {
    pub fn param(prop: impl Into<String>, param: impl Into<String>) -> Self {
        Self::Param {
            prop: prop.into(),
            param: param.into(),
        }
    }

    pub fn query(prop: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Query {
            prop: prop.into(),
            key: key.into(),
        }
    }
}

// ============================================================================
// Route
// ============================================================================

/// What visiting a route produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Page(Page),
    /// Non-navigable route; visiting it redirects.
    Redirect(String),
}

/// Declarative part of a route.
#[derive(Debug, Clone, Default)]
pub struct RouteConfig {
    /// Pattern as declared. Absolute (`/history/trades`) or relative to the
    /// parent (`trades`); empty for index routes.
    pub path: String,
    pub name: Option<String>,
    pub meta: RouteMeta,
    pub props: PropsMode,
}

/// One node of the route tree.
#[derive(Debug, Clone)]
pub struct Route {
    pub config: RouteConfig,
    pub target: RouteTarget,
    pub children: Vec<Arc<Route>>,
    /// Where a visit to this exact route is sent when it has children.
    pub default_child: Option<String>,
}

impl Route {
    /// Route rendering `page`.
    pub fn page(path: impl Into<String>, page: Page) -> Self {
        Self::with_target(path, RouteTarget::Page(page))
    }

    /// Route that only redirects to `to`.
    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self::with_target(path, RouteTarget::Redirect(to.into()))
    }

    fn with_target(path: impl Into<String>, target: RouteTarget) -> Self {
        Self {
            config: RouteConfig {
                path: path.into(),
                ..RouteConfig::default()
            },
            target,
            children: Vec::new(),
            default_child: None,
        }
    }

    /// Name used by [`RouteTable::url_for`](crate::RouteTable::url_for).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    pub fn note(mut self, location: NoteLocation) -> Self {
        self.config.meta.note_location = Some(location);
        self
    }

    /// Show a back button on this page.
    pub fn can_navigate_back(mut self) -> Self {
        self.config.meta.can_navigate_back = Some(true);
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.config.meta.layout = Some(layout);
        self
    }

    pub fn props(mut self, props: PropsMode) -> Self {
        self.config.props = props;
        self
    }

    pub fn children(mut self, children: Vec<Route>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }

    /// Redirect bare visits to `path`, usually the first tab.
    pub fn default_child(mut self, path: impl Into<String>) -> Self {
        self.default_child = Some(path.into());
        self
    }

    pub fn get_children(&self) -> &[Arc<Route>] {
        &self.children
    }

    pub fn page_id(&self) -> Option<Page> {
        match self.target {
            RouteTarget::Page(page) => Some(page),
            RouteTarget::Redirect(_) => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.target, RouteTarget::Redirect(_))
    }
}
