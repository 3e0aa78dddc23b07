//! Pre-navigation guards.
//!
//! Guards are checked **before** a navigation is committed. They see the
//! current [`SessionAuth`] and the pending [`NavigationRequest`] and decide
//! whether navigation continues, is denied, or is redirected elsewhere.
//!
//! All guard methods are **synchronous**: a guard must answer before the
//! navigation pipeline moves on.
//!
//! # Execution order
//!
//! Guards run in **priority order** (higher value first). The first
//! non-[`Continue`](crate::NavigationAction::Continue) result
//! short-circuits evaluation. [`SessionGuard`] uses priority 100.
//!
//! # Example
//!
//! ```
//! use folio_navigator::{guard_fn, Guards, NavigationAction, NavigationRequest};
//! use folio_navigator::{Location, RouteGuard, SessionAuth, SessionGuard};
//!
//! let guards = Guards::builder()
//!     .guard(SessionGuard::default())
//!     .guard(guard_fn(|_session, request| {
//!         if request.to_path() == "/import" {
//!             NavigationAction::deny("Import is disabled")
//!         } else {
//!             NavigationAction::Continue
//!         }
//!     }))
//!     .build();
//!
//! let request = NavigationRequest::new(Location::from_path("/nfts"));
//! let action = guards.check(&SessionAuth::logged_out(), &request);
//! assert_eq!(action.redirect_path(), Some("/user/login"));
//! ```

use crate::navigation::{NavigationAction, NavigationRequest};
use crate::session::SessionAuth;
use crate::trace_log;

// ============================================================================
// RouteGuard trait
// ============================================================================

/// Trait for guards that control access to routes.
///
/// ```
/// use folio_navigator::{NavigationAction, NavigationRequest, RouteGuard, SessionAuth};
///
/// struct ReadOnlyGuard;
///
/// impl RouteGuard for ReadOnlyGuard {
///     fn check(&self, _session: &SessionAuth, request: &NavigationRequest) -> NavigationAction {
///         if request.to_path().starts_with("/settings") {
///             NavigationAction::redirect("/dashboard")
///         } else {
///             NavigationAction::Continue
///         }
///     }
/// }
/// ```
pub trait RouteGuard: Send + Sync + 'static {
    /// Decide what happens to `request`.
    ///
    /// Returns:
    /// - [`NavigationAction::Continue`] to allow navigation
    /// - [`NavigationAction::Deny`] to block navigation
    /// - [`NavigationAction::Redirect`] to navigate somewhere else instead
    fn check(&self, session: &SessionAuth, request: &NavigationRequest) -> NavigationAction;

    /// Guard name for logs.
    fn name(&self) -> &'static str {
        "RouteGuard"
    }

    /// Priority for execution order. Higher runs first. Default is 0.
    fn priority(&self) -> i32 {
        0
    }
}

// ============================================================================
// guard_fn helper
// ============================================================================

/// Create a guard from a closure.
pub const fn guard_fn<F>(f: F) -> FnGuard<F>
where
    F: Fn(&SessionAuth, &NavigationRequest) -> NavigationAction + Send + Sync + 'static,
{
    FnGuard { f }
}

/// Guard created from a closure.
pub struct FnGuard<F> {
    f: F,
}

impl<F> RouteGuard for FnGuard<F>
where
    F: Fn(&SessionAuth, &NavigationRequest) -> NavigationAction + Send + Sync + 'static,
{
    fn check(&self, session: &SessionAuth, request: &NavigationRequest) -> NavigationAction {
        (self.f)(session, request)
    }
}

// ============================================================================
// SessionGuard
// ============================================================================

/// Keeps logged-out users inside the user section and logged-in users out
/// of the login screens.
///
/// | logged | target                             | verdict             |
/// |--------|------------------------------------|---------------------|
/// | yes    | `/user`, `/user/login`, `/user/create` | redirect to `/dashboard` |
/// | yes    | anything else                      | continue            |
/// | no     | starts with `/user`                | continue            |
/// | no     | anything else                      | redirect to `/user/login` |
///
/// The prefix test is a plain string prefix, so `/username` also counts as
/// part of the user section.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    unauthenticated_only: Vec<String>,
    user_prefix: String,
    login: String,
    home: String,
}

impl SessionGuard {
    /// Guard with explicit paths.
    pub fn new(
        user_prefix: impl Into<String>,
        login: impl Into<String>,
        home: impl Into<String>,
    ) -> Self {
        Self {
            unauthenticated_only: Vec::new(),
            user_prefix: user_prefix.into(),
            login: login.into(),
            home: home.into(),
        }
    }

    /// Add a path that logged-in users are sent away from.
    pub fn unauthenticated_only(mut self, path: impl Into<String>) -> Self {
        self.unauthenticated_only.push(path.into());
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login
    }

    pub fn home_path(&self) -> &str {
        &self.home
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        use crate::app::Routes;

        Self::new(Routes::USER, Routes::USER_LOGIN, Routes::DASHBOARD)
            .unauthenticated_only(Routes::USER)
            .unauthenticated_only(Routes::USER_CREATE)
            .unauthenticated_only(Routes::USER_LOGIN)
    }
}

impl RouteGuard for SessionGuard {
    fn check(&self, session: &SessionAuth, request: &NavigationRequest) -> NavigationAction {
        let to = request.to_path();

        let action = if session.is_logged() {
            if self.unauthenticated_only.iter().any(|p| p == to) {
                NavigationAction::redirect_with_reason(&self.home, "Already logged in")
            } else {
                NavigationAction::Continue
            }
        } else if to.starts_with(&self.user_prefix) {
            NavigationAction::Continue
        } else {
            NavigationAction::redirect_with_reason(&self.login, "Login required")
        };

        trace_log!(
            "SessionGuard: logged={} to='{}' -> {:?}",
            session.is_logged(),
            to,
            action
        );
        action
    }

    fn name(&self) -> &'static str {
        "SessionGuard"
    }

    fn priority(&self) -> i32 {
        100
    }
}

// ============================================================================
// Guard Composition
// ============================================================================

/// Combines guards with AND logic.
///
/// Guards are executed in priority order (higher priority first, ties in
/// insertion order). The first non-continue result is returned immediately.
#[derive(Default)]
pub struct Guards {
    guards: Vec<Box<dyn RouteGuard>>,
}

impl Guards {
    #[must_use]
    pub fn new(guards: Vec<Box<dyn RouteGuard>>) -> Self {
        let mut composed = Self { guards };
        composed.sort();
        composed
    }

    pub fn builder() -> GuardBuilder {
        GuardBuilder::new()
    }

    /// Add a guard, keeping priority order.
    pub fn push<G: RouteGuard>(&mut self, guard: G) {
        self.guards.push(Box::new(guard));
        self.sort();
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Guard names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.guards.iter().map(|g| g.name()).collect()
    }

    fn sort(&mut self) {
        // Stable, so equal priorities keep insertion order.
        self.guards.sort_by_key(|g| std::cmp::Reverse(g.priority()));
    }
}

impl RouteGuard for Guards {
    fn check(&self, session: &SessionAuth, request: &NavigationRequest) -> NavigationAction {
        for guard in &self.guards {
            let result = guard.check(session, request);
            if !result.is_continue() {
                trace_log!("Guard '{}' stopped navigation: {:?}", guard.name(), result);
                return result;
            }
        }
        NavigationAction::Continue
    }

    fn name(&self) -> &'static str {
        "Guards"
    }

    fn priority(&self) -> i32 {
        self.guards.iter().map(|g| g.priority()).max().unwrap_or(0)
    }
}

impl std::fmt::Debug for Guards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guards")
            .field("guards", &self.names())
            .finish()
    }
}

/// Builder for [`Guards`].
#[must_use]
#[derive(Default)]
pub struct GuardBuilder {
    guards: Vec<Box<dyn RouteGuard>>,
}

impl GuardBuilder {
    pub fn new() -> Self {
        Self { guards: Vec::new() }
    }

    pub fn guard<G: RouteGuard>(mut self, guard: G) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    #[must_use]
    pub fn build(self) -> Guards {
        Guards::new(self.guards)
    }
}

// ============================================================================
// Tests
// ============================================================================
