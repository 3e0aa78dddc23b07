//! The router: route table, guards, history and scroll in one pipeline.
//!
//! Every navigation goes through the same steps:
//!
//! 1. **Record redirects**: redirect routes, parents with a default child and
//!    redirecting index children send the target elsewhere.
//! 2. **Guards**: run on the final target in priority order. A redirect
//!    starts over from step 1, a deny stops here.
//! 3. **Match**: an unmatched target is reported as not found.
//! 4. **Commit**: history moves and the resolved route becomes current.
//! 5. **Scroll**: the [`ScrollAction`] for the host is computed.
//!
//! Redirects from steps 1 and 2 share a budget of [`MAX_REDIRECTS`] hops.

use crate::error::{NavigationError, NavigationResult};
use crate::guards::{Guards, RouteGuard};
use crate::location::Location;
use crate::navigation::{NavigationAction, NavigationRequest, RouteChangeEvent};
use crate::params::RouteParams;
use crate::resolve::{Resolution, ResolvedRoute};
use crate::scroll::{scroll_behavior, ScrollPosition};
use crate::session::SessionAuth;
use crate::state::RouterState;
use crate::table::RouteTable;
use crate::{debug_log, error_log, info_log, warn_log};

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, ResolveCache};

/// Redirect hops allowed in a single navigation.
pub const MAX_REDIRECTS: usize = 10;

/// Environment variable holding the public path the app is served from.
pub const ENV_PUBLIC_PATH: &str = "FOLIO_PUBLIC_PATH";
/// Environment variable enabling development-only routes.
pub const ENV_DEVELOPMENT: &str = "FOLIO_DEVELOPMENT";

// ============================================================================
// Options
// ============================================================================

/// How locations map to URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryMode {
    /// `{base}#{path}`. Bookmarks depend on this format.
    #[default]
    Hash,
    /// `{base}{path}`.
    History,
}

/// Router configuration.
///
/// ```
/// use folio_navigator::{HistoryMode, RouterOptions};
///
/// let options = RouterOptions::new().base("/app/").development(true);
/// assert_eq!(options.base, "/app/");
/// assert_eq!(options.mode, HistoryMode::Hash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    pub base: String,
    pub mode: HistoryMode,
    /// Adds development-only routes such as the playground.
    pub development: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            mode: HistoryMode::Hash,
            development: false,
        }
    }
}

impl RouterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Options from [`ENV_PUBLIC_PATH`] and [`ENV_DEVELOPMENT`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Options from an arbitrary variable source.
    ///
    /// An empty public path keeps the default base. The development flag
    /// accepts `1`, `true` and `yes`, ignoring case.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        if let Some(base) = lookup(ENV_PUBLIC_PATH).filter(|b| !b.trim().is_empty()) {
            options.base = base.trim().to_string();
        }
        if let Some(flag) = lookup(ENV_DEVELOPMENT) {
            options.development = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }
        options
    }
}

// ============================================================================
// Router
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Push,
    Replace,
    Back,
    Forward,
}

/// Navigation state machine for one application window.
///
/// ```
/// use folio_navigator::{app_router, RouterOptions, SessionAuth};
///
/// let mut router = app_router(&RouterOptions::default()).unwrap();
///
/// let result = router.push("/");
/// assert_eq!(result.path(), Some("/user/login"));
///
/// router.set_session(SessionAuth::logged_in());
/// let result = router.push("/user/login");
/// assert_eq!(result.path(), Some("/dashboard"));
/// ```
#[derive(Debug)]
pub struct Router {
    table: RouteTable,
    options: RouterOptions,
    guards: Guards,
    session: SessionAuth,
    state: RouterState,
    current: Option<ResolvedRoute>,
    last_event: Option<RouteChangeEvent>,
    #[cfg(feature = "cache")]
    cache: ResolveCache,
}

impl Router {
    pub fn new(table: RouteTable, options: RouterOptions) -> Self {
        Self {
            table,
            options,
            guards: Guards::default(),
            session: SessionAuth::default(),
            state: RouterState::new(),
            current: None,
            last_event: None,
            #[cfg(feature = "cache")]
            cache: ResolveCache::new(),
        }
    }

    /// Install a guard (builder style).
    pub fn guard<G: RouteGuard>(mut self, guard: G) -> Self {
        self.add_guard(guard);
        self
    }

    pub fn add_guard<G: RouteGuard>(&mut self, guard: G) {
        self.guards.push(guard);
    }

    pub fn guards(&self) -> &Guards {
        &self.guards
    }

    /// Update the authentication state guards see from now on.
    pub fn set_session(&mut self, session: SessionAuth) {
        debug_log!("Session updated: logged={}", session.is_logged());
        self.session = session;
    }

    pub fn session(&self) -> SessionAuth {
        self.session
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Navigate to `target` (`path[?query][#hash]`), adding a history entry.
    pub fn push(&mut self, target: &str) -> NavigationResult {
        self.navigate(Location::parse(target), Mode::Push)
    }

    /// Navigate to `target`, overwriting the current history entry.
    pub fn replace(&mut self, target: &str) -> NavigationResult {
        self.navigate(Location::parse(target), Mode::Replace)
    }

    /// Go one entry back. Guards run again; a guard redirect turns this
    /// into a push of the redirect target.
    pub fn back(&mut self) -> NavigationResult {
        match self.state.peek_back() {
            Some(entry) => {
                let location = entry.location.clone();
                self.navigate(location, Mode::Back)
            }
            None => NavigationResult::Error(NavigationError::NoHistoryEntry),
        }
    }

    /// Go one entry forward. Same rules as [`back`](Self::back).
    pub fn forward(&mut self) -> NavigationResult {
        match self.state.peek_forward() {
            Some(entry) => {
                let location = entry.location.clone();
                self.navigate(location, Mode::Forward)
            }
            None => NavigationResult::Error(NavigationError::NoHistoryEntry),
        }
    }

    /// Push the route called `name`.
    pub fn push_named(&mut self, name: &str, params: &RouteParams) -> NavigationResult {
        match self.table.url_for(name, params) {
            Ok(path) => self.push(&path),
            Err(err) => {
                warn_log!("Cannot navigate to route '{}': {}", name, err);
                NavigationResult::Error(err)
            }
        }
    }

    pub fn url_for(&self, name: &str, params: &RouteParams) -> Result<String, NavigationError> {
        self.table.url_for(name, params)
    }

    /// URL for `path` in the configured [`HistoryMode`].
    ///
    /// ```
    /// use folio_navigator::{app_router, HistoryMode, RouterOptions};
    ///
    /// let router = app_router(&RouterOptions::default()).unwrap();
    /// assert_eq!(router.href("/nfts"), "/#/nfts");
    ///
    /// let options = RouterOptions::new().base("/app/").mode(HistoryMode::History);
    /// let router = app_router(&options).unwrap();
    /// assert_eq!(router.href("/nfts"), "/app/nfts");
    /// ```
    pub fn href(&self, path: &str) -> String {
        let location = Location::parse(path).to_string();
        match self.options.mode {
            HistoryMode::Hash => format!("{}#{}", self.options.base, location),
            HistoryMode::History => {
                format!("{}{}", self.options.base.trim_end_matches('/'), location)
            }
        }
    }

    /// Push the location encoded in a URL produced by [`href`](Self::href).
    pub fn push_href(&mut self, href: &str) -> NavigationResult {
        let target = self.location_from_href(href);
        self.push(&target)
    }

    fn location_from_href(&self, href: &str) -> String {
        match self.options.mode {
            HistoryMode::Hash => href
                .split_once('#')
                .map_or_else(|| "/".to_string(), |(_, rest)| rest.to_string()),
            HistoryMode::History => {
                let base = self.options.base.trim_end_matches('/');
                href.strip_prefix(base).unwrap_or(href).to_string()
            }
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    pub fn current_path(&self) -> Option<&str> {
        self.state.current_path()
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.state.current_location()
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.state.can_go_forward()
    }

    /// The last committed navigation.
    pub fn last_change(&self) -> Option<&RouteChangeEvent> {
        self.last_event.as_ref()
    }

    pub fn history(&self) -> &RouterState {
        &self.state
    }

    /// Remember the viewport position for the current entry, restored when
    /// the user comes back to it.
    pub fn save_scroll_position(&mut self, position: ScrollPosition) -> bool {
        self.state.save_scroll(position)
    }

    /// Resolve `path` without navigating.
    pub fn resolve(&mut self, path: &str) -> Resolution {
        #[cfg(feature = "cache")]
        {
            if let Some(hit) = self.cache.get(path) {
                return hit.clone();
            }
            let resolution = self.table.resolve(path);
            self.cache.insert(path, resolution.clone());
            resolution
        }
        #[cfg(not(feature = "cache"))]
        {
            self.table.resolve(path)
        }
    }

    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // ------------------------------------------------------------------------
    // Pipeline
    // ------------------------------------------------------------------------

    fn navigate(&mut self, target: Location, mut mode: Mode) -> NavigationResult {
        let requested = target.to_string();
        let mut location = target;
        let mut hops = 0;

        info_log!("Navigating to '{}' ({:?})", requested, mode);

        let stack = loop {
            if hops > MAX_REDIRECTS {
                error_log!(
                    "Redirect loop navigating to '{}' after {} hops, last target '{}'",
                    requested,
                    hops,
                    location
                );
                return NavigationResult::Error(NavigationError::RedirectLoop {
                    path: requested,
                    hops,
                });
            }

            let resolution = self.resolve(&location.path);

            if let Resolution::Redirect { to, .. } = &resolution {
                debug_log!("Record redirect '{}' -> '{}'", location.path, to);
                location = follow_redirect(to, &location);
                mode = redirected(mode);
                hops += 1;
                continue;
            }

            let params = match &resolution {
                Resolution::Matched(stack) => stack.params(),
                _ => RouteParams::new(),
            };
            let mut request = NavigationRequest::new(location.clone()).with_params(params);
            if let Some(from) = self.state.current_location() {
                request = request.with_from(from.clone());
            }

            match self.guards.check(&self.session, &request) {
                NavigationAction::Continue => {}
                NavigationAction::Deny { reason } => {
                    info_log!("Navigation to '{}' blocked: {}", location, reason);
                    return NavigationResult::Blocked { reason };
                }
                NavigationAction::Redirect { to, reason } => {
                    debug_log!(
                        "Guard redirect '{}' -> '{}' ({})",
                        location.path,
                        to,
                        reason.as_deref().unwrap_or("no reason")
                    );
                    location = Location::parse(&to);
                    mode = redirected(mode);
                    hops += 1;
                    continue;
                }
            }

            match resolution {
                Resolution::Matched(stack) => break stack,
                _ => {
                    warn_log!("No route matches '{}'", location.path);
                    return NavigationResult::NotFound {
                        path: location.path,
                    };
                }
            }
        };

        let from = self.state.current_location().cloned();
        let event = match mode {
            Mode::Push => Some(self.state.push(location.clone())),
            Mode::Replace => Some(self.state.replace(location.clone())),
            Mode::Back => self.state.back(),
            Mode::Forward => self.state.forward(),
        };
        let Some(event) = event else {
            return NavigationResult::Error(NavigationError::NoHistoryEntry);
        };

        let saved = match mode {
            Mode::Back | Mode::Forward => self.state.current_entry().and_then(|e| e.scroll),
            Mode::Push | Mode::Replace => None,
        };
        let scroll = scroll_behavior(&location, from.as_ref(), saved);

        info_log!(
            "Navigated {} -> '{}' ({:?}, scroll {:?})",
            event.from.as_deref().unwrap_or("<start>"),
            event.to,
            event.direction,
            scroll
        );

        let path = location.path.clone();
        self.current = Some(ResolvedRoute { location, stack });
        self.last_event = Some(event);

        NavigationResult::Success { path, scroll }
    }
}

/// A redirect taken while going back or forward lands on a new entry.
fn redirected(mode: Mode) -> Mode {
    match mode {
        Mode::Back | Mode::Forward => Mode::Push,
        other => other,
    }
}

/// Location a record redirect leads to. Query and hash carry over unless
/// the redirect sets its own.
fn follow_redirect(to: &str, from: &Location) -> Location {
    let mut next = Location::parse(to);
    if next.query.is_empty() {
        next.query = from.query.clone();
    }
    if next.hash.is_none() {
        next.hash.clone_from(&from.hash);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_lookup() {
        let options = RouterOptions::from_lookup(|key| match key {
            ENV_PUBLIC_PATH => Some("/rotki/".into()),
            ENV_DEVELOPMENT => Some("TRUE".into()),
            _ => None,
        });
        assert_eq!(options.base, "/rotki/");
        assert!(options.development);

        let options = RouterOptions::from_lookup(|key| {
            (key == ENV_PUBLIC_PATH).then(|| "  ".to_string())
        });
        assert_eq!(options, RouterOptions::default());
    }

    #[test]
    fn test_follow_redirect_keeps_query() {
        let from = Location::parse("/history?tab=1#top");
        let next = follow_redirect("/history/trades", &from);
        assert_eq!(next.to_string(), "/history/trades?tab=1#top");

        let next = follow_redirect("/user/login?reason=expired", &from);
        assert_eq!(next.query.get("reason"), Some("expired"));
        assert_eq!(next.query.get("tab"), None);
    }

    #[test]
    fn test_redirect_mode() {
        assert_eq!(redirected(Mode::Back), Mode::Push);
        assert_eq!(redirected(Mode::Replace), Mode::Replace);
    }
}
