//! Navigation requests, guard verdicts and change events.
//!
//! - [`NavigationRequest`] is what a guard sees: where the user is and where
//!   they are going.
//! - [`NavigationAction`] is the guard's verdict.
//! - [`RouteChangeEvent`] records a navigation that was committed.

use crate::location::Location;
use crate::params::RouteParams;

// ============================================================================
// NavigationAction
// ============================================================================

/// Verdict of a guard.
///
/// ```
/// use folio_navigator::NavigationAction;
///
/// let action = NavigationAction::redirect("/user/login");
/// assert_eq!(action.redirect_path(), Some("/user/login"));
/// assert!(NavigationAction::deny("Unsaved changes").is_deny());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Allow navigation to proceed.
    Continue,

    /// Block navigation; history is left untouched.
    Deny { reason: String },

    /// Start a new navigation to `to` instead.
    Redirect { to: String, reason: Option<String> },
}

impl NavigationAction {
    pub fn allow() -> Self {
        Self::Continue
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: reason.into(),
        }
    }

    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: None,
        }
    }

    pub fn redirect_with_reason(to: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: Some(reason.into()),
        }
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    /// Redirect target, if this is a redirect.
    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Self::Redirect { to, .. } => Some(to.as_str()),
            _ => None,
        }
    }
}

// ============================================================================
// NavigationRequest
// ============================================================================

/// A pending navigation as seen by guards.
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    /// Current location, `None` on initial load.
    pub from: Option<Location>,
    /// Target after record redirects were applied.
    pub to: Location,
    /// Params the target resolved with. Empty when the target matched nothing.
    pub params: RouteParams,
}

impl NavigationRequest {
    pub fn new(to: Location) -> Self {
        Self {
            from: None,
            to,
            params: RouteParams::new(),
        }
    }

    pub fn with_from(mut self, from: Location) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    /// Target path, without query or hash.
    pub fn to_path(&self) -> &str {
        &self.to.path
    }

    pub fn from_path(&self) -> Option<&str> {
        self.from.as_ref().map(|l| l.path.as_str())
    }
}

// ============================================================================
// Route change events
// ============================================================================

/// How the history stack moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    /// A new entry was pushed.
    Forward,
    Back,
    /// The current entry was overwritten.
    Replace,
}

/// A committed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChangeEvent {
    pub from: Option<String>,
    pub to: String,
    pub direction: NavigationDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_helpers() {
        assert!(NavigationAction::allow().is_continue());
        assert_eq!(NavigationAction::Continue.redirect_path(), None);

        let redirect = NavigationAction::redirect_with_reason("/dashboard", "Already logged in");
        assert!(redirect.is_redirect());
        assert_eq!(redirect.redirect_path(), Some("/dashboard"));
    }

    #[test]
    fn test_request_paths() {
        let request = NavigationRequest::new(Location::parse("/nfts?page=2"))
            .with_from(Location::from_path("/dashboard"));
        assert_eq!(request.to_path(), "/nfts");
        assert_eq!(request.from_path(), Some("/dashboard"));
        assert!(request.params.is_empty());
    }
}
