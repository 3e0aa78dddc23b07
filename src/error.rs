//! Error and outcome types.
//!
//! - [`NavigationResult`] is the outcome of every navigation attempt
//!   (`Success`, `NotFound`, `Blocked`, `Error`).
//! - [`NavigationError`] carries the detail when navigation cannot finish.
//! - [`RouteTableError`] is returned when a route tree fails validation.
//! - [`FilterError`] explains why the filter input refused to commit text.
//!
//! # Examples
//!
//! ```
//! use folio_navigator::error::NavigationResult;
//! use folio_navigator::ScrollAction;
//!
//! let result = NavigationResult::Success {
//!     path: "/dashboard".into(),
//!     scroll: ScrollAction::Reset,
//! };
//! assert!(result.is_success());
//!
//! let blocked = NavigationResult::Blocked {
//!     reason: "Unsaved changes".into(),
//! };
//! assert!(blocked.is_blocked());
//! ```

use crate::scroll::ScrollAction;

// ============================================================================
// Navigation Result Types
// ============================================================================

/// Outcome of a navigation attempt through the guard pipeline.
///
/// Returned by [`Router::push`](crate::Router::push) and friends.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationResult {
    /// Navigation committed to history.
    Success {
        /// Final path after record redirects and guard redirects.
        path: String,
        /// What the host should do with the viewport.
        scroll: ScrollAction,
    },
    /// No route matches the path.
    NotFound { path: String },
    /// A guard denied navigation. History is unchanged.
    Blocked { reason: String },
    /// Navigation failed.
    Error(NavigationError),
}

impl NavigationResult {
    /// Check if navigation was successful
    pub fn is_success(&self) -> bool {
        matches!(self, NavigationResult::Success { .. })
    }

    /// Check if route was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavigationResult::NotFound { .. })
    }

    /// Check if navigation was blocked
    pub fn is_blocked(&self) -> bool {
        matches!(self, NavigationResult::Blocked { .. })
    }

    /// Check if there was an error
    pub fn is_error(&self) -> bool {
        matches!(self, NavigationResult::Error(_))
    }

    /// Final path for a successful navigation.
    pub fn path(&self) -> Option<&str> {
        match self {
            NavigationResult::Success { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Scroll action for a successful navigation.
    pub fn scroll(&self) -> Option<&ScrollAction> {
        match self {
            NavigationResult::Success { scroll, .. } => Some(scroll),
            _ => None,
        }
    }
}

/// Detailed navigation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("redirect loop while navigating to {path} ({hops} hops)")]
    RedirectLoop { path: String, hops: usize },

    #[error("no route named '{name}'")]
    UnknownRouteName { name: String },

    #[error("route '{name}' needs parameter '{param}'")]
    MissingParam { name: String, param: String },

    #[error("no history entry in that direction")]
    NoHistoryEntry,

    #[error("no page factory registered for {page:?}")]
    PageNotRegistered { page: crate::pages::Page },
}

// ============================================================================
// Route table validation
// ============================================================================

/// Structural problems found while building a [`RouteTable`](crate::RouteTable).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("duplicate path '{path}' under '{parent}'")]
    DuplicatePath { parent: String, path: String },

    #[error("duplicate route name '{name}'")]
    DuplicateName { name: String },

    #[error("redirect from '{from}' points at '{to}', which matches no route")]
    UnresolvedRedirect { from: String, to: String },

    #[error("child path '{path}' is not under its parent '{parent}'")]
    InvalidChildPath { parent: String, path: String },
}

// ============================================================================
// Filter input
// ============================================================================

/// Reasons a filter expression is not committed as a chip.
///
/// The input keeps its text when any of these occur; no chip is produced.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("matcher key '{key}' is declared more than once")]
    DuplicateKey { key: String },

    #[error("state key '{key}' is used by more than one matcher")]
    DuplicateStateKey { key: String },

    #[error("no matcher for key '{key}'")]
    UnknownKey { key: String },

    #[error("no value given for '{key}'")]
    EmptyValue { key: String },

    #[error("'{value}' is not a valid value for '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("'{key}' does not support exclusion")]
    ExclusionNotAllowed { key: String },

    #[error("match state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Tests
// ============================================================================
