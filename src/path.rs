//! Path helpers shared by the route table, the resolver and the guard.
//!
//! # Normalization rules
//!
//! 1. An empty path is the root `"/"`.
//! 2. A leading slash is ensured (`"dashboard"` becomes `"/dashboard"`).
//! 3. Trailing slashes are removed, except for the root.
//! 4. Repeated slashes are collapsed (`"//dashboard"` becomes `"/dashboard"`).
//!
//! ```
//! use folio_navigator::normalize_path;
//!
//! assert_eq!(normalize_path("dashboard/"), "/dashboard");
//! assert_eq!(normalize_path("//"), "/");
//! ```

use std::borrow::Cow;

/// Strip leading and trailing slashes.
#[inline]
pub(crate) fn trim_slashes(path: &str) -> &str {
    path.trim_start_matches('/').trim_end_matches('/')
}

/// Split a path into its non-empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Normalize a path for comparison. Borrows when nothing changes.
#[must_use]
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.is_empty() {
        return Cow::Borrowed("/");
    }
    if path == "/" {
        return Cow::Borrowed(path);
    }

    let already = path.starts_with('/') && !path.ends_with('/') && !path.contains("//");
    if already {
        return Cow::Borrowed(path);
    }

    let segments = split_path(path);
    if segments.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", segments.join("/")))
    }
}

/// Join a parent's full path with a child's declared path.
///
/// Absolute child paths (leading `/`) are already full and are returned
/// normalized. An empty child path is the parent's index route.
///
/// ```
/// use folio_navigator::join_paths;
///
/// assert_eq!(join_paths("/history", "trades"), "/history/trades");
/// assert_eq!(join_paths("/history", "/history/trades"), "/history/trades");
/// assert_eq!(join_paths("/history", ""), "/history");
/// assert_eq!(join_paths("/", "dashboard"), "/dashboard");
/// ```
#[must_use]
pub fn join_paths<'a>(parent: &'a str, child: &'a str) -> Cow<'a, str> {
    if child.is_empty() {
        return normalize_path(parent);
    }
    if child.starts_with('/') {
        return normalize_path(child);
    }

    let parent = trim_slashes(parent);
    let child = trim_slashes(child);
    if parent.is_empty() {
        Cow::Owned(format!("/{child}"))
    } else {
        Cow::Owned(format!("/{parent}/{child}"))
    }
}

/// Segments of `full` that remain after removing the `parent` prefix.
///
/// Returns `None` when `full` is not under `parent`.
pub(crate) fn relative_segments<'a>(parent: &str, full: &'a str) -> Option<Vec<&'a str>> {
    let parent_segments = split_path(parent);
    let full_segments = split_path(full);
    if full_segments.len() < parent_segments.len() {
        return None;
    }
    if parent_segments
        .iter()
        .zip(&full_segments)
        .any(|(p, f)| p != f)
    {
        return None;
    }
    Some(full_segments[parent_segments.len()..].to_vec())
}

/// Parameter name of a dynamic segment, without the `:` and any `*`/`?`
/// modifier. `None` for literal segments.
///
/// ```
/// use folio_navigator::param_name;
///
/// assert_eq!(param_name(":identifier"), Some("identifier"));
/// assert_eq!(param_name(":location*"), Some("location"));
/// assert_eq!(param_name("staking"), None);
/// ```
pub fn param_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix(':')
        .map(|name| name.trim_end_matches(['*', '?']))
}

/// Whether a segment may match zero or more path segments (`:name*`).
pub fn is_rest_segment(segment: &str) -> bool {
    segment.starts_with(':') && segment.ends_with('*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_slashes() {
        assert_eq!(normalize_path("/settings//general"), "/settings/general");
        assert_eq!(normalize_path("settings/general/"), "/settings/general");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_normalize_borrows_when_clean() {
        assert!(matches!(normalize_path("/dashboard"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_relative_segments() {
        assert_eq!(
            relative_segments("/defi", "/defi/deposits/protocols"),
            Some(vec!["deposits", "protocols"])
        );
        assert_eq!(relative_segments("/defi", "/defi"), Some(vec![]));
        assert_eq!(relative_segments("/defi", "/history/trades"), None);
        assert_eq!(relative_segments("/", "/nfts"), Some(vec!["nfts"]));
    }

    #[test]
    fn test_rest_segment() {
        assert!(is_rest_segment(":location*"));
        assert!(!is_rest_segment(":location"));
        assert!(!is_rest_segment("staking"));
    }
}
