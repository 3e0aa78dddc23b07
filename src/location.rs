//! Parsed navigation targets.
//!
//! A [`Location`] is what the router navigates to: a normalized path, its
//! query parameters and an optional hash fragment naming an element to
//! scroll to.
//!
//! ```
//! use folio_navigator::Location;
//!
//! let loc = Location::parse("/asset-manager/custom?id=ETH#table");
//! assert_eq!(loc.path, "/asset-manager/custom");
//! assert_eq!(loc.query.get("id"), Some("ETH"));
//! assert_eq!(loc.hash.as_deref(), Some("table"));
//! ```

use crate::params::QueryParams;
use crate::path::normalize_path;
use std::fmt;

/// Path, query and hash of a navigation target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Normalized path, always starting with `/`.
    pub path: String,
    pub query: QueryParams,
    /// Fragment without the leading `#`. Empty fragments are `None`.
    pub hash: Option<String>,
}

impl Location {
    /// Parse `path[?query][#hash]`.
    pub fn parse(raw: &str) -> Self {
        let (rest, hash) = match raw.split_once('#') {
            Some((rest, hash)) if !hash.is_empty() => (rest, Some(hash.to_string())),
            Some((rest, _)) => (rest, None),
            None => (raw, None),
        };
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

        Self {
            path: normalize_path(path).into_owned(),
            query: QueryParams::from_query_string(query),
            hash,
        }
    }

    /// Location with only a path.
    pub fn from_path(path: &str) -> Self {
        Self {
            path: normalize_path(path).into_owned(),
            ..Self::default()
        }
    }
}

impl fmt::Display for Location {
    /// Full path: `path[?query][#hash]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query.to_query_string())?;
        }
        if let Some(hash) = &self.hash {
            write!(f, "#{hash}")?;
        }
        Ok(())
    }
}
