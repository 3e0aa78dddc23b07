//! Path parameters and query strings.
//!
//! - [`RouteParams`] holds values captured by dynamic segments such as
//!   `:identifier` in `/assets/:identifier`. Children inherit their parent's
//!   captures through [`merge`](RouteParams::merge).
//! - [`QueryParams`] holds the `?key=value&...` part of a location. Keys may
//!   repeat (`?tag=a&tag=b`).
//!
//! Both use ordered maps so that generated URLs and debug output are stable.
//!
//! ```
//! use folio_navigator::{QueryParams, RouteParams};
//!
//! let mut params = RouteParams::new();
//! params.insert("id", "42");
//! assert_eq!(params.get_as::<u32>("id"), Some(42));
//!
//! let query = QueryParams::from_query_string("id=ETH&page=2");
//! assert_eq!(query.get("id"), Some("ETH"));
//! ```

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// Characters left untouched when encoding a query component
/// (RFC 3986 unreserved set).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Parameters captured from dynamic path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: BTreeMap<String, String>,
}

impl RouteParams {
    /// Create empty route parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a parameter and parse it as a specific type.
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over all `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Merge parent parameters with child parameters.
    ///
    /// Child values win on collision.
    ///
    /// ```
    /// use folio_navigator::RouteParams;
    ///
    /// let mut parent = RouteParams::new();
    /// parent.insert("location", "kraken");
    /// let mut child = RouteParams::new();
    /// child.insert("location", "binance");
    ///
    /// let merged = RouteParams::merge(&parent, &child);
    /// assert_eq!(merged.get("location"), Some("binance"));
    /// ```
    pub fn merge(parent: &RouteParams, child: &RouteParams) -> RouteParams {
        let mut merged = parent.clone();
        for (key, value) in child.iter() {
            merged.insert(key, value);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters parsed from a location's query string.
///
/// ```
/// use folio_navigator::QueryParams;
///
/// let query = QueryParams::from_query_string("tag=defi&tag=staking&page=1");
/// assert_eq!(query.get_all("tag"), &["defi".to_string(), "staking".to_string()]);
/// assert_eq!(query.get_as::<u32>("page"), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string (without the leading `?`).
    ///
    /// A pair without `=` is kept as a key with an empty value, the way
    /// browsers read `?flag`.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.insert(decode_component(key), decode_component(value));
        }
        params
    }

    /// First value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key)?.first().map(String::as_str)
    }

    /// All values for a key, in the order they appeared.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.params.get(key).map_or(&[], Vec::as_slice)
    }

    /// First value for a key, parsed as `T`.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Append a value; existing values for the key are kept.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Serialize back into a query string, keys in order.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .flat_map(|(key, values)| {
                values.iter().map(move |value| {
                    format!(
                        "{}={}",
                        utf8_percent_encode(key, QUERY_COMPONENT),
                        utf8_percent_encode(value, QUERY_COMPONENT)
                    )
                })
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

/// Decode one query component; `+` means space.
fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_params_basic() {
        let mut params = RouteParams::new();
        params.insert("identifier", "ETH");

        assert_eq!(params.get("identifier"), Some("ETH"));
        assert!(params.contains("identifier"));
        assert!(!params.contains("missing"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_route_params_get_as() {
        let params: RouteParams = [("id", "123"), ("open", "true")].into_iter().collect();

        assert_eq!(params.get_as::<u64>("id"), Some(123));
        assert_eq!(params.get_as::<bool>("open"), Some(true));
        assert_eq!(params.get_as::<u64>("missing"), None);
    }

    #[test]
    fn test_query_params_decoding() {
        let query = QueryParams::from_query_string("id=eip155%3A1%2Ferc20&note=a+b&flag");
        assert_eq!(query.get("id"), Some("eip155:1/erc20"));
        assert_eq!(query.get("note"), Some("a b"));
        assert_eq!(query.get("flag"), Some(""));
    }

    #[test]
    fn test_query_params_multiple_values() {
        let query = QueryParams::from_query_string("tag=a&tag=b");
        assert_eq!(query.get_all("tag").len(), 2);
        assert_eq!(query.get("tag"), Some("a"));
        assert!(query.get_all("missing").is_empty());
    }

    #[test]
    fn test_to_query_string_is_ordered_and_encoded() {
        let mut query = QueryParams::new();
        query.insert("sort", "name");
        query.insert("id", "a b/c");
        assert_eq!(query.to_query_string(), "id=a%20b%2Fc&sort=name");
    }

    #[test]
    fn test_empty_query_string() {
        assert!(QueryParams::from_query_string("").is_empty());
    }
}
