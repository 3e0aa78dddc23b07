//! Filter dimensions.

use std::fmt;

/// Produces the autocomplete values of a string matcher.
pub type SuggestFn = Box<dyn Fn() -> Vec<String> + Send + Sync>;

/// Decides whether a typed value may be committed.
pub type ValidateFn = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// One filter dimension the user can type, such as `type` or `start`.
///
/// ```
/// use folio_navigator::filter::Matcher;
///
/// let matcher = Matcher::string("type", "filter by type")
///     .exclusion()
///     .multiple()
///     .suggestions(|| vec!["trade".into(), "deposit".into()]);
///
/// assert!(matcher.matches_key("TYPE"));
/// assert!(matcher.key_starts_with("ty"));
/// assert_eq!(matcher.suggest().len(), 2);
/// ```
pub struct Matcher {
    key: String,
    key_value: String,
    description: String,
    is_string: bool,
    allow_exclusion: bool,
    allow_multiple: bool,
    suggest: SuggestFn,
    validate: ValidateFn,
}

impl Matcher {
    /// Matcher whose values come from a suggestion list.
    pub fn string(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_kind(key.into(), description.into(), true)
    }

    /// Matcher for free-form values (dates, amounts), checked by
    /// [`validate`](Self::validate) only.
    pub fn value(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_kind(key.into(), description.into(), false)
    }

    fn with_kind(key: String, description: String, is_string: bool) -> Self {
        Self {
            key_value: key.clone(),
            key,
            description,
            is_string,
            allow_exclusion: false,
            allow_multiple: false,
            suggest: Box::new(Vec::<String>::new),
            validate: Box::new(|_: &str| true),
        }
    }

    /// Key used in the emitted match state when it differs from the typed key.
    pub fn key_value(mut self, key_value: impl Into<String>) -> Self {
        self.key_value = key_value.into();
        self
    }

    /// Allow `key != value`.
    pub fn exclusion(mut self) -> Self {
        self.allow_exclusion = true;
        self
    }

    /// Allow several values for this key.
    pub fn multiple(mut self) -> Self {
        self.allow_multiple = true;
        self
    }

    pub fn suggestions<F>(mut self, suggest: F) -> Self
    where
        F: Fn() -> Vec<String> + Send + Sync + 'static,
    {
        self.suggest = Box::new(suggest);
        self
    }

    pub fn validate<F>(mut self, validate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validate = Box::new(validate);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state_key(&self) -> &str {
        &self.key_value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_string(&self) -> bool {
        self.is_string
    }

    pub fn allows_exclusion(&self) -> bool {
        self.allow_exclusion
    }

    pub fn allows_multiple(&self) -> bool {
        self.allow_multiple
    }

    pub fn suggest(&self) -> Vec<String> {
        (self.suggest)()
    }

    pub fn is_valid(&self, value: &str) -> bool {
        (self.validate)(value)
    }

    /// Exact key match, ignoring case.
    pub fn matches_key(&self, text: &str) -> bool {
        self.key.to_lowercase() == text.to_lowercase()
    }

    /// Prefix key match, ignoring case. An empty prefix matches.
    pub fn key_starts_with(&self, prefix: &str) -> bool {
        self.key.to_lowercase().starts_with(&prefix.to_lowercase())
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("key", &self.key)
            .field("key_value", &self.key_value)
            .field("is_string", &self.is_string)
            .field("allow_exclusion", &self.allow_exclusion)
            .field("allow_multiple", &self.allow_multiple)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let matcher = Matcher::value("start", "filter by start date");
        assert_eq!(matcher.state_key(), "start");
        assert!(!matcher.is_string());
        assert!(!matcher.allows_exclusion());
        assert!(!matcher.allows_multiple());
        assert!(matcher.suggest().is_empty());
        assert!(matcher.is_valid("anything"));
    }

    #[test]
    fn test_key_value_and_validation() {
        let matcher = Matcher::value("start", "filter by start date")
            .key_value("fromTimestamp")
            .validate(|v| v.chars().all(|c| c.is_ascii_digit() || c == '/'));

        assert_eq!(matcher.key(), "start");
        assert_eq!(matcher.state_key(), "fromTimestamp");
        assert!(matcher.is_valid("12/01/2023"));
        assert!(!matcher.is_valid("yesterday"));
    }

    #[test]
    fn test_key_comparisons_ignore_case() {
        let matcher = Matcher::string("Asset", "filter by asset");
        assert!(matcher.matches_key("asset"));
        assert!(!matcher.matches_key("ass"));
        assert!(matcher.key_starts_with("AS"));
        assert!(matcher.key_starts_with(""));
    }
}
