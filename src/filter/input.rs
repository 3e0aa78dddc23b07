//! The chip filter input state machine.
//!
//! ```text
//!            set_text("ty")               submit / select
//!   Idle ─────────────────▶ Composing ─────────────────────▶ Selected
//!    ▲                        │  ▲                             │
//!    │       abandon / clear  │  │ edit_chip                   │
//!    └────────────────────────┘  └─────────────────────────────┘
//! ```
//!
//! The host renders [`FilterInput::text`], [`FilterInput::chips`] and
//! [`FilterInput::suggestions`], and forwards user events to the matching
//! methods. Every change to the committed chips is pushed to the
//! [`on_update`](FilterInput::on_update) listeners as a full [`MatchState`].

use super::expr::{parse, Comparison, EXCLUSION_MARKER};
use super::matcher::Matcher;
use super::state::{MatchState, MatchValue};
use crate::error::FilterError;
use crate::{debug_log, trace_log, warn_log};
use std::fmt;

// ============================================================================
// Chips and suggestions
// ============================================================================

/// One committed filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    /// Matcher key as declared.
    pub key: String,
    pub comparison: Comparison,
    pub value: String,
}

impl Chip {
    /// Text put back in the input when the chip is clicked: `type=type 1`.
    pub fn edit_text(&self) -> String {
        format!("{}{}{}", self.key, self.comparison.symbol(), self.value)
    }

    /// Value as stored in the match state, `!`-prefixed when excluded.
    pub fn state_value(&self) -> String {
        match self.comparison {
            Comparison::Include => self.value.clone(),
            Comparison::Exclude => format!("{EXCLUSION_MARKER}{}", self.value),
        }
    }
}

impl fmt::Display for Chip {
    /// Chip label: `type = type 1` or `type != type 1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.comparison.symbol(), self.value)
    }
}

/// An entry of the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// A matcher whose key starts with the typed text.
    Key { key: String, description: String },
    /// A value for the resolved matcher.
    Value {
        key: String,
        comparison: Comparison,
        value: String,
    },
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::Key { key, description } => write!(f, "{key}: {description}"),
            Suggestion::Value {
                key,
                comparison,
                value,
            } => write!(f, "{key} {} {value}", comparison.symbol()),
        }
    }
}

/// Where the input is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// No text, no chips.
    Idle,
    /// Text is being typed.
    Composing,
    /// No text, one or more chips.
    Selected,
}

/// Tuning knobs for [`FilterInput`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Cap on value suggestions. `None` shows them all.
    pub max_value_suggestions: Option<usize>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_value_suggestions(mut self, max: usize) -> Self {
        self.max_value_suggestions = Some(max);
        self
    }
}

/// Receives the full match state after every change.
pub type UpdateListener = Box<dyn FnMut(&MatchState) + Send>;

// ============================================================================
// FilterInput
// ============================================================================

/// Text input that turns `key op value` expressions into chips.
///
/// ```
/// use folio_navigator::filter::{FilterInput, Matcher};
///
/// let mut input = FilterInput::new(vec![
///     Matcher::string("type", "filter by type")
///         .multiple()
///         .suggestions(|| vec!["type 1".into(), "type 2".into()]),
/// ])
/// .unwrap();
///
/// input.set_text("type");
/// let first = input.suggestions().remove(0);
/// assert_eq!(first.to_string(), "type = type 1");
///
/// input.select(&first).unwrap();
/// assert_eq!(input.chips()[0].to_string(), "type = type 1");
/// assert_eq!(input.match_state().to_json().unwrap(), r#"{"type":["type 1"]}"#);
/// ```
pub struct FilterInput {
    matchers: Vec<Matcher>,
    options: FilterOptions,
    text: String,
    chips: Vec<Chip>,
    highlighted: usize,
    listeners: Vec<UpdateListener>,
}

impl FilterInput {
    /// Input over `matchers`. Keys must be unique, ignoring case.
    pub fn new(matchers: Vec<Matcher>) -> Result<Self, FilterError> {
        Self::with_options(matchers, FilterOptions::default())
    }

    /// Input over `matchers` with tuning `options`.
    ///
    /// Both the typed keys (ignoring case) and the state keys must be unique.
    pub fn with_options(
        matchers: Vec<Matcher>,
        options: FilterOptions,
    ) -> Result<Self, FilterError> {
        for (i, matcher) in matchers.iter().enumerate() {
            let earlier = &matchers[..i];
            if earlier.iter().any(|m| m.matches_key(matcher.key())) {
                return Err(FilterError::DuplicateKey {
                    key: matcher.key().to_string(),
                });
            }
            if earlier.iter().any(|m| m.state_key() == matcher.state_key()) {
                return Err(FilterError::DuplicateStateKey {
                    key: matcher.state_key().to_string(),
                });
            }
        }

        Ok(Self {
            matchers,
            options,
            text: String::new(),
            chips: Vec::new(),
            highlighted: 0,
            listeners: Vec::new(),
        })
    }

    /// Start from a previously emitted state. Nothing is emitted.
    pub fn with_matches(mut self, matches: &MatchState) -> Self {
        self.restore(matches);
        self
    }

    /// Register a listener for match state changes.
    pub fn on_update<F>(&mut self, listener: F)
    where
        F: FnMut(&MatchState) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    /// Index of the highlighted suggestion.
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn mode(&self) -> FilterMode {
        if !self.text.is_empty() {
            FilterMode::Composing
        } else if self.chips.is_empty() {
            FilterMode::Idle
        } else {
            FilterMode::Selected
        }
    }

    /// Committed chips as the map the owning page stores.
    pub fn match_state(&self) -> MatchState {
        let mut state = MatchState::new();
        for chip in &self.chips {
            let Some(matcher) = self.matcher(&chip.key) else {
                continue;
            };
            if matcher.allows_multiple() {
                state.push(matcher.state_key(), chip.state_value());
            } else {
                state.insert(matcher.state_key(), MatchValue::Single(chip.state_value()));
            }
        }
        state
    }

    /// Suggestions for the current text, in display order.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        let expr = parse(&self.text);

        let Some(matcher) = self.matcher(expr.key) else {
            if expr.comparison.is_some() {
                return Vec::new();
            }
            return self
                .matchers
                .iter()
                .filter(|m| m.key_starts_with(expr.key))
                .map(|m| Suggestion::Key {
                    key: m.key().to_string(),
                    description: m.description().to_string(),
                })
                .collect();
        };

        let comparison = expr.comparison.unwrap_or_default();
        if comparison == Comparison::Exclude && !matcher.allows_exclusion() {
            trace_log!("'{}' does not allow exclusion, no suggestions", matcher.key());
            return Vec::new();
        }

        let value_suggestion = |value: String| Suggestion::Value {
            key: matcher.key().to_string(),
            comparison,
            value,
        };

        if !matcher.is_string() {
            return expr
                .value
                .filter(|v| !v.starts_with(EXCLUSION_MARKER) && matcher.is_valid(v))
                .map(|v| vec![value_suggestion(v.to_string())])
                .unwrap_or_default();
        }

        let fragment = expr.value.unwrap_or_default().to_lowercase();
        let mut values: Vec<String> = matcher
            .suggest()
            .into_iter()
            .filter(|v| !v.starts_with(EXCLUSION_MARKER))
            .filter(|v| v.to_lowercase().contains(&fragment))
            .collect();
        // Stable: prefix matches first, declaration order otherwise.
        values.sort_by_key(|v| !v.to_lowercase().starts_with(&fragment));
        if let Some(max) = self.options.max_value_suggestions {
            values.truncate(max);
        }

        trace_log!(
            "{} value suggestions for '{}' matching '{}'",
            values.len(),
            matcher.key(),
            fragment
        );
        values.into_iter().map(value_suggestion).collect()
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    /// Replace the typed text. Resets the highlight.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.highlighted = 0;
    }

    pub fn highlight_next(&mut self) {
        let count = self.suggestions().len();
        if count > 0 {
            self.highlighted = (self.highlighted + 1) % count;
        }
    }

    pub fn highlight_previous(&mut self) {
        let count = self.suggestions().len();
        if count > 0 {
            self.highlighted = (self.highlighted + count - 1) % count;
        }
    }

    /// Act on a clicked suggestion. A key suggestion fills in `key=`, a value
    /// suggestion is committed.
    pub fn select(&mut self, suggestion: &Suggestion) -> Result<(), FilterError> {
        match suggestion {
            Suggestion::Key { key, .. } => {
                self.set_text(format!("{key}="));
                Ok(())
            }
            Suggestion::Value {
                key,
                comparison,
                value,
            } => self.commit(key, *comparison, value),
        }
    }

    /// Enter key. Commits a complete expression as typed; otherwise selects
    /// the highlighted suggestion.
    pub fn submit(&mut self) -> Result<(), FilterError> {
        let expr = parse(&self.text);
        if let (Some(comparison), Some(value)) = (expr.comparison, expr.value) {
            let (key, value) = (expr.key.to_string(), value.to_string());
            return self.commit(&key, comparison, &value);
        }

        let suggestions = self.suggestions();
        if let Some(suggestion) = suggestions
            .get(self.highlighted)
            .or_else(|| suggestions.first())
        {
            return self.select(suggestion);
        }

        let key = expr.key.to_string();
        Err(match self.matcher(&key) {
            None => FilterError::UnknownKey { key },
            Some(m) if expr.comparison == Some(Comparison::Exclude) && !m.allows_exclusion() => {
                FilterError::ExclusionNotAllowed { key }
            }
            Some(_) => FilterError::EmptyValue { key },
        })
    }

    /// Move chip `index` back into the text for editing. Emits.
    pub fn edit_chip(&mut self, index: usize) -> bool {
        if index >= self.chips.len() {
            return false;
        }
        let chip = self.chips.remove(index);
        self.set_text(chip.edit_text());
        debug_log!("Editing chip '{}'", chip);
        self.emit();
        true
    }

    /// Delete chip `index`. Emits.
    pub fn remove_chip(&mut self, index: usize) -> bool {
        if index >= self.chips.len() {
            return false;
        }
        let chip = self.chips.remove(index);
        debug_log!("Removed chip '{}'", chip);
        self.emit();
        true
    }

    /// Drop the typed text. Chips are untouched and nothing is emitted.
    pub fn abandon(&mut self) {
        self.set_text(String::new());
    }

    /// Remove all chips and text. Emits.
    pub fn clear(&mut self) {
        self.chips.clear();
        self.set_text(String::new());
        self.emit();
    }

    /// Replace the chips with those described by `matches`, visiting matchers
    /// in declaration order. Values are not validated and nothing is emitted.
    pub fn restore(&mut self, matches: &MatchState) {
        self.chips.clear();

        for key in matches.keys() {
            if !self.matchers.iter().any(|m| m.state_key() == key) {
                warn_log!("No matcher for restored filter key '{}', skipping", key);
            }
        }

        for matcher in &self.matchers {
            let Some(value) = matches.get(matcher.state_key()) else {
                continue;
            };
            let mut values = value.values();
            if !matcher.allows_multiple() && values.len() > 1 {
                warn_log!(
                    "'{}' takes a single value, restoring only the first of {}",
                    matcher.key(),
                    values.len()
                );
                values.truncate(1);
            }

            for raw in values {
                let (comparison, value) = match raw.strip_prefix(EXCLUSION_MARKER) {
                    Some(value) => (Comparison::Exclude, value),
                    None => (Comparison::Include, raw),
                };
                self.chips.push(Chip {
                    key: matcher.key().to_string(),
                    comparison,
                    value: value.to_string(),
                });
            }
        }
        debug_log!("Restored {} filter chips", self.chips.len());
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn matcher(&self, key: &str) -> Option<&Matcher> {
        self.matchers.iter().find(|m| m.matches_key(key))
    }

    fn commit(
        &mut self,
        key: &str,
        comparison: Comparison,
        value: &str,
    ) -> Result<(), FilterError> {
        let matcher = self.matcher(key).ok_or_else(|| FilterError::UnknownKey {
            key: key.to_string(),
        })?;
        let value = value.trim();

        if value.is_empty() {
            return Err(FilterError::EmptyValue {
                key: matcher.key().to_string(),
            });
        }
        // A leading marker is reserved for exclusions in the stored state.
        let marked = value.starts_with(EXCLUSION_MARKER);
        if (comparison == Comparison::Exclude || marked) && !matcher.allows_exclusion() {
            return Err(FilterError::ExclusionNotAllowed {
                key: matcher.key().to_string(),
            });
        }
        if marked || !matcher.is_valid(value) {
            return Err(FilterError::InvalidValue {
                key: matcher.key().to_string(),
                value: value.to_string(),
            });
        }

        let multiple = matcher.allows_multiple();
        let chip = Chip {
            key: matcher.key().to_string(),
            comparison,
            value: value.to_string(),
        };
        debug_log!("Committing chip '{}'", chip);

        if multiple {
            if !self.chips.contains(&chip) {
                self.chips.push(chip);
            }
        } else if let Some(existing) = self.chips.iter_mut().find(|c| c.key == chip.key) {
            *existing = chip;
        } else {
            self.chips.push(chip);
        }

        self.set_text(String::new());
        self.emit();
        Ok(())
    }

    fn emit(&mut self) {
        let state = self.match_state();
        for listener in &mut self.listeners {
            listener(&state);
        }
    }
}

impl fmt::Debug for FilterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterInput")
            .field("matchers", &self.matchers)
            .field("text", &self.text)
            .field("chips", &self.chips)
            .field("highlighted", &self.highlighted)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
