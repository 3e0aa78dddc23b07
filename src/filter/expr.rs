//! Parsing of typed `key op value` text.

/// Include (`=`) or exclude (`!=`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Comparison {
    #[default]
    Include,
    Exclude,
}

impl Comparison {
    /// Operator as typed.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Include => "=",
            Comparison::Exclude => "!=",
        }
    }
}

/// Prefix marking an excluded value in the match state.
pub const EXCLUSION_MARKER: char = '!';

/// The parts of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression<'a> {
    /// Left-hand token, trimmed. The whole text when there is no operator.
    pub key: &'a str,
    pub comparison: Option<Comparison>,
    /// Right-hand token, trimmed. `None` when empty.
    pub value: Option<&'a str>,
}

impl Expression<'_> {
    /// Operator and value are both present.
    pub fn is_complete(&self) -> bool {
        self.comparison.is_some() && self.value.is_some()
    }
}

/// Split `text` on its first `=`; a `!` right before it makes it `!=`.
///
/// ```
/// use folio_navigator::filter::{parse, Comparison};
///
/// let expr = parse("type != type 1");
/// assert_eq!(expr.key, "type");
/// assert_eq!(expr.comparison, Some(Comparison::Exclude));
/// assert_eq!(expr.value, Some("type 1"));
///
/// let expr = parse(" ty ");
/// assert_eq!(expr.key, "ty");
/// assert_eq!(expr.comparison, None);
/// ```
pub fn parse(text: &str) -> Expression<'_> {
    let Some((left, right)) = text.split_once('=') else {
        return Expression {
            key: text.trim(),
            comparison: None,
            value: None,
        };
    };

    let (key, comparison) = match left.strip_suffix(EXCLUSION_MARKER) {
        Some(key) => (key, Comparison::Exclude),
        None => (left, Comparison::Include),
    };
    let value = right.trim();

    Expression {
        key: key.trim(),
        comparison: Some(comparison),
        value: (!value.is_empty()).then_some(value),
    }
}
