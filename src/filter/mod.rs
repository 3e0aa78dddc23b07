//! Chip-based filter input.
//!
//! The user types `key op value` (`type = trade`, `asset != ETH`); the input
//! resolves the key against declared [`Matcher`]s, offers suggestions, and
//! turns committed expressions into [`Chip`]s. The owning page receives the
//! full [`MatchState`] after every change and persists it however it likes.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`matcher`] | [`Matcher`] builder |
//! | [`expr`] | [`parse`], [`Comparison`] |
//! | [`state`] | [`MatchState`], [`MatchValue`] |
//! | [`input`] | [`FilterInput`], [`Chip`], [`Suggestion`] |
//!
//! Enabled by the `filter` feature (on by default).

pub mod expr;
pub mod input;
pub mod matcher;
pub mod state;

pub use expr::{parse, Comparison, Expression, EXCLUSION_MARKER};
pub use input::{Chip, FilterInput, FilterMode, FilterOptions, Suggestion, UpdateListener};
pub use matcher::{Matcher, SuggestFn, ValidateFn};
pub use state::{MatchState, MatchValue};
