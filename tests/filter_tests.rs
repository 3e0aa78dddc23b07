#![cfg(feature = "filter")]

mod common;

use common::filter::input;
use folio_navigator::filter::{
    Comparison, FilterInput, FilterMode, MatchState, MatchValue, Matcher, Suggestion,
};
use folio_navigator::FilterError;
use pretty_assertions::assert_eq;

fn labels(suggestions: &[Suggestion]) -> Vec<String> {
    suggestions.iter().map(ToString::to_string).collect()
}

fn state(json: &str) -> MatchState {
    MatchState::from_json(json).unwrap()
}

#[test]
fn test_key_suggestions() {
    let (mut input, _) = input(&MatchState::new());

    assert_eq!(input.suggestions().len(), 2);

    input.set_text("ty");
    assert_eq!(labels(&input.suggestions()), vec!["type: filter by type"]);

    input.set_text("x");
    assert!(input.suggestions().is_empty());
}

#[test]
fn test_selecting_key_fills_operator() {
    let (mut input, recorder) = input(&MatchState::new());
    input.set_text("ty");

    let key = input.suggestions().remove(0);
    input.select(&key).unwrap();

    assert_eq!(input.text(), "type=");
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_value_suggestions() {
    let (mut input, _) = input(&MatchState::new());

    input.set_text("type");
    assert_eq!(
        labels(&input.suggestions()),
        vec!["type = type 1", "type = type 2", "type = type 3"]
    );

    input.set_text("TYPE = 3");
    assert_eq!(labels(&input.suggestions()), vec!["type = type 3"]);

    input.set_text("start=");
    assert!(input.suggestions().is_empty());
}

#[test]
fn test_multiple_values_accumulate() {
    let (mut input, recorder) = input(&MatchState::new());

    input.set_text("type");
    let first = input.suggestions().remove(0);
    input.select(&first).unwrap();
    assert_eq!(recorder.last(), Some(state(r#"{"type":["type 1"]}"#)));
    assert_eq!(input.mode(), FilterMode::Selected);

    input.set_text("type");
    let second = input.suggestions().remove(1);
    assert_eq!(second.to_string(), "type = type 2");
    input.select(&second).unwrap();
    assert_eq!(
        recorder.last(),
        Some(state(r#"{"type":["type 1","type 2"]}"#))
    );

    // Committing a value twice keeps one chip.
    input.set_text("type=type 2");
    input.submit().unwrap();
    assert_eq!(input.chips().len(), 2);
    assert_eq!(recorder.count(), 3);
}

#[test]
fn test_remove_chip() {
    let (mut input, recorder) = input(&state(r#"{"type":["type 1","type 2"]}"#));

    assert!(input.remove_chip(0));
    assert_eq!(recorder.last(), Some(state(r#"{"type":["type 2"]}"#)));

    assert!(!input.remove_chip(5));
    assert_eq!(recorder.count(), 1);

    assert!(input.remove_chip(0));
    assert_eq!(recorder.last(), Some(MatchState::new()));
    assert!(!recorder.last().unwrap().contains_key("type"));
}

#[test]
fn test_edit_chip() {
    let (mut input, recorder) = input(&state(r#"{"type":["type 2"]}"#));

    assert!(input.edit_chip(0));
    assert_eq!(recorder.last(), Some(MatchState::new()));
    assert_eq!(input.text(), "type=type 2");
    assert_eq!(input.mode(), FilterMode::Composing);

    input.submit().unwrap();
    assert_eq!(recorder.last(), Some(state(r#"{"type":["type 2"]}"#)));
}

#[test]
fn test_exclusion() {
    let (mut input, recorder) = input(&MatchState::new());

    input.set_text("type !=");
    let suggestion = input.suggestions().remove(0);
    assert_eq!(suggestion.to_string(), "type != type 1");
    input.select(&suggestion).unwrap();

    assert_eq!(recorder.last(), Some(state(r#"{"type":["!type 1"]}"#)));
    assert_eq!(input.chips()[0].to_string(), "type != type 1");
    assert_eq!(input.chips()[0].comparison, Comparison::Exclude);
}

#[test]
fn test_exclusion_not_allowed_for_start() {
    let (mut input, recorder) = input(&MatchState::new());

    input.set_text("start != 2023");
    assert!(input.suggestions().is_empty());
    assert!(matches!(
        input.submit(),
        Err(FilterError::ExclusionNotAllowed { key }) if key == "start"
    ));
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_single_value_replaced() {
    let (mut input, recorder) = input(&MatchState::new());

    input.set_text("start=01/01/2023");
    input.submit().unwrap();
    input.set_text("start=02/02/2023");
    input.submit().unwrap();

    assert_eq!(input.chips().len(), 1);
    assert_eq!(recorder.last(), Some(state(r#"{"start":"02/02/2023"}"#)));
}

#[test]
fn test_submit_errors() {
    let (mut input, _) = input(&MatchState::new());

    input.set_text("nothing=here");
    assert!(matches!(input.submit(), Err(FilterError::UnknownKey { .. })));

    input.set_text("start=");
    assert!(matches!(input.submit(), Err(FilterError::EmptyValue { .. })));
    assert_eq!(input.text(), "start=");
}

#[test]
fn test_restore_multiple() {
    let (input, recorder) = input(&state(r#"{"type":["type 1","type 2"]}"#));

    let chips: Vec<String> = input.chips().iter().map(ToString::to_string).collect();
    assert_eq!(chips, vec!["type = type 1", "type = type 2"]);
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_restore_single_excluded() {
    let initial: MatchState = [("type", MatchValue::from("!type 1"))].into_iter().collect();
    let (input, _) = input(&initial);

    assert_eq!(input.chips().len(), 1);
    assert_eq!(input.chips()[0].to_string(), "type != type 1");
}

#[test]
fn test_restore_follows_matcher_order() {
    let (input, _) = input(&state(
        r#"{"type":["type 3"],"start":"01/01/2023","unknown":"x"}"#,
    ));

    let keys: Vec<&str> = input.chips().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["start", "type"]);
}

#[test]
fn test_restore_keeps_first_value_of_single_matcher() {
    let (input, _) = input(&state(r#"{"start":["01/01/2023","02/02/2023"]}"#));

    assert_eq!(input.chips().len(), 1);
    assert_eq!(input.chips()[0].value, "01/01/2023");
}

#[test]
fn test_clear() {
    let (mut input, recorder) = input(&state(r#"{"type":["type 1"]}"#));
    input.set_text("st");

    input.clear();
    assert_eq!(input.mode(), FilterMode::Idle);
    assert_eq!(recorder.last(), Some(MatchState::new()));
}

#[test]
fn test_abandon_keeps_chips() {
    let (mut input, recorder) = input(&state(r#"{"type":["type 1"]}"#));
    input.set_text("type=ty");

    input.abandon();
    assert_eq!(input.text(), "");
    assert_eq!(input.chips().len(), 1);
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_marked_value_needs_exclusion() {
    let (mut input, recorder) = input(&MatchState::new());

    input.set_text("start=!2023");
    assert!(matches!(
        input.submit(),
        Err(FilterError::ExclusionNotAllowed { key }) if key == "start"
    ));
    assert_eq!(input.text(), "start=!2023");
    assert!(input.chips().is_empty());
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_marked_value_is_not_an_include() {
    let (mut input, recorder) = input(&MatchState::new());

    input.set_text("type = !type 1");
    assert!(input.suggestions().is_empty());
    assert!(matches!(
        input.submit(),
        Err(FilterError::InvalidValue { value, .. }) if value == "!type 1"
    ));
    assert!(input.chips().is_empty());
    assert_eq!(recorder.count(), 0);

    // The supported spelling round-trips through the stored state.
    input.set_text("type != type 1");
    input.submit().unwrap();
    let saved = recorder.last().unwrap();
    let (restored, _) = common::filter::input(&saved);
    assert_eq!(restored.chips(), input.chips());
}

#[test]
fn test_marked_suggestions_are_skipped() {
    let tag = Matcher::string("tag", "filter by tag")
        .exclusion()
        .suggestions(|| vec!["!spam".into(), "spam".into()]);
    let mut input = FilterInput::new(vec![tag]).unwrap();

    input.set_text("tag=spam");
    assert_eq!(labels(&input.suggestions()), vec!["tag = spam"]);
}

#[test]
fn test_state_keys_unique() {
    let result = FilterInput::new(vec![
        Matcher::value("start", "filter by start date").key_value("fromTimestamp"),
        Matcher::value("from", "filter by start date").key_value("fromTimestamp"),
    ]);
    assert!(matches!(
        result,
        Err(FilterError::DuplicateStateKey { key }) if key == "fromTimestamp"
    ));
}

#[test]
fn test_shared_key_prefix() {
    let mut input = FilterInput::new(vec![
        Matcher::string("type", "filter by type")
            .suggestions(|| vec!["trade".into(), "deposit".into()]),
        Matcher::string("types", "filter by type group")
            .multiple()
            .suggestions(|| vec!["spot".into(), "margin".into()]),
    ])
    .unwrap();

    input.set_text("typ");
    assert_eq!(
        labels(&input.suggestions()),
        vec!["type: filter by type", "types: filter by type group"]
    );
    assert_eq!(input.highlighted(), 0);
    input.submit().unwrap();
    assert_eq!(input.text(), "type=");

    input.set_text("TYPE");
    assert_eq!(
        labels(&input.suggestions()),
        vec!["type = trade", "type = deposit"]
    );

    input.set_text("types");
    assert_eq!(
        labels(&input.suggestions()),
        vec!["types = spot", "types = margin"]
    );
}
