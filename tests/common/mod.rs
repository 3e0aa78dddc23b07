//! Shared fixtures for integration tests.

#![allow(dead_code)]

use folio_navigator::*;
use std::sync::{Arc, Mutex, Once};

static LOGGER: Once = Once::new();

/// Route crate diagnostics to the test output. Set `RUST_LOG` to see them.
pub fn init_logging() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Application router with the session guard, logged in or out.
pub fn router(logged: bool) -> Router {
    init_logging();
    let mut router = app_router(&RouterOptions::default()).expect("app table is valid");
    router.set_session(SessionAuth::new(logged));
    router
}

/// Every top-level literal path outside the user section.
pub fn app_paths_outside_user_section() -> Vec<&'static str> {
    vec![
        Routes::ROOT,
        Routes::DASHBOARD,
        Routes::ACCOUNTS_BALANCES_BLOCKCHAIN,
        Routes::NFTS,
        Routes::HISTORY_TRADES,
        Routes::DEFI_OVERVIEW,
        Routes::STATISTICS,
        "/staking/eth2",
        Routes::PROFIT_LOSS_REPORTS,
        Routes::ASSET_MANAGER_CUSTOM,
        Routes::PRICE_MANAGER_HISTORIC,
        Routes::ADDRESS_BOOK_MANAGER,
        Routes::API_KEYS_EXCHANGES,
        Routes::IMPORT,
        Routes::SETTINGS_MODULES,
        "/assets/ETH",
        "/locations/kraken",
        Routes::CALENDAR,
    ]
}

/// Resolve `path` on the application table and return the match stack.
pub fn stack_for(path: &str) -> MatchStack {
    let table = app_route_table(&RouterOptions::default()).expect("app table is valid");
    match table.resolve(path) {
        Resolution::Matched(stack) => stack,
        other => panic!("expected '{path}' to match, got {other:?}"),
    }
}

pub fn assert_param_equals(params: &RouteParams, key: &str, expected: &str) {
    assert_eq!(
        params.get(key),
        Some(expected),
        "parameter '{}' has wrong value",
        key
    );
}

#[cfg(feature = "filter")]
pub mod filter {
    use super::*;
    use folio_navigator::filter::{FilterInput, MatchState, Matcher};

    /// The two matchers used by the filter widget tests.
    pub fn matchers() -> Vec<Matcher> {
        vec![
            Matcher::string("start", "filter by start date"),
            Matcher::string("type", "filter by type")
                .exclusion()
                .multiple()
                .suggestions(|| vec!["type 1".into(), "type 2".into(), "type 3".into()]),
        ]
    }

    /// Collects every emitted match state.
    #[derive(Clone, Default)]
    pub struct Recorder {
        states: Arc<Mutex<Vec<MatchState>>>,
    }

    impl Recorder {
        pub fn attach(&self, input: &mut FilterInput) {
            let states = Arc::clone(&self.states);
            input.on_update(move |state| states.lock().unwrap().push(state.clone()));
        }

        pub fn last(&self) -> Option<MatchState> {
            self.states.lock().unwrap().last().cloned()
        }

        pub fn count(&self) -> usize {
            self.states.lock().unwrap().len()
        }
    }

    /// Input over [`matchers`] with a recorder attached.
    pub fn input(initial: &MatchState) -> (FilterInput, Recorder) {
        init_logging();
        let recorder = Recorder::default();
        let mut input = FilterInput::new(matchers())
            .expect("matcher keys are unique")
            .with_matches(initial);
        recorder.attach(&mut input);
        (input, recorder)
    }
}
