//! Resolution of application paths into match stacks.

mod common;

use common::*;
use folio_navigator::*;
use pretty_assertions::assert_eq;

#[test]
fn test_flat_route() {
    let stack = stack_for("/nfts");
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.leaf().unwrap().route.page_id(), Some(Page::Nfts));
}

#[test]
fn test_absolute_child_paths() {
    let stack = stack_for("/defi/deposits/protocols");
    assert_eq!(
        stack.patterns(),
        vec!["/defi", "/defi/deposits", "/defi/deposits/protocols"]
    );
    let pages: Vec<_> = stack
        .entries()
        .iter()
        .map(|e| e.route.page_id())
        .collect();
    assert_eq!(
        pages,
        vec![
            Some(Page::Defi),
            Some(Page::DefiDeposits),
            Some(Page::DefiDepositsProtocols)
        ]
    );
}

#[test]
fn test_index_page_child() {
    let stack = stack_for("/reports");
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.at_depth(1).unwrap().route.page_id(), Some(Page::Reports));

    let stack = stack_for("/reports/12");
    assert_eq!(stack.leaf().unwrap().route.page_id(), Some(Page::Report));
    assert_param_equals(&stack.params(), "id", "12");
}

#[test]
fn test_sibling_backtracking() {
    // /settings/api-keys is declared before /settings and must not swallow
    // the plain settings tabs.
    let stack = stack_for("/settings/general");
    assert_eq!(stack.patterns(), vec!["/settings", "/settings/general"]);

    let stack = stack_for("/settings/api-keys/exchanges");
    assert_eq!(
        stack.patterns(),
        vec!["/settings/api-keys", "/settings/api-keys/exchanges"]
    );
}

#[test]
fn test_exchange_param() {
    let stack = stack_for("/accounts-balances/exchange-balances/kraken");
    assert_eq!(
        stack.patterns(),
        vec![
            "/accounts-balances",
            "/accounts-balances/exchange-balances/:exchange"
        ]
    );
    assert_param_equals(&stack.params(), "exchange", "kraken");
}

#[test]
fn test_rest_param_is_optional() {
    let stack = stack_for("/staking");
    assert!(stack.params().get("location").is_none());

    let stack = stack_for("/staking/eth2");
    assert_param_equals(&stack.params(), "location", "eth2");

    let stack = stack_for("/defi/deposits/liquidity/uniswap/v3");
    assert_param_equals(&stack.params(), "location", "uniswap/v3");
}

#[test]
fn test_unknown_paths() {
    let table = app_route_table(&RouterOptions::default()).unwrap();
    for path in ["/nowhere", "/nfts/extra", "/history/unknown", "/assets"] {
        assert!(
            matches!(table.resolve(path), Resolution::NotFound),
            "{path} should not match"
        );
    }
}

#[test]
fn test_props_from_params_and_query() {
    let table = app_route_table(&RouterOptions::default()).unwrap();

    let resolved = |raw: &str| {
        let location = Location::parse(raw);
        match table.resolve(&location.path) {
            Resolution::Matched(stack) => ResolvedRoute { location, stack },
            other => panic!("{raw}: {other:?}"),
        }
    };

    let route = resolved("/asset-manager/custom?id=ETH");
    let props = route.props_at(1);
    assert_eq!(props.get("identifier"), Some(&Some("ETH".to_string())));

    let route = resolved("/asset-manager/managed");
    assert_eq!(route.props_at(1).get("identifier"), Some(&None));

    let route = resolved("/staking");
    assert_eq!(route.props_at(0).get("location"), Some(&None));

    let route = resolved("/assets/eip155%3A1%2Ferc20%3A0xabc");
    assert_eq!(
        route.props_at(0).get("identifier"),
        Some(&Some("eip155:1/erc20:0xabc".to_string()))
    );

    assert!(resolved("/nfts").props_at(0).is_empty());
}

#[test]
fn test_meta_inherited_down_the_stack() {
    let table = app_route_table(&RouterOptions::default()).unwrap();
    let location = Location::from_path("/price-manager/historic");
    let Resolution::Matched(stack) = table.resolve(&location.path) else {
        panic!("price manager should match");
    };
    let route = ResolvedRoute { location, stack };

    assert!(route.can_navigate_back());
    assert_eq!(route.meta().note_location, Some(NoteLocation::PriceManager));
    assert_eq!(route.name(), Some("price-manager-historic"));
}

#[test]
fn test_child_meta_overrides_parent() {
    let table = app_route_table(&RouterOptions::default()).unwrap();
    let location = Location::from_path("/settings/accounting");
    let Resolution::Matched(stack) = table.resolve(&location.path) else {
        panic!("settings should match");
    };
    let route = ResolvedRoute { location, stack };
    assert_eq!(route.meta().note_location, Some(NoteLocation::SettingsAccounting));
    assert!(route.can_navigate_back());

    let location = Location::from_path("/settings/general");
    let Resolution::Matched(stack) = table.resolve(&location.path) else {
        panic!("settings should match");
    };
    let route = ResolvedRoute { location, stack };
    assert!(!route.can_navigate_back());
}

#[test]
fn test_auth_layout() {
    let table = app_route_table(&RouterOptions::default()).unwrap();
    for path in [Routes::USER_LOGIN, Routes::USER_CREATE] {
        let location = Location::from_path(path);
        let Resolution::Matched(stack) = table.resolve(path) else {
            panic!("{path} should match");
        };
        let route = ResolvedRoute { location, stack };
        assert_eq!(route.meta().layout, Some(Layout::Auth));
    }
}

#[test]
fn test_named_urls() {
    let table = app_route_table(&RouterOptions::default()).unwrap();
    assert_eq!(
        table.url_for("trades", &RouteParams::new()).unwrap(),
        Routes::HISTORY_TRADES
    );
    assert_eq!(
        table.url_for("accounts-balances", &RouteParams::new()).unwrap(),
        Routes::ACCOUNTS_BALANCES
    );
    assert!(table.url_for("playground", &RouteParams::new()).is_err());
}

#[test]
fn test_table_listing() {
    let table = app_route_table(&RouterOptions::default()).unwrap();
    let entries = table.entries();

    let first: Vec<&str> = entries.iter().take(4).map(|e| e.pattern.as_str()).collect();
    assert_eq!(first, vec!["/user", "/user/login", "/user/create", "/"]);

    let cex = entries
        .iter()
        .find(|e| e.pattern == Routes::ASSET_MANAGER_CEX_MAPPING)
        .unwrap();
    assert_eq!(cex.depth, 2);
    assert_eq!(cex.page, Some(Page::AssetManagerCexMapping));

    // Every page route maps to a distinct page source module, except the
    // exchange tab that is reused for its `:exchange` variant.
    let mut sources: Vec<&str> = entries
        .iter()
        .filter_map(|e| e.page)
        .map(Page::source)
        .collect();
    let total = sources.len();
    sources.sort_unstable();
    sources.dedup();
    assert_eq!(sources.len(), total - 1);
}
