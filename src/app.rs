//! The portfolio tracker's route table.
//!
//! Path strings are part of the public surface: bookmarks and links from
//! outside the app depend on them, so they must not change.

use crate::error::RouteTableError;
use crate::guards::SessionGuard;
use crate::pages::Page;
use crate::route::{Layout, NoteLocation, PropsMode, Route};
use crate::router::{Router, RouterOptions};
use crate::table::RouteTable;

/// Path constants.
pub struct Routes;

impl Routes {
    pub const ROOT: &'static str = "/";
    pub const USER: &'static str = "/user";
    pub const USER_LOGIN: &'static str = "/user/login";
    pub const USER_CREATE: &'static str = "/user/create";
    pub const DASHBOARD: &'static str = "/dashboard";
    pub const ACCOUNTS_BALANCES: &'static str = "/accounts-balances";
    pub const ACCOUNTS_BALANCES_BLOCKCHAIN: &'static str = "/accounts-balances/blockchain-balances";
    pub const ACCOUNTS_BALANCES_EXCHANGE: &'static str = "/accounts-balances/exchange-balances";
    pub const ACCOUNTS_BALANCES_NON_FUNGIBLE: &'static str = "/accounts-balances/non-fungible";
    pub const ACCOUNTS_BALANCES_MANUAL: &'static str = "/accounts-balances/manual-balances";
    pub const NFTS: &'static str = "/nfts";
    pub const HISTORY: &'static str = "/history";
    pub const HISTORY_TRADES: &'static str = "/history/trades";
    pub const HISTORY_DEPOSITS_WITHDRAWALS: &'static str = "/history/deposits-withdrawals";
    pub const HISTORY_EVENTS: &'static str = "/history/history-events";
    pub const DEFI: &'static str = "/defi";
    pub const DEFI_OVERVIEW: &'static str = "/defi/overview";
    pub const DEFI_DEPOSITS: &'static str = "/defi/deposits";
    pub const DEFI_DEPOSITS_PROTOCOLS: &'static str = "/defi/deposits/protocols";
    pub const DEFI_DEPOSITS_LIQUIDITY: &'static str = "/defi/deposits/liquidity/:location*";
    pub const DEFI_LIABILITIES: &'static str = "/defi/liabilities";
    pub const DEFI_AIRDROPS: &'static str = "/defi/airdrops";
    pub const STATISTICS: &'static str = "/statistics";
    pub const STAKING: &'static str = "/staking/:location*";
    pub const PROFIT_LOSS_REPORTS: &'static str = "/reports";
    pub const PROFIT_LOSS_REPORT: &'static str = "/reports/:id";
    pub const ASSET_MANAGER: &'static str = "/asset-manager";
    pub const ASSET_MANAGER_MANAGED: &'static str = "/asset-manager/managed";
    pub const ASSET_MANAGER_CUSTOM: &'static str = "/asset-manager/custom";
    pub const ASSET_MANAGER_MORE: &'static str = "/asset-manager/more";
    pub const ASSET_MANAGER_NEWLY_DETECTED: &'static str = "/asset-manager/more/newly-detected";
    pub const ASSET_MANAGER_CEX_MAPPING: &'static str = "/asset-manager/more/cex-mapping";
    pub const PRICE_MANAGER: &'static str = "/price-manager";
    pub const PRICE_MANAGER_LATEST: &'static str = "/price-manager/latest";
    pub const PRICE_MANAGER_HISTORIC: &'static str = "/price-manager/historic";
    pub const ADDRESS_BOOK_MANAGER: &'static str = "/address-book-manager";
    pub const API_KEYS: &'static str = "/settings/api-keys";
    pub const API_KEYS_ROTKI_PREMIUM: &'static str = "/settings/api-keys/rotki-premium";
    pub const API_KEYS_EXCHANGES: &'static str = "/settings/api-keys/exchanges";
    pub const API_KEYS_EXTERNAL_SERVICES: &'static str = "/settings/api-keys/external-services";
    pub const IMPORT: &'static str = "/import";
    pub const SETTINGS: &'static str = "/settings";
    pub const SETTINGS_GENERAL: &'static str = "/settings/general";
    pub const SETTINGS_ACCOUNTING: &'static str = "/settings/accounting";
    pub const SETTINGS_DATA_SECURITY: &'static str = "/settings/data-security";
    pub const SETTINGS_MODULES: &'static str = "/settings/modules";
    pub const ASSETS: &'static str = "/assets/:identifier";
    pub const LOCATIONS: &'static str = "/locations/:identifier";
    pub const CALENDAR: &'static str = "/calendar";
    pub const PLAYGROUND: &'static str = "/playground";
}

/// Every route of the application, in matching order.
pub fn app_routes(options: &RouterOptions) -> Vec<Route> {
    let mut routes = vec![
        Route::redirect(Routes::USER, Routes::USER_LOGIN),
        Route::page(Routes::USER_LOGIN, Page::Login)
            .layout(Layout::Auth),
        Route::page(Routes::USER_CREATE, Page::CreateAccount)
            .layout(Layout::Auth),
        Route::redirect(Routes::ROOT, Routes::USER_LOGIN),
        Route::page(Routes::DASHBOARD, Page::Dashboard)
            .name("dashboard")
            .note(NoteLocation::Dashboard),
        accounts_balances(),
        Route::page(Routes::NFTS, Page::Nfts)
            .name("nfts")
            .note(NoteLocation::Nfts),
        history(),
        defi(),
        Route::page(Routes::STATISTICS, Page::Statistics)
            .name("statistics")
            .note(NoteLocation::Statistics),
        Route::page(Routes::STAKING, Page::Staking)
            .note(NoteLocation::Staking)
            .props(PropsMode::param("location", "location")),
        reports(),
        asset_manager(),
        price_manager(),
        Route::page(Routes::ADDRESS_BOOK_MANAGER, Page::AddressBookManager)
            .note(NoteLocation::AddressBookManager),
        api_keys(),
        Route::page(Routes::IMPORT, Page::Import)
            .name("import")
            .note(NoteLocation::Import),
        settings(),
        Route::page(Routes::ASSETS, Page::Asset)
            .can_navigate_back()
            .note(NoteLocation::Assets)
            .props(PropsMode::Params),
        Route::page(Routes::LOCATIONS, Page::Location)
            .can_navigate_back()
            .note(NoteLocation::Locations)
            .props(PropsMode::Params),
        Route::page(Routes::CALENDAR, Page::Calendar)
            .can_navigate_back()
            .note(NoteLocation::Calendar)
            .props(PropsMode::Params),
    ];

    if options.development {
        routes.push(Route::page(Routes::PLAYGROUND, Page::Playground).name("playground"));
    }
    routes
}

fn accounts_balances() -> Route {
    Route::page(Routes::ACCOUNTS_BALANCES, Page::Balances).children(vec![
        Route::redirect("", Routes::ACCOUNTS_BALANCES_BLOCKCHAIN)
            .name("accounts-balances"),
        Route::page(Routes::ACCOUNTS_BALANCES_BLOCKCHAIN, Page::BalancesBlockchain)
            .name("accounts-balances-blockchain")
            .note(NoteLocation::AccountsBalancesBlockchain),
        Route::page(Routes::ACCOUNTS_BALANCES_EXCHANGE, Page::BalancesExchange)
            .name("accounts-balances-exchange")
            .note(NoteLocation::AccountsBalancesExchange),
        Route::page(
            format!("{}/:exchange", Routes::ACCOUNTS_BALANCES_EXCHANGE),
            Page::BalancesExchange,
        )
        .note(NoteLocation::AccountsBalancesExchange)
        .props(PropsMode::Params),
        Route::page(Routes::ACCOUNTS_BALANCES_NON_FUNGIBLE, Page::BalancesNonFungible)
            .name("accounts-balances-non-fungible")
            .note(NoteLocation::AccountsBalancesNonFungible),
        Route::page(Routes::ACCOUNTS_BALANCES_MANUAL, Page::BalancesManual)
            .name("accounts-balances-manual")
            .note(NoteLocation::AccountsBalancesManual),
    ])
}

fn history() -> Route {
    Route::page(Routes::HISTORY, Page::History).children(vec![
        Route::redirect("", Routes::HISTORY_TRADES).name("history"),
        Route::page(Routes::HISTORY_TRADES, Page::HistoryTrades)
            .name("trades")
            .note(NoteLocation::HistoryTrades),
        Route::page(Routes::HISTORY_DEPOSITS_WITHDRAWALS, Page::HistoryDepositsWithdrawals)
            .name("deposits-withdrawals")
            .note(NoteLocation::HistoryDepositsWithdrawals),
        Route::page(Routes::HISTORY_EVENTS, Page::HistoryEvents)
            .name("history-events")
            .note(NoteLocation::HistoryEvents),
    ])
}

fn defi() -> Route {
    Route::page(Routes::DEFI, Page::Defi)
        .note(NoteLocation::Defi)
        .children(vec![
            Route::redirect("", Routes::DEFI_OVERVIEW).name("defi"),
            Route::page(Routes::DEFI_OVERVIEW, Page::DefiOverview)
                .name("defi-overview"),
            Route::page(Routes::DEFI_DEPOSITS, Page::DefiDeposits).children(vec![
                Route::redirect("", Routes::DEFI_DEPOSITS_PROTOCOLS)
                    .name("defi-deposits"),
                Route::page(Routes::DEFI_DEPOSITS_PROTOCOLS, Page::DefiDepositsProtocols)
                    .name("defi-deposits-protocols"),
                Route::page(Routes::DEFI_DEPOSITS_LIQUIDITY, Page::DefiDepositsLiquidity)
                    .props(PropsMode::param("location", "location")),
            ]),
            Route::page(Routes::DEFI_LIABILITIES, Page::DefiLiabilities)
                .name("defi-liabilities"),
            Route::page(Routes::DEFI_AIRDROPS, Page::DefiAirdrops),
        ])
}

fn reports() -> Route {
    Route::page(Routes::PROFIT_LOSS_REPORTS, Page::ReportsWrapper).children(vec![
        Route::page("", Page::Reports)
            .note(NoteLocation::ProfitLossReports),
        Route::page(Routes::PROFIT_LOSS_REPORT, Page::Report)
            .can_navigate_back()
            .note(NoteLocation::ProfitLossReports),
    ])
}

fn asset_manager() -> Route {
    Route::page(Routes::ASSET_MANAGER, Page::AssetManager)
        .note(NoteLocation::Assets)
        .children(vec![
            Route::redirect("", Routes::ASSET_MANAGER_MANAGED)
                .name("asset-manager"),
            Route::page(Routes::ASSET_MANAGER_MANAGED, Page::AssetManagerManaged)
                .name("asset-manager-managed")
                .props(PropsMode::query("identifier", "id")),
            Route::page(Routes::ASSET_MANAGER_CUSTOM, Page::AssetManagerCustom)
                .name("asset-manager-custom")
                .props(PropsMode::query("identifier", "id")),
            Route::page(Routes::ASSET_MANAGER_MORE, Page::AssetManagerMore).children(vec![
                Route::redirect("", Routes::ASSET_MANAGER_CEX_MAPPING)
                    .name("asset-manager-more"),
                Route::page(Routes::ASSET_MANAGER_NEWLY_DETECTED, Page::AssetManagerNewlyDetected)
                    .name("asset-manager-newly-detected"),
                Route::page(Routes::ASSET_MANAGER_CEX_MAPPING, Page::AssetManagerCexMapping)
                    .name("asset-manager-cex-mapping"),
            ]),
        ])
}

fn price_manager() -> Route {
    Route::page(Routes::PRICE_MANAGER, Page::PriceManager)
        .can_navigate_back()
        .note(NoteLocation::PriceManager)
        .props(PropsMode::Params)
        .children(vec![
            Route::redirect("", Routes::PRICE_MANAGER_LATEST)
                .name("price-manager"),
            Route::page(Routes::PRICE_MANAGER_LATEST, Page::PriceManagerLatest)
                .name("price-manager-current"),
            Route::page(Routes::PRICE_MANAGER_HISTORIC, Page::PriceManagerHistoric)
                .name("price-manager-historic"),
        ])
}

fn api_keys() -> Route {
    Route::page(Routes::API_KEYS, Page::ApiKeys)
        .note(NoteLocation::ApiKeys)
        .children(vec![
            Route::redirect("", Routes::API_KEYS_ROTKI_PREMIUM),
            Route::page(Routes::API_KEYS_ROTKI_PREMIUM, Page::ApiKeysPremium),
            Route::page(Routes::API_KEYS_EXCHANGES, Page::ApiKeysExchanges),
            Route::page(Routes::API_KEYS_EXTERNAL_SERVICES, Page::ApiKeysExternalServices),
        ])
}

fn settings() -> Route {
    Route::page(Routes::SETTINGS, Page::Settings).children(vec![
        Route::redirect("", Routes::SETTINGS_GENERAL),
        Route::page(Routes::SETTINGS_GENERAL, Page::SettingsGeneral)
            .note(NoteLocation::SettingsGeneral),
        Route::page(Routes::SETTINGS_ACCOUNTING, Page::SettingsAccounting)
            .can_navigate_back()
            .note(NoteLocation::SettingsAccounting),
        Route::page(Routes::SETTINGS_DATA_SECURITY, Page::SettingsDataSecurity)
            .note(NoteLocation::SettingsDataSecurity),
        Route::page(Routes::SETTINGS_MODULES, Page::SettingsModules)
            .note(NoteLocation::SettingsModules),
    ])
}

/// The validated application table.
pub fn app_route_table(options: &RouterOptions) -> Result<RouteTable, RouteTableError> {
    RouteTable::new(app_routes(options))
}

/// Router over the application table with the [`SessionGuard`] installed.
pub fn app_router(options: &RouterOptions) -> Result<Router, RouteTableError> {
    let table = app_route_table(options)?;
    Ok(Router::new(table, options.clone()).guard(SessionGuard::default()))
}
