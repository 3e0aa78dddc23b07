//! Statically known pages and their lazy factories.
//!
//! Routes never hold page instances. They name a [`Page`], and a
//! [`PageRegistry`] turns that name plus its [`PageProps`] into whatever the
//! host UI renders, only when a navigation actually needs it. With the
//! `cache` feature, built pages are kept in an LRU keyed by page and props.

use crate::debug_log;
use crate::error::NavigationError;
use crate::resolve::ResolvedRoute;
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "cache")]
use crate::trace_log;
#[cfg(feature = "cache")]
use lru::LruCache;
#[cfg(feature = "cache")]
use std::num::NonZeroUsize;

/// Every page the application can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Page {
    Login,
    CreateAccount,
    Dashboard,
    Balances,
    BalancesBlockchain,
    BalancesExchange,
    BalancesNonFungible,
    BalancesManual,
    Nfts,
    History,
    HistoryTrades,
    HistoryDepositsWithdrawals,
    HistoryEvents,
    Defi,
    DefiOverview,
    DefiDeposits,
    DefiDepositsProtocols,
    DefiDepositsLiquidity,
    DefiLiabilities,
    DefiAirdrops,
    Statistics,
    Staking,
    ReportsWrapper,
    Reports,
    Report,
    AssetManager,
    AssetManagerManaged,
    AssetManagerCustom,
    AssetManagerMore,
    AssetManagerNewlyDetected,
    AssetManagerCexMapping,
    PriceManager,
    PriceManagerLatest,
    PriceManagerHistoric,
    AddressBookManager,
    ApiKeys,
    ApiKeysPremium,
    ApiKeysExchanges,
    ApiKeysExternalServices,
    Import,
    Settings,
    SettingsGeneral,
    SettingsAccounting,
    SettingsDataSecurity,
    SettingsModules,
    Asset,
    Location,
    Calendar,
    Playground,
}

impl Page {
    /// Module the page is loaded from, used as a stable lookup key by hosts
    /// that load pages by name.
    pub fn source(self) -> &'static str {
        match self {
            Page::Login => "pages/user/login/index",
            Page::CreateAccount => "pages/user/create/index",
            Page::Dashboard => "pages/dashboard/index",
            Page::Balances => "pages/balances/index",
            Page::BalancesBlockchain => "pages/balances/blockchain/index",
            Page::BalancesExchange => "pages/balances/exchange/index",
            Page::BalancesNonFungible => "pages/balances/non-fungible/index",
            Page::BalancesManual => "pages/balances/manual/index",
            Page::Nfts => "pages/nfts/index",
            Page::History => "pages/history/index",
            Page::HistoryTrades => "pages/history/trades/index",
            Page::HistoryDepositsWithdrawals => "pages/history/deposits-withdrawals/index",
            Page::HistoryEvents => "pages/history/transactions/index",
            Page::Defi => "pages/defi/index",
            Page::DefiOverview => "pages/defi/overview/index",
            Page::DefiDeposits => "pages/defi/deposits/index",
            Page::DefiDepositsProtocols => "pages/defi/deposits/protocols/index",
            Page::DefiDepositsLiquidity => "pages/defi/deposits/liquidity/index",
            Page::DefiLiabilities => "pages/defi/liabilities/index",
            Page::DefiAirdrops => "pages/defi/airdrops/index",
            Page::Statistics => "pages/statistics/index",
            Page::Staking => "pages/staking/index",
            Page::ReportsWrapper => "pages/reports/wrapper",
            Page::Reports => "pages/reports/index",
            Page::Report => "pages/reports/[id]",
            Page::AssetManager => "pages/asset-manager/index",
            Page::AssetManagerManaged => "pages/asset-manager/managed/index",
            Page::AssetManagerCustom => "pages/asset-manager/custom/index",
            Page::AssetManagerMore => "pages/asset-manager/more/index",
            Page::AssetManagerNewlyDetected => "pages/asset-manager/newly-detected/index",
            Page::AssetManagerCexMapping => "pages/asset-manager/cex-mapping/index",
            Page::PriceManager => "pages/price-manager/index",
            Page::PriceManagerLatest => "pages/price-manager/latest/index",
            Page::PriceManagerHistoric => "pages/price-manager/historic/index",
            Page::AddressBookManager => "pages/address-book-manager/index",
            Page::ApiKeys => "pages/settings/api-keys/index",
            Page::ApiKeysPremium => "pages/settings/api-keys/premium/index",
            Page::ApiKeysExchanges => "pages/settings/api-keys/exchanges/index",
            Page::ApiKeysExternalServices => "pages/settings/api-keys/external/index",
            Page::Import => "pages/import/index",
            Page::Settings => "pages/settings/index",
            Page::SettingsGeneral => "pages/settings/general/index",
            Page::SettingsAccounting => "pages/settings/accounting/index",
            Page::SettingsDataSecurity => "pages/settings/data-security/index",
            Page::SettingsModules => "pages/settings/modules/index",
            Page::Asset => "pages/assets/[identifier]",
            Page::Location => "pages/locations/[identifier]",
            Page::Calendar => "pages/calendar/index",
            Page::Playground => "pages/playground/index",
        }
    }
}

/// Props handed to a page factory. A `None` value is an explicit null.
pub type PageProps = BTreeMap<String, Option<String>>;

/// Factory building a page instance from its props.
pub type PageFactory<V> = Box<dyn Fn(&PageProps) -> V + Send + Sync>;

/// Default number of built pages kept by the cache.
#[cfg(feature = "cache")]
const DEFAULT_PAGE_CAPACITY: usize = 32;

/// Registry of lazily invoked page factories.
///
/// ```
/// use folio_navigator::{Page, PageProps, PageRegistry};
///
/// let mut pages = PageRegistry::new()
///     .page(Page::Dashboard, |_props| "dashboard".to_string());
///
/// let view = pages.load(Page::Dashboard, &PageProps::new()).unwrap();
/// assert_eq!(view, "dashboard");
/// ```
pub struct PageRegistry<V> {
    factories: HashMap<Page, PageFactory<V>>,
    #[cfg(feature = "cache")]
    built: LruCache<(Page, PageProps), V>,
}

impl<V: Clone> PageRegistry<V> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            #[cfg(feature = "cache")]
            built: LruCache::new(
                NonZeroUsize::new(DEFAULT_PAGE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            ),
        }
    }

    /// Keep at most `capacity` built pages.
    #[cfg(feature = "cache")]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            factories: HashMap::new(),
            built: LruCache::new(capacity),
        }
    }

    /// Register the factory for `page`, replacing any previous one.
    pub fn page<F>(mut self, page: Page, factory: F) -> Self
    where
        F: Fn(&PageProps) -> V + Send + Sync + 'static,
    {
        self.register(page, factory);
        self
    }

    pub fn register<F>(&mut self, page: Page, factory: F)
    where
        F: Fn(&PageProps) -> V + Send + Sync + 'static,
    {
        self.factories.insert(page, Box::new(factory));
        #[cfg(feature = "cache")]
        self.built.clear();
    }

    pub fn is_registered(&self, page: Page) -> bool {
        self.factories.contains_key(&page)
    }

    /// Build `page` with `props`, invoking its factory on first use.
    pub fn load(&mut self, page: Page, props: &PageProps) -> Result<V, NavigationError> {
        #[cfg(feature = "cache")]
        if let Some(view) = self.built.get(&(page, props.clone())) {
            trace_log!("Page {:?} served from cache", page);
            return Ok(view.clone());
        }

        let factory = self
            .factories
            .get(&page)
            .ok_or(NavigationError::PageNotRegistered { page })?;
        debug_log!("Loading page {:?} ({})", page, page.source());
        let view = factory(props);

        #[cfg(feature = "cache")]
        self.built.put((page, props.clone()), view.clone());

        Ok(view)
    }

    /// Build every page along a resolved route, outermost first.
    pub fn load_route(&mut self, route: &ResolvedRoute) -> Result<Vec<V>, NavigationError> {
        route
            .stack
            .entries()
            .iter()
            .enumerate()
            .filter_map(|(depth, entry)| {
                entry.route.page_id().map(|page| (page, route.props_at(depth)))
            })
            .map(|(page, props)| self.load(page, &props))
            .collect()
    }
}

impl<V: Clone> Default for PageRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_factory_is_lazy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut pages = PageRegistry::new().page(Page::Nfts, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            "nfts"
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(pages.load(Page::Nfts, &PageProps::new()).unwrap(), "nfts");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_built_pages_are_cached_per_props() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut pages = PageRegistry::new().page(Page::Asset, move |props: &PageProps| {
            counter.fetch_add(1, Ordering::SeqCst);
            props.get("identifier").cloned().flatten()
        });

        let mut eth = PageProps::new();
        eth.insert("identifier".into(), Some("ETH".into()));
        let mut btc = PageProps::new();
        btc.insert("identifier".into(), Some("BTC".into()));

        pages.load(Page::Asset, &eth).unwrap();
        pages.load(Page::Asset, &eth).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(pages.load(Page::Asset, &btc).unwrap(), Some("BTC".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_missing_factory() {
        let mut pages: PageRegistry<()> = PageRegistry::new();
        let err = pages.load(Page::Import, &PageProps::new()).unwrap_err();
        assert_eq!(err, NavigationError::PageNotRegistered { page: Page::Import });
    }
}
