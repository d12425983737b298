// The projects section of the page: fetch, fall back to cache, render
use folio_cache::CacheBackend;
use tracing::{info, warn};

use crate::{
    fetcher::RepositoryFetcher,
    models::RepositorySummary,
    store::RepositoryStore,
    view::{self, ProjectsDisplay, SortCriterion},
};

/// Where the listing feature is for this page lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingState {
    Idle,
    Loading,
    Loaded,
    /// Fetch failed and nothing was cached
    LoadFailedNoCache,
    /// Fetch failed, the cached listing is shown instead
    LoadFailedWithCache,
}

impl ListingState {
    /// True once the page will not change state again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ListingState::Loaded
                | ListingState::LoadFailedNoCache
                | ListingState::LoadFailedWithCache
        )
    }
}

/// Drives the projects section.
///
/// `load` runs once per page. Sorting and searching afterwards only read
/// the operative listing and never fetch.
pub struct ProjectsPage<F, B, D>
where
    F: RepositoryFetcher,
    B: CacheBackend,
    D: ProjectsDisplay,
{
    fetcher: F,
    store: RepositoryStore<B>,
    display: D,
    state: ListingState,
    sort: SortCriterion,
}

impl<F, B, D> ProjectsPage<F, B, D>
where
    F: RepositoryFetcher,
    B: CacheBackend,
    D: ProjectsDisplay,
{
    /// The store is primed from its backend here, before any fetch
    pub fn new(fetcher: F, backend: B, display: D) -> Self {
        Self {
            fetcher,
            store: RepositoryStore::open(backend),
            display,
            state: ListingState::Idle,
            sort: SortCriterion::default(),
        }
    }

    pub fn state(&self) -> ListingState {
        self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }

    pub fn store(&self) -> &RepositoryStore<B> {
        &self.store
    }

    pub fn active_sort(&self) -> SortCriterion {
        self.sort
    }

    /// The listing sort and search work from
    pub fn repositories(&self) -> &[RepositorySummary] {
        match self.state {
            ListingState::LoadFailedNoCache | ListingState::Idle | ListingState::Loading => &[],
            _ => self.store.current().as_slice(),
        }
    }

    /// Fetch the listing for `owner` and render it, or whatever the cache
    /// held when the page opened.
    ///
    /// Only the first call does anything; later calls return the state
    /// already reached.
    pub async fn load(&mut self, owner: &str) -> ListingState {
        if self.state != ListingState::Idle {
            return self.state;
        }

        self.transition(ListingState::Loading);
        self.display.set_loading_visible(true);

        match self.fetcher.fetch_repositories(owner).await {
            Ok(list) => {
                self.store.replace(list);
                view::render(&mut self.display, self.store.current().as_slice());
                self.display.set_loading_visible(false);
                self.transition(ListingState::Loaded);
            }
            Err(e) => {
                warn!("Fetching repositories failed ({}): {}", e.reason(), e);

                if self.store.current().is_empty() {
                    self.display.replace_contents(String::new());
                    self.display.set_loading_visible(false);
                    self.display.set_error_visible(true);
                    self.transition(ListingState::LoadFailedNoCache);
                } else {
                    info!(
                        "Showing {} cached repositories instead",
                        self.store.current().len()
                    );
                    view::render(&mut self.display, self.store.current().as_slice());
                    self.display.set_loading_visible(false);
                    self.transition(ListingState::LoadFailedWithCache);
                }
            }
        }

        self.state
    }

    /// Re-render the operative listing in `criterion` order
    pub fn sort(&mut self, criterion: SortCriterion) {
        self.sort = criterion;
        self.display.set_active_sort(criterion);

        let sorted = view::sorted_by(self.repositories(), criterion);
        view::render(&mut self.display, &sorted);
    }

    /// Re-render the entries of the operative listing matching `query`,
    /// in the active sort order
    pub fn search(&mut self, query: &str) {
        let filtered = view::filtered_by(self.repositories(), query);
        let sorted = view::sorted_by(&filtered, self.sort);
        view::render(&mut self.display, &sorted);
    }

    fn transition(&mut self, next: ListingState) {
        info!("Listing state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::MockRepositoryFetcher;
    use crate::models::fixtures::{list, summary};
    use crate::models::RepositoryList;
    use crate::store::CACHE_KEY;
    use crate::view::HtmlRegion;
    use crate::Error;
    use folio_cache::MemoryCache;

    fn failing_fetcher() -> MockRepositoryFetcher {
        let mut fetcher = MockRepositoryFetcher::new();
        fetcher
            .expect_fetch_repositories()
            .times(1)
            .returning(|_| Err(Error::Upstream { status: 403 }));
        fetcher
    }

    fn fetcher_returning(listing: RepositoryList) -> MockRepositoryFetcher {
        let mut fetcher = MockRepositoryFetcher::new();
        fetcher
            .expect_fetch_repositories()
            .withf(|owner| owner == "someone")
            .times(1)
            .returning(move |_| Ok(listing.clone()));
        fetcher
    }

    fn seeded_cache(listing: &RepositoryList) -> MemoryCache {
        MemoryCache::with_entry(CACHE_KEY, &serde_json::to_string(listing).unwrap())
    }

    #[tokio::test]
    async fn test_successful_fetch_loads_and_persists() {
        let listing = list(vec![summary("c", 9, 1), summary("b", 2, 2)]);
        let cached = list(vec![summary("stale", 1, 1)]);

        let mut page = ProjectsPage::new(
            fetcher_returning(listing.clone()),
            seeded_cache(&cached),
            HtmlRegion::new(),
        );
        assert_eq!(page.state(), ListingState::Idle);

        let state = page.load("someone").await;

        assert_eq!(state, ListingState::Loaded);
        assert!(state.is_terminal());
        assert_eq!(page.store().load(), Some(listing));

        let region = page.display();
        assert_eq!(region.card_count(), 2);
        assert!(!region.contents.contains("stale"));
        assert!(!region.loading_visible);
        assert!(!region.error_visible);
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_cache() {
        let cached = list(vec![summary("x", 1, 1)]);
        let mut page = ProjectsPage::new(failing_fetcher(), seeded_cache(&cached), HtmlRegion::new());

        let state = page.load("someone").await;

        assert_eq!(state, ListingState::LoadFailedWithCache);
        let region = page.display();
        assert_eq!(region.card_count(), 1);
        assert!(region.contents.contains("<h3>x</h3>"));
        assert!(!region.loading_visible);
        assert!(!region.error_visible);
        assert_eq!(page.repositories(), cached.as_slice());
    }

    #[tokio::test]
    async fn test_failed_fetch_without_cache_shows_error() {
        let mut page = ProjectsPage::new(failing_fetcher(), MemoryCache::new(), HtmlRegion::new());

        let state = page.load("someone").await;

        assert_eq!(state, ListingState::LoadFailedNoCache);
        let region = page.display();
        assert_eq!(region.card_count(), 0);
        assert!(region.contents.is_empty());
        assert!(!region.loading_visible);
        assert!(region.error_visible);
    }

    #[tokio::test]
    async fn test_corrupt_cache_counts_as_no_cache() {
        let mut fetcher = MockRepositoryFetcher::new();
        fetcher
            .expect_fetch_repositories()
            .returning(|_| Err(Error::TransportOrDecode("connection reset".into())));

        let mut page = ProjectsPage::new(
            fetcher,
            MemoryCache::with_entry(CACHE_KEY, "not json"),
            HtmlRegion::new(),
        );

        assert_eq!(page.load("someone").await, ListingState::LoadFailedNoCache);
        assert!(page.display().error_visible);
    }

    #[tokio::test]
    async fn test_load_runs_once() {
        let listing = list(vec![summary("a", 1, 1)]);
        let mut page = ProjectsPage::new(fetcher_returning(listing), MemoryCache::new(), HtmlRegion::new());

        assert_eq!(page.load("someone").await, ListingState::Loaded);
        // The mock expects exactly one call
        assert_eq!(page.load("someone").await, ListingState::Loaded);
    }

    #[tokio::test]
    async fn test_sort_and_search_keep_state_and_canonical_list() {
        let mut go = summary("Foo", 1, 20);
        go.language = Some("Go".to_string());
        let mut rust = summary("Bar", 5, 2);
        rust.language = Some("Rust".to_string());
        let listing = list(vec![rust, go]);

        let mut page = ProjectsPage::new(
            fetcher_returning(listing.clone()),
            MemoryCache::new(),
            HtmlRegion::new(),
        );
        page.load("someone").await;

        page.sort(SortCriterion::Recency);
        let contents = &page.display().contents;
        assert!(contents.find("Foo").unwrap() < contents.find("Bar").unwrap());
        assert_eq!(page.display().active_sort, SortCriterion::Recency);
        assert_eq!(page.active_sort(), SortCriterion::Recency);

        page.search("go");
        assert_eq!(page.display().card_count(), 1);
        assert!(page.display().contents.contains("<h3>Foo</h3>"));

        page.search("");
        assert_eq!(page.display().card_count(), 2);

        assert_eq!(page.state(), ListingState::Loaded);
        assert_eq!(page.store().current(), &listing);
    }

    #[tokio::test]
    async fn test_search_keeps_active_sort() {
        let mut old = summary("go-old", 9, 1);
        old.language = Some("Go".to_string());
        let mut new = summary("go-new", 1, 20);
        new.language = Some("Go".to_string());
        let other = summary("rust-thing", 5, 10);
        let listing = list(vec![old, other, new]);

        let mut page = ProjectsPage::new(
            fetcher_returning(listing.clone()),
            MemoryCache::new(),
            HtmlRegion::new(),
        );
        page.load("someone").await;

        page.sort(SortCriterion::Recency);
        page.search("go");

        let region = page.display();
        assert_eq!(region.active_sort, SortCriterion::Recency);
        assert_eq!(region.card_count(), 2);
        assert!(region.contents.find("go-new").unwrap() < region.contents.find("go-old").unwrap());
        assert_eq!(page.store().current(), &listing);
    }

    #[tokio::test]
    async fn test_sort_after_failure_without_cache_renders_nothing() {
        let mut page = ProjectsPage::new(failing_fetcher(), MemoryCache::new(), HtmlRegion::new());
        page.load("someone").await;

        page.sort(SortCriterion::Stars);
        page.search("anything");

        assert_eq!(page.display().card_count(), 0);
        assert!(page.display().error_visible);
        assert_eq!(page.state(), ListingState::LoadFailedNoCache);
    }
}
