// Holds the one current repository listing and mirrors it to a local cache
use folio_cache::CacheBackend;
use tracing::{debug, warn};

use crate::models::RepositoryList;

/// Cache key the listing is persisted under
pub const CACHE_KEY: &str = "repos";

/// Owner of the current [`RepositoryList`].
///
/// Every successful fetch replaces the whole listing; nothing is merged.
pub struct RepositoryStore<B: CacheBackend> {
    backend: B,
    current: RepositoryList,
}

impl<B: CacheBackend> RepositoryStore<B> {
    /// Create a store and prime it from whatever the backend holds
    pub fn open(backend: B) -> Self {
        let mut store = Self {
            backend,
            current: RepositoryList::default(),
        };
        store.current = store.load().unwrap_or_default();
        store
    }

    /// Read the persisted listing.
    ///
    /// A missing entry, an unreadable backend and a corrupt payload all
    /// come back as `None`.
    pub fn load(&self) -> Option<RepositoryList> {
        let raw = match self.backend.get(CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No cached listing");
                return None;
            }
            Err(e) => {
                warn!("Could not read cached listing: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<RepositoryList>(&raw) {
            Ok(list) => {
                debug!("Loaded {} cached repositories", list.len());
                Some(list)
            }
            Err(e) => {
                warn!("Ignoring corrupt cached listing: {}", e);
                None
            }
        }
    }

    /// Swap in a new listing, in memory first and then on disk.
    ///
    /// A failed write is logged; the in-memory listing stays replaced.
    pub fn replace(&mut self, list: RepositoryList) {
        match serde_json::to_string(&list) {
            Ok(json) => {
                if let Err(e) = self.backend.set(CACHE_KEY, &json) {
                    warn!("Failed to persist listing: {}", e);
                } else {
                    debug!("Persisted {} repositories", list.len());
                }
            }
            Err(e) => warn!("Failed to serialize listing: {}", e),
        }

        self.current = list;
    }

    /// The operative listing
    pub fn current(&self) -> &RepositoryList {
        &self.current
    }

    /// Drop the persisted listing; the in-memory one is untouched
    pub fn clear_persisted(&self) -> crate::Result<()> {
        self.backend.remove(CACHE_KEY)?;
        Ok(())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
