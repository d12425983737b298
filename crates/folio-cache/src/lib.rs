// Local key-value caches backing the repository store
// SQLite for persistence across runs, a HashMap for tests and throwaway runs

pub mod cache;
pub mod memory;

pub use cache::{CacheBackend, CacheError, Result, SqliteCache};
pub use memory::MemoryCache;
