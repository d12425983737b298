// Projects section of the portfolio: fetch, cache, sort, search, render
pub mod config;
pub mod error;
pub mod fetcher;
pub mod listing;
pub mod models;
pub mod skills;
pub mod store;
pub mod view;

pub use config::Config;
pub use error::Error;
pub use fetcher::{GitHubFetcher, RepositoryFetcher};
pub use listing::{ListingState, ProjectsPage};
pub use models::{RepositoryList, RepositorySummary};
pub use store::RepositoryStore;
pub use view::{HtmlRegion, ProjectsDisplay, SortCriterion};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
