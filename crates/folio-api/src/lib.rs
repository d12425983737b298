// Upstream API client for the repository listing
pub mod github;

pub use github::{GitHubClient, GitHubError, GitHubRepo, DEFAULT_API_BASE, DEFAULT_USER_AGENT};
