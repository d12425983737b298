// Fetcher - bridges the GitHub client with the listing page
use async_trait::async_trait;
use folio_api::GitHubClient;
use tracing::info;

use crate::{models::RepositoryList, Result};

/// Source of the repository listing.
///
/// Implementations make one attempt and never persist anything; the
/// caller decides what to do with a failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryFetcher: Send + Sync {
    async fn fetch_repositories(&self, owner: &str) -> Result<RepositoryList>;
}

/// Fetcher backed by the public GitHub API
pub struct GitHubFetcher {
    client: GitHubClient,
}

impl GitHubFetcher {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RepositoryFetcher for GitHubFetcher {
    async fn fetch_repositories(&self, owner: &str) -> Result<RepositoryList> {
        let raw = self.client.list_user_repos(owner).await?;
        let total = raw.len();
        let list = RepositoryList::from_raw(raw);

        info!(
            "Fetched {} repositories for {}, showing {}",
            total,
            owner,
            list.len()
        );
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn test_rejected_request_maps_to_upstream_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await.unwrap();
            socket
                .write_all(b"HTTP/1.1 403 Forbidden\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await
                .unwrap();
        });

        let client = GitHubClient::with_base_url(folio_api::DEFAULT_USER_AGENT, base_url).unwrap();
        let fetcher = GitHubFetcher::new(client);

        let err = fetcher.fetch_repositories("someone").await.unwrap_err();
        assert!(matches!(err, Error::Upstream { status: 403 }));
        assert_eq!(err.reason(), "upstream-error");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_upstream_maps_to_transport_error() {
        let client = GitHubClient::with_base_url(
            folio_api::DEFAULT_USER_AGENT,
            "http://127.0.0.1:9".to_string(),
        )
        .unwrap();
        let fetcher = GitHubFetcher::new(client);

        let err = fetcher.fetch_repositories("someone").await.unwrap_err();
        assert!(matches!(err, Error::TransportOrDecode(_)));
        assert_eq!(err.reason(), "network-or-parse-error");
    }
}
