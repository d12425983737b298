use chrono::{DateTime, Utc};
use folio_api::GitHubRepo;
use serde::{Deserialize, Serialize};

/// Most repositories shown on the page
pub const MAX_REPOSITORIES: usize = 12;

/// A repository as the projects section shows it.
///
/// Serialized with the upstream field names so the cached form reads like
/// the API payload it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(rename = "stargazers_count")]
    pub star_count: u32,
    #[serde(rename = "forks_count")]
    pub fork_count: u32,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
}

impl From<GitHubRepo> for RepositorySummary {
    fn from(gh: GitHubRepo) -> Self {
        Self {
            name: gh.name,
            description: gh.description,
            language: gh.language,
            star_count: gh.stargazers_count,
            fork_count: gh.forks_count,
            updated_at: gh.updated_at,
            html_url: gh.html_url,
        }
    }
}

/// The canonical listing: forks removed, at most twelve entries, most
/// starred first.
///
/// Never mutated after construction. Sorting and searching derive new
/// sequences from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<RepositorySummary>", into = "Vec<RepositorySummary>")]
pub struct RepositoryList {
    repos: Vec<RepositorySummary>,
}

impl RepositoryList {
    /// Normalize a raw listing response.
    ///
    /// Forks are dropped, the first twelve survivors kept, and those are
    /// sorted by star count descending. Truncation happens before sorting,
    /// so a highly starred repo past position twelve is not shown.
    pub fn from_raw(raw: Vec<GitHubRepo>) -> Self {
        let mut repos: Vec<RepositorySummary> = raw
            .into_iter()
            .filter(|repo| !repo.fork)
            .take(MAX_REPOSITORIES)
            .map(RepositorySummary::from)
            .collect();

        // sort_by is stable, ties keep upstream order
        repos.sort_by(|a, b| b.star_count.cmp(&a.star_count));

        Self { repos }
    }

    pub fn as_slice(&self) -> &[RepositorySummary] {
        &self.repos
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RepositorySummary> {
        self.repos.iter()
    }
}

impl TryFrom<Vec<RepositorySummary>> for RepositoryList {
    type Error = String;

    fn try_from(repos: Vec<RepositorySummary>) -> Result<Self, Self::Error> {
        if repos.len() > MAX_REPOSITORIES {
            return Err(format!(
                "listing holds {} repositories, at most {} allowed",
                repos.len(),
                MAX_REPOSITORIES
            ));
        }
        Ok(Self { repos })
    }
}

impl From<RepositoryList> for Vec<RepositorySummary> {
    fn from(list: RepositoryList) -> Self {
        list.repos
    }
}

impl<'a> IntoIterator for &'a RepositoryList {
    type Item = &'a RepositorySummary;
    type IntoIter = std::slice::Iter<'a, RepositorySummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.repos.iter()
    }
}
