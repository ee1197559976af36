use super::RepositoryClient;
use crate::{
    client::{Response, Result},
    RepoImmutableReleasesStatus,
};

// Implementation for the immutable releases endpoints
// https://docs.github.com/rest/repos/repos#enable-immutable-releases
impl RepositoryClient<'_> {
    /// Enable immutable releases for a repository
    ///
    /// GitHub API docs: https://docs.github.com/rest/repos/repos#enable-immutable-releases
    pub async fn enable_immutable_releases(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Response<()>> {
        let url = Self::repo_path(owner, repo, "immutable-releases")?;
        let response = self.inner.put(&url)?.send().await?;

        self.inner.empty(response).await
    }

    /// Disable immutable releases for a repository
    ///
    /// GitHub API docs: https://docs.github.com/rest/repos/repos#disable-immutable-releases
    pub async fn disable_immutable_releases(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Response<()>> {
        let url = Self::repo_path(owner, repo, "immutable-releases")?;
        let response = self.inner.delete(&url)?.send().await?;

        self.inner.empty(response).await
    }

    /// Check if immutable releases are enabled for a repository
    ///
    /// GitHub API docs: https://docs.github.com/rest/repos/repos#check-if-immutable-releases-are-enabled-for-a-repository
    pub async fn are_immutable_releases_enabled(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Response<RepoImmutableReleasesStatus>> {
        let url = Self::repo_path(owner, repo, "immutable-releases")?;
        let response = self.inner.get(&url)?.send().await?;

        self.inner.json(response).await
    }
}
