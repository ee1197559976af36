use crate::client::{Client, Error, Result};

mod immutable_releases;

/// `RepositoryClient` handles communication with the Repository related methods of the GitHub API.
///
/// GitHub API docs: https://docs.github.com/rest/repos
pub struct RepositoryClient<'a> {
    inner: &'a Client,
}

impl<'a> RepositoryClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { inner: client }
    }

    fn repo_path(owner: &str, repo: &str, endpoint: &str) -> Result<String> {
        Ok(format!(
            "repos/{}/{}/{}",
            path_segment(owner)?,
            path_segment(repo)?,
            endpoint
        ))
    }
}

// Owner and repo names are spliced into the path verbatim, so anything that would change
// how the URL parses (another segment, a query, a fragment, an escape) is refused.
fn path_segment(value: &str) -> Result<&str> {
    let reserved = |c: char| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control();
    if value.is_empty() || value == "." || value == ".." || value.contains(reserved) {
        return Err(Error::InvalidPath(value.to_owned()));
    }

    Ok(value)
}
