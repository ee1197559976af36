use serde::{Deserialize, Serialize};

/// Whether immutable releases are turned on for a repository
///
/// GitHub API docs: https://docs.github.com/rest/repos/repos#check-if-immutable-releases-are-enabled-for-a-repository
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RepoImmutableReleasesStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Set when the setting is enforced by the owning organization or enterprise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforced_by_owner: Option<bool>,
}
