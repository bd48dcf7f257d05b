use serde::{Deserialize, Serialize};

/**
    A release as returned by the GitHub API.

    Only the fields this crate needs are deserialized.
*/
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    pub target_commitish: String,
    pub name: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    pub html_url: Option<String>,
    /// URI template, eg. `https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}`
    pub upload_url: String,
}

/**
    Request body for creating a new release.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}
