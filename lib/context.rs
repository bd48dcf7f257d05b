use std::{env::var, fmt, str::FromStr};

use url::Url;

use crate::result::{ReleaseError, ReleaseResult};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/**
    A repository on the hosting platform, in `owner/name` form.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoId {
    type Err = ReleaseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReleaseError::InvalidRepository(s.to_string());

        let (owner, name) = s.trim().split_once('/').ok_or_else(invalid)?;
        let owner = owner.trim();
        let name = name.trim();

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/**
    The context of a single CI run: which repository we
    are releasing from, the commit being built, and the API to talk to.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub repo: RepoId,
    pub sha: String,
    pub api_url: Url,
}

impl RunContext {
    /**
        Reads the run context from the GitHub Actions environment.

        # Errors

        - If `GITHUB_REPOSITORY` or `GITHUB_SHA` are missing or empty.
        - If `GITHUB_REPOSITORY` is not in `owner/name` form.
        - If `GITHUB_API_URL` is set but is not a valid URL.
    */
    pub fn from_env() -> ReleaseResult<Self> {
        Self::from_lookup(|key| var(key).ok())
    }

    /**
        Reads the run context using the given variable lookup function.

        See [`RunContext::from_env`] for details.
    */
    pub fn from_lookup<F>(lookup: F) -> ReleaseResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ReleaseError::MissingContext(key))
        };

        let repo = required("GITHUB_REPOSITORY")?.parse::<RepoId>()?;
        let sha = required("GITHUB_SHA")?;

        let api_url = lookup("GITHUB_API_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url)
            .map_err(|e| ReleaseError::InvalidApiUrl(format!("{api_url} ({e})")))?;

        Ok(Self { repo, sha, api_url })
    }
}
