use tracing::{info, warn};

use crate::api::{GithubError, Release, ReleaseApi};

/**
    The result of looking up a release by its tag.
*/
#[derive(Debug)]
pub enum ReleaseLookup {
    /// A release exists for the tag.
    Found(Release),
    /// The platform reported that no release exists for the tag.
    NotFound,
    /// The lookup failed for some other reason, so we don't know.
    Unavailable(GithubError),
}

impl ReleaseLookup {
    #[must_use]
    pub fn into_release(self) -> Option<Release> {
        match self {
            Self::Found(release) => Some(release),
            Self::NotFound | Self::Unavailable(_) => None,
        }
    }
}

/**
    Looks up the release for the given tag.

    This never fails - lookup errors are logged and returned
    as [`ReleaseLookup::Unavailable`] for the caller to decide on.
*/
pub async fn get_release_by_tag(api: &impl ReleaseApi, tag: &str) -> ReleaseLookup {
    match api.lookup_release_by_tag(tag).await {
        Ok(Some(release)) => {
            info!(
                id = release.id,
                target = %release.target_commitish,
                "Found existing release for tag '{tag}'"
            );
            ReleaseLookup::Found(release)
        }
        Ok(None) => {
            info!("Release for tag '{tag}' not found, moving to creation");
            ReleaseLookup::NotFound
        }
        Err(e) => {
            warn!("Failed to look up release for tag '{tag}': {e}");
            ReleaseLookup::Unavailable(e)
        }
    }
}
