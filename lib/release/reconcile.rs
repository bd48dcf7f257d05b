use std::{fmt, time::Duration};

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::{
    api::{NewRelease, Release, ReleaseApi},
    result::ReleaseResult,
    retry::{RetryPolicy, retry_on_fail},
};

use super::locate::ReleaseLookup;

/**
    What needs to happen to end up with a usable release.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleasePlan {
    /// No release exists yet, create one.
    Create,
    /// The existing release is used as-is.
    Reuse(Release),
    /// The existing release points at another commit and must be replaced.
    Recreate(Release),
}

/**
    What actually happened to the release during a run.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Created,
    Reused,
    Recreated,
}

impl fmt::Display for ReleaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Reused => "reused",
            Self::Recreated => "recreated",
        })
    }
}

/**
    Decides what to do with the release found for a tag.

    A release anchored at the current commit is always reused, even if
    recreation was requested. A release at a different commit is only
    replaced when `recreate` is set.
*/
#[must_use]
pub fn plan_release(lookup: ReleaseLookup, current_sha: &str, recreate: bool) -> ReleasePlan {
    let Some(release) = lookup.into_release() else {
        return ReleasePlan::Create;
    };

    let is_same_commit = release.target_commitish == current_sha;
    if recreate && !is_same_commit {
        ReleasePlan::Recreate(release)
    } else {
        ReleasePlan::Reuse(release)
    }
}

/**
    Timing knobs for reconciliation.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSettings {
    /// Retry policy for each of the delete calls.
    pub retry: RetryPolicy,
    /// How long to wait after deleting before creating again,
    /// so the platform has caught up with the deletion.
    pub settle_delay: Duration,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            settle_delay: Duration::from_secs(2),
        }
    }
}

/**
    Deletes the given release and then its tag reference, retrying each separately.

    Does nothing if there is no release.

    # Errors

    - If either deletion still fails after exhausting the retry policy.
*/
pub async fn delete_release_if_exists(
    api: &impl ReleaseApi,
    tag: &str,
    release: Option<&Release>,
    retry: RetryPolicy,
) -> ReleaseResult<()> {
    let Some(release) = release else {
        debug!("no release to delete for tag '{tag}'");
        return Ok(());
    };

    info!(id = release.id, "Deleting release for tag '{tag}'");
    retry_on_fail(retry, "delete release", move || api.delete_release(release.id)).await?;

    info!("Deleting tag reference 'tags/{tag}'");
    retry_on_fail(retry, "delete tag reference", move || api.delete_tag_ref(tag)).await?;

    Ok(())
}

/**
    Carries out the given plan, returning the release that assets should be uploaded to.

    # Errors

    - If deleting an outdated release fails after retrying.
    - If creating the release fails.
*/
pub async fn reconcile_release(
    api: &impl ReleaseApi,
    plan: ReleasePlan,
    new_release: &NewRelease,
    settings: ReconcileSettings,
) -> ReleaseResult<(Release, ReleaseOutcome)> {
    match plan {
        ReleasePlan::Reuse(release) => {
            info!(id = release.id, "Reusing existing release '{}'", release.tag_name);
            Ok((release, ReleaseOutcome::Reused))
        }
        ReleasePlan::Create => {
            let release = create_release(api, new_release).await?;
            Ok((release, ReleaseOutcome::Created))
        }
        ReleasePlan::Recreate(existing) => {
            warn!(
                "Release '{}' points at {}, but this run is for {} - recreating it",
                existing.tag_name, existing.target_commitish, new_release.target_commitish
            );
            delete_release_if_exists(api, &new_release.tag_name, Some(&existing), settings.retry)
                .await?;
            sleep(settings.settle_delay).await;
            let release = create_release(api, new_release).await?;
            Ok((release, ReleaseOutcome::Recreated))
        }
    }
}

async fn create_release(api: &impl ReleaseApi, new_release: &NewRelease) -> ReleaseResult<Release> {
    info!(
        prerelease = new_release.prerelease,
        "Creating release '{}' at {}", new_release.tag_name, new_release.target_commitish
    );
    let release = api.create_release(new_release).await?;
    debug!(id = release.id, url = ?release.html_url, "created release");
    Ok(release)
}
