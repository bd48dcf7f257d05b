use std::future::Future;

use bytes::Bytes;

mod client;
mod models;

pub mod github;

#[cfg(test)]
pub(crate) mod fake;

pub use self::github::{GithubApi, GithubError, GithubResult};
pub use self::models::{NewRelease, Release};

/**
    The remote operations needed to publish a release.

    Implementations are scoped to a single repository, which
    is why none of the methods take a repository argument.
*/
pub trait ReleaseApi {
    /**
        Looks up the release for the given tag.

        Returns `Ok(None)` if the platform reports that no such release exists.
    */
    fn lookup_release_by_tag(
        &self,
        tag: &str,
    ) -> impl Future<Output = GithubResult<Option<Release>>> + Send;

    /**
        Creates a new release, returning its remote representation.
    */
    fn create_release(
        &self,
        release: &NewRelease,
    ) -> impl Future<Output = GithubResult<Release>> + Send;

    /**
        Deletes the release with the given id.

        This does not delete the tag the release points at, see [`ReleaseApi::delete_tag_ref`].
    */
    fn delete_release(&self, release_id: u64) -> impl Future<Output = GithubResult<()>> + Send;

    /**
        Deletes the git reference `tags/<tag>`.
    */
    fn delete_tag_ref(&self, tag: &str) -> impl Future<Output = GithubResult<()>> + Send;

    /**
        Uploads the given contents as an asset of the release.

        The content length sent is always the length of `contents`.
    */
    fn upload_asset(
        &self,
        release: &Release,
        name: &str,
        content_type: &str,
        contents: Bytes,
    ) -> impl Future<Output = GithubResult<()>> + Send;
}
