#![allow(clippy::missing_errors_doc)]

use std::time::Duration;

use bytes::Bytes;
use reqwest::{
    Method, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::context::RunContext;

use super::{
    NewRelease, Release, ReleaseApi,
    client::{ClientOptions, create_client},
};

mod result;

#[cfg(test)]
mod test_server;

pub use self::result::{GithubError, GithubResult};

const API_TIMEOUT: Duration = Duration::from_secs(60);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/**
    Client for the GitHub releases REST API, scoped to a single repository.

    Only the release lookup is retried on transient HTTP failures. Creating,
    deleting and uploading are sent exactly once per call, since resending them
    is not safe (an upload that already landed fails with `already_exists`).
*/
#[derive(Debug, Clone)]
pub struct GithubApi {
    lookup_client: ClientWithMiddleware,
    client: ClientWithMiddleware,
    upload_client: ClientWithMiddleware,
    repo_url: Url,
}

impl GithubApi {
    fn new_inner(context: &RunContext, token: &str, https_only: bool) -> GithubResult<Self> {
        let headers = {
            let mut headers = HeaderMap::new();
            headers.insert(
                HeaderName::from_static("x-github-api-version"),
                HeaderValue::from_static("2022-11-28"),
            );
            let token = format!("Bearer {}", token.trim());
            let mut token = HeaderValue::from_str(&token)?;
            token.set_sensitive(true);
            headers.insert(AUTHORIZATION, token);
            headers
        };

        let lookup_client = create_client(
            headers.clone(),
            ClientOptions::idempotent(API_TIMEOUT).with_https_only(https_only),
        )?;
        let client = create_client(
            headers.clone(),
            ClientOptions::send_once(API_TIMEOUT).with_https_only(https_only),
        )?;
        let upload_client = create_client(
            headers,
            ClientOptions::send_once(UPLOAD_TIMEOUT).with_https_only(https_only),
        )?;
        let repo_url = repo_url(&context.api_url, context.repo.owner(), context.repo.name())?;

        Ok(Self {
            lookup_client,
            client,
            upload_client,
            repo_url,
        })
    }

    /**
        Creates a new authenticated API client for the repository in the given run context.

        Note that this does not verify the validity of the token,
        an invalid token will surface as an error on the first request.

        # Errors

        - If the token is not a valid header value.
        - If the HTTP client could not be created.
    */
    pub fn new(context: &RunContext, token: impl AsRef<str>) -> GithubResult<Self> {
        Self::new_inner(context, token.as_ref(), true)
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> GithubResult<Url> {
        let mut url = self.repo_url.clone();
        url.path_segments_mut()
            .map_err(|()| GithubError::InvalidUrl(self.repo_url.to_string()))?
            .extend(segments);
        Ok(url)
    }

    fn request(&self, client: &ClientWithMiddleware, method: Method, url: Url) -> RequestBuilder {
        client
            .request(method, url)
            .header(ACCEPT, "application/vnd.github+json")
    }
}

impl ReleaseApi for GithubApi {
    #[instrument(skip(self), level = "debug")]
    async fn lookup_release_by_tag(&self, tag: &str) -> GithubResult<Option<Release>> {
        let url = self.endpoint(["releases", "tags", tag])?;
        debug!(%url, "looking up release by tag");

        match send(self.request(&self.lookup_client, Method::GET, url)).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, release), fields(tag = %release.tag_name), level = "debug")]
    async fn create_release(&self, release: &NewRelease) -> GithubResult<Release> {
        let url = self.endpoint(["releases"])?;
        debug!(%url, target = %release.target_commitish, "creating release");

        let response = send(self.request(&self.client, Method::POST, url).json(release)).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_release(&self, release_id: u64) -> GithubResult<()> {
        let id = release_id.to_string();
        let url = self.endpoint(["releases", id.as_str()])?;
        debug!(%url, "deleting release");

        send(self.request(&self.client, Method::DELETE, url)).await?;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_tag_ref(&self, tag: &str) -> GithubResult<()> {
        let url = self.endpoint(["git", "refs", "tags", tag])?;
        debug!(%url, "deleting tag ref");

        send(self.request(&self.client, Method::DELETE, url)).await?;
        Ok(())
    }

    #[instrument(skip(self, release, contents), fields(release_id = release.id, len = contents.len()), level = "debug")]
    async fn upload_asset(
        &self,
        release: &Release,
        name: &str,
        content_type: &str,
        contents: Bytes,
    ) -> GithubResult<()> {
        let mut url = upload_url(release)?;
        url.query_pairs_mut().append_pair("name", name);
        debug!(%url, content_type, "uploading asset");

        let request = self
            .request(&self.upload_client, Method::POST, url)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, contents.len())
            .body(contents);

        send(request).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/*
    Sends the request and turns any non-success status into a
    `GithubError::Api`, keeping the message GitHub sent back.
*/
async fn send(request: RequestBuilder) -> GithubResult<reqwest::Response> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    Err(GithubError::Api {
        status,
        message: api_error_message(status, &text),
    })
}

fn api_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => body.trim().to_string(),
    }
}

fn repo_url(api_url: &Url, owner: &str, repo: &str) -> GithubResult<Url> {
    let mut url = api_url.clone();
    url.path_segments_mut()
        .map_err(|()| GithubError::InvalidUrl(api_url.to_string()))?
        .pop_if_empty()
        .extend(["repos", owner, repo]);
    Ok(url)
}

/*
    Release upload urls are RFC 6570 templates, such as:

    https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}

    We only ever fill in the `name` parameter, so the template suffix is dropped.
*/
fn upload_url(release: &Release) -> GithubResult<Url> {
    let base = match release.upload_url.find('{') {
        Some(idx) => &release.upload_url[..idx],
        None => release.upload_url.as_str(),
    };
    if base.is_empty() {
        return Err(GithubError::MissingUploadUrl(release.id));
    }
    Ok(Url::parse(base)?)
}
