use std::time::Duration;

use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;

use super::github::GithubResult;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const TRANSIENT_RETRIES: u32 = 3;

/**
    How a single HTTP client should behave.

    Only idempotent requests may be sent through a client with
    `retry_transient` enabled, everything else is sent exactly once
    and left to the caller to retry if it wants to.
*/
#[derive(Debug, Clone, Copy)]
pub(crate) struct ClientOptions {
    pub request_timeout: Duration,
    pub retry_transient: bool,
    pub https_only: bool,
}

impl ClientOptions {
    pub fn idempotent(request_timeout: Duration) -> Self {
        Self {
            request_timeout,
            retry_transient: true,
            https_only: true,
        }
    }

    pub fn send_once(request_timeout: Duration) -> Self {
        Self {
            retry_transient: false,
            ..Self::idempotent(request_timeout)
        }
    }

    #[must_use]
    pub fn with_https_only(mut self, https_only: bool) -> Self {
        self.https_only = https_only;
        self
    }
}

/**
    Creates a client with:

    - Timeouts for connection and response
    - All common compression algorithms enabled
    - User agent set to `<crate_name>/<crate_version> (<repository_url>)`
    - Tracing of every request
    - Exponential backoff on transient failures, if enabled in `options`
*/
pub(crate) fn create_client(
    mut default_headers: HeaderMap,
    options: ClientOptions,
) -> GithubResult<ClientWithMiddleware> {
    let user_agent = format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_REPOSITORY"),
    );
    default_headers.insert(USER_AGENT, HeaderValue::from_str(&user_agent)?);

    let client = Client::builder()
        .default_headers(default_headers)
        .https_only(options.https_only)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(options.request_timeout)
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;

    let mut builder = ClientBuilder::new(client);
    if options.retry_transient {
        builder = builder.with(RetryTransientMiddleware::new_with_policy(
            ExponentialBackoff::builder().build_with_max_retries(TRANSIENT_RETRIES),
        ));
    }
    Ok(builder.with(TracingMiddleware::default()).build())
}
