use std::{future::Future, time::Duration};

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::result::{ReleaseError, ReleaseResult};

/**
    How many times, and how far apart, an operation is attempted.

    Defaults to 3 attempts with 1 second of delay before each one.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_tries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_tries: 3,
            delay: Duration::from_secs(1),
        }
    }
}

/**
    Runs the given async operation until it succeeds or the policy's attempt budget runs out.

    Every attempt waits for `policy.delay` first and is awaited to completion
    before the next one is started.

    # Errors

    - [`ReleaseError::RetryExhausted`] if `policy.max_tries` is zero, or if
      every attempt failed. In the latter case the last failure is kept as the source.
*/
pub async fn retry_on_fail<T, E, F, Fut>(
    policy: RetryPolicy,
    operation: &str,
    mut op: F,
) -> ReleaseResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<ReleaseError>,
{
    let mut last_error = None;
    let mut attempts = 0;

    while attempts < policy.max_tries {
        attempts += 1;
        sleep(policy.delay).await;

        match op().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(operation, attempts, "succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) => {
                let e: ReleaseError = e.into();
                warn!(
                    "{operation} failed (attempt {attempts}/{}): {e}",
                    policy.max_tries
                );
                last_error = Some(Box::new(e));
            }
        }
    }

    Err(ReleaseError::RetryExhausted {
        operation: operation.to_string(),
        attempts,
        source: last_error,
    })
}
