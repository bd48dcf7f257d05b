use bytes::Bytes;
use tokio::fs::read;
use tracing::{error, info};

use crate::{
    api::{GithubError, Release, ReleaseApi},
    inputs::AssetSpec,
    result::{ReleaseError, ReleaseResult},
};

/**
    Receives notifications about upload progress.

    All methods default to doing nothing.
*/
pub trait UploadProgress {
    fn upload_started(&self, _asset: &AssetSpec) {}
    fn upload_finished(&self, _asset: &AssetSpec, _result: Result<(), &GithubError>) {}
}

impl UploadProgress for () {}

/**
    The outcome of uploading a list of assets.
*/
#[derive(Debug, Default)]
pub struct UploadReport {
    pub uploaded: Vec<String>,
    pub failed: Vec<(String, GithubError)>,
}

impl UploadReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.uploaded.len() + self.failed.len()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /**
        Turns this report into an error if any upload failed.

        # Errors

        - [`ReleaseError::UploadsFailed`] naming every asset that failed.
    */
    pub fn into_result(self) -> ReleaseResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ReleaseError::UploadsFailed {
                failed: self.failed.iter().map(|(name, _)| name.clone()).collect(),
                total: self.total(),
            })
        }
    }
}

/**
    Uploads all assets to the release, one at a time and in the given order.

    Upload failures are collected in the returned report and do not stop
    the remaining assets from being uploaded. Nothing is retried here.

    # Errors

    - If an asset's source file could not be read, which aborts immediately.
*/
pub async fn upload_assets(
    api: &impl ReleaseApi,
    release: &Release,
    assets: &[AssetSpec],
    progress: &impl UploadProgress,
) -> ReleaseResult<UploadReport> {
    let mut report = UploadReport::default();

    for asset in assets {
        info!(
            "Uploading '{}' as '{}' ({})",
            asset.source.display(),
            asset.target,
            asset.content_type
        );

        let contents = match read(&asset.source).await {
            Ok(contents) => Bytes::from(contents),
            Err(source) => {
                error!("Failed to read '{}': {source}", asset.source.display());
                log_summary(&report, assets.len());
                return Err(ReleaseError::Io {
                    path: asset.source.clone(),
                    source,
                });
            }
        };

        progress.upload_started(asset);
        let result = api
            .upload_asset(release, &asset.target, &asset.content_type, contents)
            .await;
        progress.upload_finished(asset, result.as_ref().map(|_| ()));

        match result {
            Ok(()) => report.uploaded.push(asset.target.clone()),
            Err(e) => {
                error!("Failed to upload '{}': {e}", asset.target);
                report.failed.push((asset.target.clone(), e));
            }
        }
    }

    log_summary(&report, assets.len());

    Ok(report)
}

fn log_summary(report: &UploadReport, total: usize) {
    info!("Uploaded {} of {total} asset(s)", report.uploaded.len());
}
