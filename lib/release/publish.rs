use tracing::{debug, info};

use crate::{
    api::{NewRelease, Release, ReleaseApi},
    context::RunContext,
    inputs::Inputs,
    result::ReleaseResult,
};

use super::{
    locate::get_release_by_tag,
    reconcile::{ReconcileSettings, ReleaseOutcome, plan_release, reconcile_release},
    upload::{UploadProgress, UploadReport, upload_assets},
};

/**
    Summary of a successful publish run.
*/
#[derive(Debug)]
pub struct PublishReport {
    pub release: Release,
    pub outcome: ReleaseOutcome,
    pub uploads: UploadReport,
}

/**
    Publishes a release and its assets for a single CI run.

    Owns the API client and run context for the duration of the
    run, nothing is shared between separate publishers.
*/
#[derive(Debug)]
pub struct Publisher<A> {
    api: A,
    context: RunContext,
    settings: ReconcileSettings,
}

impl<A: ReleaseApi> Publisher<A> {
    #[must_use]
    pub fn new(api: A, context: RunContext) -> Self {
        Self {
            api,
            context,
            settings: ReconcileSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ReconcileSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /**
        Locates, reconciles, and uploads assets to the release described by `inputs`.

        # Errors

        - If an outdated release could not be deleted, or a new one could not be created.
        - If an asset file could not be read.
        - If any asset failed to upload, after all assets were attempted.
    */
    pub async fn publish(
        &self,
        inputs: &Inputs,
        progress: &impl UploadProgress,
    ) -> ReleaseResult<PublishReport> {
        info!(
            "Publishing release '{}' for {} at {}",
            inputs.code, self.context.repo, self.context.sha
        );
        debug!(hash = %inputs.hash, assets = inputs.assets.len(), "publish inputs");

        let lookup = get_release_by_tag(&self.api, &inputs.code).await;
        let plan = plan_release(lookup, &self.context.sha, inputs.recreate);
        debug!(?plan, "planned release");

        let new_release = NewRelease {
            tag_name: inputs.code.clone(),
            target_commitish: self.context.sha.clone(),
            name: inputs.name.clone(),
            body: inputs.body.clone(),
            draft: false,
            prerelease: inputs.prerelease,
        };
        let (release, outcome) =
            reconcile_release(&self.api, plan, &new_release, self.settings).await?;

        let uploads = upload_assets(&self.api, &release, &inputs.assets, progress)
            .await?
            .into_result()?;

        Ok(PublishReport {
            release,
            outcome,
            uploads,
        })
    }
}
