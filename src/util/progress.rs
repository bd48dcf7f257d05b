use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use release_upload::{api::GithubError, inputs::AssetSpec, release::UploadProgress};

const PROGRESS_BAR_TEMPLATE: &str = "{msg} [{bar:32.cyan/blue}] {pos} / {len}";
const PROGRESS_BAR_CHARACTERS: &str = "▪▸-";

/**
    Progress bar for asset uploads.

    Hidden automatically when stderr is not a terminal, which is the usual case in CI.
*/
pub struct UploadProgressBar {
    bar: ProgressBar,
}

impl UploadProgressBar {
    pub fn new(length: usize) -> Self {
        let style = ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(PROGRESS_BAR_CHARACTERS);
        let bar = ProgressBar::new(length as u64)
            .with_message("Uploading")
            .with_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl UploadProgress for UploadProgressBar {
    fn upload_started(&self, asset: &AssetSpec) {
        self.bar.set_message(format!("Uploading {}", asset.target));
    }

    fn upload_finished(&self, _asset: &AssetSpec, _result: Result<(), &GithubError>) {
        self.bar.inc(1);
    }
}
