use std::{env::var, fmt};

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use release_upload::{
    api::GithubApi,
    context::RunContext,
    inputs::{EnvInputs, InputSource, Inputs},
    release::{PublishReport, Publisher},
};

use crate::util::UploadProgressBar;

/**
    Creates (or recreates) a GitHub release and uploads assets to it.

    Every option falls back to the matching `INPUT_*` environment
    variable, which is how GitHub Actions passes inputs to actions.
*/
#[derive(Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Release display title.
    #[clap(long)]
    pub name: Option<String>,
    /// Release tag.
    #[clap(long)]
    pub code: Option<String>,
    /// Release description.
    #[clap(long)]
    pub body: Option<String>,
    /// Content hash, passed through as-is.
    #[clap(long)]
    pub hash: Option<String>,
    /// Marks the release as a prerelease.
    #[clap(long)]
    pub prerelease: Option<bool>,
    /// Deletes and recreates an existing release if it points at another commit.
    #[clap(long)]
    pub recreate: Option<bool>,
    /// Space-separated list of `source:target:type` assets to upload.
    #[clap(long)]
    pub assets: Option<String>,
    /// GitHub token. Falls back to `INPUT_TOKEN`, then `GITHUB_TOKEN`.
    #[clap(long, hide = true)]
    pub token: Option<String>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let context = RunContext::from_env().context("Failed to read the GitHub Actions context")?;
        let inputs = Inputs::resolve(&self).context("Failed to resolve inputs")?;

        let api = GithubApi::new(&context, &inputs.token)
            .context("Failed to create the GitHub API client")?;
        let publisher = Publisher::new(api, context);

        let progress = UploadProgressBar::new(inputs.assets.len());
        let result = publisher.publish(&inputs, &progress).await;
        progress.finish();

        let report = result.with_context(|| format!("Failed to publish release '{}'", inputs.code))?;
        print_summary(&report);

        Ok(())
    }
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("name", &self.name)
            .field("code", &self.code)
            .field("body", &self.body)
            .field("hash", &self.hash)
            .field("prerelease", &self.prerelease)
            .field("recreate", &self.recreate)
            .field("assets", &self.assets)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl InputSource for Cli {
    fn get(&self, name: &str) -> Option<String> {
        let flag = match name {
            "name" => self.name.clone(),
            "code" => self.code.clone(),
            "body" => self.body.clone(),
            "hash" => self.hash.clone(),
            "prerelease" => self.prerelease.map(|b| b.to_string()),
            "recreate" => self.recreate.map(|b| b.to_string()),
            "assets" => self.assets.clone(),
            "token" => self.token.clone(),
            _ => None,
        };

        flag.or_else(|| EnvInputs.get(name)).or_else(|| {
            if name == "token" {
                var("GITHUB_TOKEN").ok()
            } else {
                None
            }
        })
    }
}

fn print_summary(report: &PublishReport) {
    let tag = style(&report.release.tag_name).bold().magenta();
    let url = report
        .release
        .html_url
        .as_deref()
        .map(|url| format!("\n{}", style(url).dim()))
        .unwrap_or_default();
    tracing::info!(
        "{} release {tag} and uploaded {} asset(s).{url}",
        capitalize(&report.outcome.to_string()),
        report.uploads.uploaded.len(),
    );
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
