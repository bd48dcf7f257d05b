use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use bytes::Bytes;
use reqwest::StatusCode;
use tokio::time::Instant;

use super::{GithubError, GithubResult, NewRelease, Release, ReleaseApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Lookup(String),
    Create(NewRelease),
    DeleteRelease(u64),
    DeleteTag(String),
    Upload {
        release_id: u64,
        name: String,
        content_type: String,
        len: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Lookup,
    Create,
    DeleteRelease,
    DeleteTag,
    Upload,
}

/**
    In-memory [`ReleaseApi`] that records every call along with the
    (possibly paused) tokio time it was made at.
*/
#[derive(Debug, Default)]
pub struct FakeApi {
    existing: Mutex<Option<Release>>,
    failures: Mutex<HashMap<Op, VecDeque<StatusCode>>>,
    failing_uploads: Mutex<Vec<String>>,
    calls: Mutex<Vec<(Instant, Call)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release(release: Release) -> Self {
        let api = Self::default();
        *api.existing.lock().unwrap() = Some(release);
        api
    }

    /// Makes the next `times` calls of `op` fail with the given status.
    pub fn fail(&self, op: Op, times: usize, status: StatusCode) {
        let mut failures = self.failures.lock().unwrap();
        let queue = failures.entry(op).or_default();
        queue.extend(std::iter::repeat_n(status, times));
    }

    pub fn fail_upload_named(&self, name: &str) {
        self.failing_uploads.lock().unwrap().push(name.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn timed_calls(&self) -> Vec<(Instant, Call)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| pred(call)).count()
    }

    fn record(&self, op: Op, call: Call) -> GithubResult<()> {
        self.calls.lock().unwrap().push((Instant::now(), call));
        let next_failure = self
            .failures
            .lock()
            .unwrap()
            .get_mut(&op)
            .and_then(VecDeque::pop_front);
        match next_failure {
            Some(status) => Err(GithubError::Api {
                status,
                message: format!("injected {op:?} failure"),
            }),
            None => Ok(()),
        }
    }
}

pub fn release(id: u64, tag: &str, sha: &str) -> Release {
    Release {
        id,
        tag_name: tag.to_string(),
        target_commitish: sha.to_string(),
        name: Some(tag.to_string()),
        body: None,
        draft: false,
        prerelease: false,
        html_url: Some(format!("https://github.com/octo/widgets/releases/tag/{tag}")),
        upload_url: format!(
            "https://uploads.github.com/repos/octo/widgets/releases/{id}/assets{{?name,label}}"
        ),
    }
}

impl ReleaseApi for FakeApi {
    async fn lookup_release_by_tag(&self, tag: &str) -> GithubResult<Option<Release>> {
        self.record(Op::Lookup, Call::Lookup(tag.to_string()))?;
        let existing = self.existing.lock().unwrap().clone();
        Ok(existing.filter(|r| r.tag_name == tag))
    }

    async fn create_release(&self, new: &NewRelease) -> GithubResult<Release> {
        self.record(Op::Create, Call::Create(new.clone()))?;
        let mut created = release(100, &new.tag_name, &new.target_commitish);
        created.name = Some(new.name.clone());
        created.body = Some(new.body.clone());
        created.prerelease = new.prerelease;
        *self.existing.lock().unwrap() = Some(created.clone());
        Ok(created)
    }

    async fn delete_release(&self, release_id: u64) -> GithubResult<()> {
        self.record(Op::DeleteRelease, Call::DeleteRelease(release_id))?;
        let mut existing = self.existing.lock().unwrap();
        if existing.as_ref().is_some_and(|r| r.id == release_id) {
            *existing = None;
        }
        Ok(())
    }

    async fn delete_tag_ref(&self, tag: &str) -> GithubResult<()> {
        self.record(Op::DeleteTag, Call::DeleteTag(tag.to_string()))
    }

    async fn upload_asset(
        &self,
        release: &Release,
        name: &str,
        content_type: &str,
        contents: Bytes,
    ) -> GithubResult<()> {
        self.record(
            Op::Upload,
            Call::Upload {
                release_id: release.id,
                name: name.to_string(),
                content_type: content_type.to_string(),
                len: contents.len(),
            },
        )?;
        if self.failing_uploads.lock().unwrap().iter().any(|n| n == name) {
            return Err(GithubError::Api {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: format!("asset '{name}' already exists"),
            });
        }
        Ok(())
    }
}
