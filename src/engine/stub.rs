use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::deploy::keys::{CommitKey, DEPLOYER_APP_ID, JobKey};
use crate::store::{CommitStore, JobOutputStore};
use crate::types::{Commit, Job};

use super::interface::{Engine, EngineHandle, Event, Request};

/// An engine that serves a pre-loaded commit and scripts each deploy job's
/// output stream, without any network calls.
///
/// Useful for integration tests and UI demos that must not require a
/// platform controller.
pub struct StubEngine {
    pub commits: Arc<CommitStore>,
    pub job_outputs: Arc<JobOutputStore>,
    /// Commit served for every `FetchCommit`, re-keyed to the requested sha.
    /// `None` leaves the requested entry empty, like an unknown commit.
    pub commit: Option<Commit>,
    /// Output chunks streamed for each deploy job, in order.
    pub script: Vec<String>,
    /// Delay between scripted output chunks.
    pub chunk_delay: Duration,
}

impl StubEngine {
    /// A stub with a plausible fixture commit and build transcript.
    pub fn with_fixture(commits: Arc<CommitStore>, job_outputs: Arc<JobOutputStore>) -> Self {
        Self {
            commits,
            job_outputs,
            commit: Some(Commit {
                sha: String::new(),
                message: "demo: exercise the deploy flow".to_owned(),
                author_name: Some("shipdeck".to_owned()),
                author_email: None,
                committed_date: Some(chrono::Utc::now()),
            }),
            script: [
                "-----> fetching source\n",
                "-----> building slug\n",
                "-----> launching\n",
                "=====> deployed\n",
            ]
            .map(str::to_owned)
            .to_vec(),
            chunk_delay: Duration::from_millis(400),
        }
    }
}

impl Engine for StubEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("stub tokio runtime");
            rt.block_on(self.run_loop(rx));
        });
        EngineHandle::new(tx)
    }
}

impl StubEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        let mut next_job_number = 1u64;
        while let Some(req) = rx.recv().await {
            match req {
                Request::FetchCommit {
                    owner_login,
                    repo_name,
                    sha,
                } => {
                    let key = CommitKey {
                        owner_login,
                        repo_name,
                        sha: sha.clone(),
                    };
                    let commit = self.commit.clone().map(|c| Commit { sha, ..c });
                    self.commits.update(&key, |state| state.commit = commit);
                }
                Request::DeployCommit { reply_tx, sha, .. } => {
                    let job = Job {
                        id: format!("deploy-{next_job_number}"),
                    };
                    next_job_number += 1;
                    tracing::debug!(job = %job.id, %sha, "stub deploy started");
                    let _ = reply_tx.send(Event::DeployStarted { job: job.clone() });

                    let key = JobKey {
                        app_id: DEPLOYER_APP_ID.to_owned(),
                        job_id: job.id,
                    };
                    self.job_outputs.update(&key, |state| state.open = Some(true));
                    for chunk in &self.script {
                        tokio::time::sleep(self.chunk_delay).await;
                        self.job_outputs
                            .update(&key, |state| state.append_output(chunk));
                    }
                    self.job_outputs.update(&key, |state| {
                        state.eof = Some(true);
                        state.open = Some(false);
                    });
                }
                Request::Shutdown => break,
            }
        }
    }
}
