use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::oneshot;

use crate::config::JobConfig;
use crate::error::{CIGateError, Result};
use crate::output::{bright_green, bright_red, dim};

use super::client::TravisClient;
use super::links;
use super::types::{Build, RequestId};

/// Ceiling on how long a triggered build may take to reach a terminal
/// state before the job gives up.
const RESULT_DEADLINE: Duration = Duration::from_secs(40 * 60);

/// Final outcome of a gated build, surfaced through the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Passed,
    Failed,
}

impl JobOutcome {
    /// Exit code the invoking pipeline keys on.
    pub fn exit_code(self) -> i32 {
        match self {
            JobOutcome::Passed => 0,
            JobOutcome::Failed => 1,
        }
    }
}

/// Orchestrates one build from trigger to verdict.
pub struct BuildJob {
    client: TravisClient,
    config: JobConfig,
}

impl BuildJob {
    /// Creates a job for the repository and branch described by `config`.
    pub fn new(config: JobConfig) -> Result<Self> {
        let client = TravisClient::new(
            &config.api_base_url(),
            &config.repo_owner,
            &config.repo_name,
            &config.token,
        )?;

        Ok(Self { client, config })
    }

    /// Runs the full job lifecycle: trigger a build, poll it to a terminal
    /// state, classify the result.
    pub async fn execute(&self) -> Result<JobOutcome> {
        let request_id = self.client.trigger_build(&self.config.branch).await?;
        info!(
            "Build request '{}' accepted for branch '{}' of {}/{}",
            request_id, self.config.branch, self.config.repo_owner, self.config.repo_name
        );

        let build = self.poll_for_result(&request_id).await?;
        Ok(self.report_status(&build))
    }

    /// Waits until the build created for `request_id` reaches a terminal
    /// state, or the overall deadline passes.
    pub async fn poll_for_result(&self, request_id: &RequestId) -> Result<Build> {
        self.poll_with_deadline(request_id, RESULT_DEADLINE).await
    }

    async fn poll_with_deadline(
        &self,
        request_id: &RequestId,
        deadline: Duration,
    ) -> Result<Build> {
        let (tx, rx) = oneshot::channel();

        let client = self.client.clone();
        let request_id = request_id.clone();
        let poll_interval = self.config.poll_interval;
        let tld = self.config.tld.clone();
        let owner = self.config.repo_owner.clone();
        let repo = self.config.repo_name.clone();

        let poller = tokio::spawn(async move {
            let mut announced = false;

            loop {
                tokio::time::sleep(poll_interval).await;
                debug!("Polling for build result...");

                let build = match client.build_status(&request_id).await {
                    Ok(build) => build,
                    Err(CIGateError::NotFound(_)) => {
                        // Travis accepted the request but has not created
                        // the build yet.
                        debug!("No build for request '{request_id}' yet");
                        continue;
                    }
                    Err(e) => {
                        warn!("Build status check failed: {e}");
                        continue;
                    }
                };

                if !announced {
                    info!(
                        "Build '{}' started: {}",
                        build.id,
                        links::build_url(&tld, &owner, &repo, &build.id)
                    );
                    announced = true;
                }

                if build.state.is_finished() {
                    // Sending consumes the channel, so at most one result
                    // ever leaves this task.
                    let _ = tx.send(build);
                    return;
                }
            }
        });

        let result = tokio::select! {
            delivered = rx => delivered.map_err(|_| {
                CIGateError::Internal("status poller stopped before delivering a result".to_string())
            }),
            _ = tokio::time::sleep(deadline) => Err(CIGateError::Timeout(deadline)),
        };

        // The loser of the race must be fully stopped before returning so
        // nothing polls or logs once the deadline has passed.
        poller.abort();
        let _ = poller.await;

        result
    }

    /// Maps a terminal build to the job outcome and prints the verdict.
    ///
    /// Anything other than an explicit pass counts as a failure, so states
    /// outside the known terminal sets fail the gate too.
    pub fn report_status(&self, build: &Build) -> JobOutcome {
        let url = links::build_url(
            &self.config.tld,
            &self.config.repo_owner,
            &self.config.repo_name,
            &build.id,
        );

        if build.state.is_passed() {
            debug!("Reporting success for build '{}'", build.id);
            eprintln!(
                "\n{} {}",
                bright_green(format!("✓ Build '{}' passed", build.id)),
                dim(&url)
            );
            JobOutcome::Passed
        } else {
            debug!("Reporting failure for build '{}'", build.id);
            eprintln!(
                "\n{} {}",
                bright_red(format!(
                    "✗ Build '{}' finished as '{}'",
                    build.id, build.state
                )),
                dim(&url)
            );
            JobOutcome::Failed
        }
    }
}
