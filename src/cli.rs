use anyhow::Result;
use clap::Parser;
use log::info;

use crate::config::JobConfig;
use crate::travis::{BuildJob, JobOutcome};

#[derive(Parser)]
#[command(name = "cigate")]
#[command(author, version, about = "Travis CI build gate", long_about = None)]
pub struct Cli {
    /// Git branch to build
    #[arg(short, long, env = "BRANCH")]
    branch: String,

    /// Repository owner or organization
    #[arg(short = 'o', long, env = "REPO_OWNER")]
    repo_owner: String,

    /// Repository name
    #[arg(short = 'r', long, env = "REPO_NAME")]
    repo_name: String,

    /// Travis API token
    #[arg(short, long, env = "TRAVIS_TOKEN", hide_env_values = true)]
    travis_token: String,

    /// Top-level domain of the Travis instance ("org" or "com")
    #[arg(long, env = "TRAVIS_TLD")]
    travis_tld: String,

    /// Seconds between build status polls
    #[arg(
        short,
        long,
        env = "POLL_INTERVAL",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    poll_interval: u64,
}

impl Cli {
    /// Parses arguments, exiting the process on failure.
    ///
    /// The pipeline contract reserves a single fatal exit code, so argument
    /// errors leave with code 1 instead of clap's default; help and version
    /// output still exit with 0.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(e) => {
                let code = if e.use_stderr() { 1 } else { 0 };
                let _ = e.print();
                std::process::exit(code);
            }
        }
    }

    /// Drives one gated build from trigger to verdict.
    pub async fn execute(self) -> Result<JobOutcome> {
        let config = self.into_config()?;
        info!(
            "Gating on a Travis build of {}/{} ({})",
            config.repo_owner, config.repo_name, config.branch
        );

        let job = BuildJob::new(config)?;
        let outcome = job.execute().await?;

        Ok(outcome)
    }

    fn into_config(self) -> crate::error::Result<JobConfig> {
        JobConfig::new(
            self.branch,
            self.repo_owner,
            self.repo_name,
            self.travis_token,
            self.travis_tld,
            self.poll_interval,
        )
    }
}
