use std::time::Duration;

use crate::error::{CIGateError, Result};

/// Resolved job configuration for one gated build.
///
/// Values come from command-line flags or their environment variable
/// counterparts and are validated once at startup; everything downstream
/// treats the configuration as immutable. The overall result deadline is
/// deliberately not configurable and lives next to the poll loop instead.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Git branch to build
    pub branch: String,

    /// Repository owner or organization
    pub repo_owner: String,

    /// Repository name
    pub repo_name: String,

    /// Travis API token
    pub token: String,

    /// Top-level domain of the Travis instance ("org" or "com")
    pub tld: String,

    /// Spacing between consecutive status polls
    pub poll_interval: Duration,
}

impl JobConfig {
    /// Validates and assembles a job configuration.
    ///
    /// Every setting is required: a value that is set but blank is treated
    /// the same as a missing one, and the error message names the
    /// environment variable that backs the setting.
    pub fn new(
        branch: String,
        repo_owner: String,
        repo_name: String,
        token: String,
        tld: String,
        poll_interval_secs: u64,
    ) -> Result<Self> {
        for (name, value) in [
            ("BRANCH", &branch),
            ("REPO_OWNER", &repo_owner),
            ("REPO_NAME", &repo_name),
            ("TRAVIS_TOKEN", &token),
            ("TRAVIS_TLD", &tld),
        ] {
            if value.trim().is_empty() {
                return Err(CIGateError::Config(format!("{name} must not be empty")));
            }
        }

        if poll_interval_secs == 0 {
            return Err(CIGateError::Config(
                "POLL_INTERVAL must be a positive number of seconds".to_string(),
            ));
        }

        Ok(Self {
            branch,
            repo_owner,
            repo_name,
            token,
            tld,
            poll_interval: Duration::from_secs(poll_interval_secs),
        })
    }

    /// API host for the configured Travis instance.
    ///
    /// The JSON API lives on the `api.` subdomain; build pages for people
    /// live on the bare host.
    pub fn api_base_url(&self) -> String {
        format!("https://api.travis-ci.{}", self.tld)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> (String, String, String, String, String) {
        (
            "main".to_string(),
            "test-owner".to_string(),
            "test-repo".to_string(),
            "test-token".to_string(),
            "org".to_string(),
        )
    }

    #[test]
    fn test_valid_config() {
        let (branch, owner, repo, token, tld) = args();
        let config = JobConfig::new(branch, owner, repo, token, tld, 30).unwrap();

        assert_eq!(config.branch, "main");
        assert_eq!(config.repo_owner, "test-owner");
        assert_eq!(config.repo_name, "test-repo");
        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_value_is_rejected() {
        let (_, owner, repo, token, tld) = args();
        let err = JobConfig::new(String::new(), owner, repo, token, tld, 30).unwrap_err();

        assert!(err.to_string().contains("BRANCH"));
    }

    #[test]
    fn test_blank_value_is_rejected() {
        let (branch, owner, repo, _, tld) = args();
        let err = JobConfig::new(branch, owner, repo, "   ".to_string(), tld, 30).unwrap_err();

        assert!(err.to_string().contains("TRAVIS_TOKEN"));
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let (branch, owner, repo, token, tld) = args();
        let err = JobConfig::new(branch, owner, repo, token, tld, 0).unwrap_err();

        assert!(err.to_string().contains("POLL_INTERVAL"));
    }

    #[test]
    fn test_api_base_url_follows_tld() {
        let (branch, owner, repo, token, _) = args();
        let config =
            JobConfig::new(branch, owner, repo, token, "com".to_string(), 30).unwrap();

        assert_eq!(config.api_base_url(), "https://api.travis-ci.com");
    }
}
