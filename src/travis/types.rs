use std::fmt;

use serde::Deserialize;

/// Identifier assigned by the Travis API.
///
/// Travis v3 serializes ids as JSON numbers in current payloads but
/// documents them as opaque, so both numeric and string forms are accepted
/// and preserved as received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ApiId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiId::Number(id) => write!(f, "{id}"),
            ApiId::Text(id) => f.write_str(id),
        }
    }
}

/// Token correlating a trigger call with the build it eventually creates.
pub type RequestId = ApiId;

/// Lifecycle state of a Travis build.
///
/// Tokens this list does not cover parse as `Unknown`, which classifies as
/// neither successful nor finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildState {
    Created,
    Queued,
    Received,
    Started,
    Passed,
    Failed,
    Errored,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl BuildState {
    /// Whether the build finished successfully.
    pub fn is_passed(self) -> bool {
        matches!(self, BuildState::Passed)
    }

    /// Whether the build finished unsuccessfully.
    pub fn is_failed(self) -> bool {
        matches!(
            self,
            BuildState::Failed | BuildState::Errored | BuildState::Canceled
        )
    }

    /// Whether the build reached a terminal state.
    pub fn is_finished(self) -> bool {
        self.is_passed() || self.is_failed()
    }

    fn as_str(self) -> &'static str {
        match self {
            BuildState::Created => "created",
            BuildState::Queued => "queued",
            BuildState::Received => "received",
            BuildState::Started => "started",
            BuildState::Passed => "passed",
            BuildState::Failed => "failed",
            BuildState::Errored => "errored",
            BuildState::Canceled => "canceled",
            BuildState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single build as reported by the request-status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Build {
    /// Build identifier, distinct from the request id that created it
    pub id: ApiId,

    /// State of the previous build on the same branch, when Travis knows one
    #[serde(default)]
    #[allow(dead_code)]
    pub previous_state: Option<String>,

    /// Current lifecycle state
    pub state: BuildState,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [BuildState; 9] = [
        BuildState::Created,
        BuildState::Queued,
        BuildState::Received,
        BuildState::Started,
        BuildState::Passed,
        BuildState::Failed,
        BuildState::Errored,
        BuildState::Canceled,
        BuildState::Unknown,
    ];

    #[test]
    fn test_id_parses_number_and_text() {
        let numeric: ApiId = serde_json::from_str("12345").unwrap();
        let text: ApiId = serde_json::from_str("\"12345\"").unwrap();

        assert_eq!(numeric, ApiId::Number(12345));
        assert_eq!(text, ApiId::Text("12345".to_string()));
    }

    #[test]
    fn test_id_displays_wire_form() {
        assert_eq!(ApiId::Number(42).to_string(), "42");
        assert_eq!(ApiId::Text("42".to_string()).to_string(), "42");
    }

    #[test]
    fn test_state_parses_lowercase_tokens() {
        let state: BuildState = serde_json::from_str("\"passed\"").unwrap();
        assert_eq!(state, BuildState::Passed);

        let state: BuildState = serde_json::from_str("\"errored\"").unwrap();
        assert_eq!(state, BuildState::Errored);
    }

    #[test]
    fn test_unrecognized_state_is_unknown() {
        let state: BuildState = serde_json::from_str("\"restarted\"").unwrap();

        assert_eq!(state, BuildState::Unknown);
        assert!(!state.is_finished());
    }

    #[test]
    fn test_success_and_failure_partition_finished() {
        for state in ALL_STATES {
            assert!(
                !(state.is_passed() && state.is_failed()),
                "{state} classified as both passed and failed"
            );
            assert_eq!(
                state.is_finished(),
                state.is_passed() || state.is_failed(),
                "{state} breaks the terminal-state partition"
            );
        }

        assert!(BuildState::Passed.is_passed());
        assert!(BuildState::Failed.is_failed());
        assert!(BuildState::Errored.is_failed());
        assert!(BuildState::Canceled.is_failed());
        assert!(!BuildState::Started.is_finished());
    }

    #[test]
    fn test_build_deserializes_status_payload() {
        let build: Build = serde_json::from_str(
            r#"{"id": 99, "previous_state": "passed", "state": "started", "number": "7"}"#,
        )
        .unwrap();

        assert_eq!(build.id, ApiId::Number(99));
        assert_eq!(build.previous_state, Some("passed".to_string()));
        assert_eq!(build.state, BuildState::Started);
    }

    #[test]
    fn test_build_tolerates_missing_previous_state() {
        let build: Build = serde_json::from_str(r#"{"id": 99, "state": "created"}"#).unwrap();

        assert_eq!(build.previous_state, None);
        assert_eq!(build.state, BuildState::Created);
    }
}
