//! Core types for star-fetch

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of an astronomical object as given by the user (e.g. "TIC 84441541")
///
/// No format is enforced; the lookup service decides whether it is valid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Wrap a raw identifier string
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Identifier {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque, non-empty response body returned by the name lookup service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    payload: Vec<u8>,
}

impl Resolution {
    /// Wrap a lookup response body; `None` when the body is empty
    pub fn from_body(payload: Vec<u8>) -> Option<Self> {
        if payload.is_empty() {
            None
        } else {
            Some(Self { payload })
        }
    }

    /// Raw payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Where an artifact lives remotely and where it will be written locally
///
/// Computed fresh for every fetch, never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactLocation {
    /// Remote product name the URL was built from
    pub file_name: String,
    /// Full download URL
    pub remote_url: String,
    /// Local destination (`<output_dir>/<identifier>_<variant>.<ext>`)
    pub destination: PathBuf,
}

/// Pipeline stage of a single fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Before any work
    Start,
    /// Querying the name lookup service
    Resolving,
    /// Deriving the artifact location
    Locating,
    /// Streaming the artifact to disk
    Downloading,
    /// Artifact written
    Succeeded,
    /// A stage failed
    Failed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Start => "start",
            Stage::Resolving => "resolving",
            Stage::Locating => "locating",
            Stage::Downloading => "downloading",
            Stage::Succeeded => "succeeded",
            Stage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Reason recorded when resolution fails
pub const REASON_RESOLUTION: &str = "metadata resolution failed";
/// Reason recorded when no artifact location could be derived
pub const REASON_LOCATE: &str = "artifact location failed";
/// Reason recorded when the download stage fails
pub const REASON_DOWNLOAD: &str = "download failed";

/// Terminal result of one fetch attempt
///
/// Produced exactly once per call to [`Fetcher::fetch`](crate::Fetcher::fetch)
/// and never modified afterwards.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// Identifier that was fetched
    pub identifier: Identifier,
    /// Whether the artifact was written
    pub success: bool,
    /// Download duration in seconds (0.0 on failure)
    pub elapsed_seconds: f64,
    /// Short reason on failure
    pub failure_reason: Option<String>,
    /// Last stage reached: the stage that failed, or `Succeeded`
    ///
    /// Never [`Stage::Failed`]; that stage only appears in transition logs.
    pub stage: Stage,
    /// Local file written on success
    pub destination: Option<PathBuf>,
}

impl FetchOutcome {
    pub(crate) fn succeeded(identifier: Identifier, elapsed_seconds: f64, destination: PathBuf) -> Self {
        Self {
            identifier,
            success: true,
            elapsed_seconds,
            failure_reason: None,
            stage: Stage::Succeeded,
            destination: Some(destination),
        }
    }

    pub(crate) fn failed(identifier: Identifier, stage: Stage, reason: &str) -> Self {
        Self {
            identifier,
            success: false,
            elapsed_seconds: 0.0,
            failure_reason: Some(reason.to_string()),
            stage,
            destination: None,
        }
    }

    /// Elapsed seconds, only when the fetch succeeded
    pub fn elapsed(&self) -> Option<f64> {
        self.success.then_some(self.elapsed_seconds)
    }

    /// Console summary line for this outcome
    pub fn summary(&self) -> String {
        if self.success {
            format!(
                "Success: Fetched data for {} in {} seconds",
                self.identifier, self.elapsed_seconds
            )
        } else {
            format!("Failed to fetch data for star ID: {}", self.identifier)
        }
    }
}
