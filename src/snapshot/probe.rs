use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::PomError;
use crate::snapshot::extractor::build_snapshot;
use crate::snapshot::snapshot_model::{PageSnapshot, RawPage};
use crate::snapshot::source::SnapshotSource;

// ============================================================================
// Probe subprocess: a browser script that prints RawPage JSON
// ============================================================================

/// Runs an external DOM probe (for example `node probe/extract.js`) with the
/// target URL as its last argument and reads a `RawPage` from its stdout.
pub struct ProbeSnapshotSource {
    pub program: String,
    pub args: Vec<String>,
    pub url: String,
}

impl ProbeSnapshotSource {
    pub fn new(program: &str, args: Vec<String>, url: &str) -> Self {
        Self {
            program: program.to_string(),
            args,
            url: url.to_string(),
        }
    }

    /// Split a shell-like command line (`"node probe/extract.js"`) on whitespace.
    pub fn from_command_line(command: &str, url: &str) -> Result<Self, PomError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| PomError::Config("empty probe command".into()))?;
        Ok(Self {
            program,
            args: parts.collect(),
            url: url.to_string(),
        })
    }
}

impl SnapshotSource for ProbeSnapshotSource {
    fn produce(&self) -> Result<PageSnapshot, PomError> {
        debug!(program = %self.program, url = %self.url, "running DOM probe");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.url)
            .output()
            .map_err(|e| {
                PomError::SnapshotUnavailable(format!("failed to spawn {}: {}", self.program, e))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            warn!(probe = %self.program, "{}", stderr.trim());
        }

        if !output.status.success() {
            return Err(PomError::SnapshotUnavailable(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let page: RawPage = serde_json::from_str(stdout.trim()).map_err(|e| {
            PomError::SnapshotUnavailable(format!("invalid JSON from {}: {}", self.program, e))
        })?;

        Ok(build_snapshot(&page))
    }

    fn describe(&self) -> String {
        format!("probe {} {}", self.program, self.url)
    }
}

// ============================================================================
// Captured probe output on disk
// ============================================================================

/// Reads a `RawPage` JSON document previously written by a probe.
pub struct JsonSnapshotSource {
    path: PathBuf,
}

impl JsonSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for JsonSnapshotSource {
    fn produce(&self) -> Result<PageSnapshot, PomError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            PomError::SnapshotUnavailable(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        let page: RawPage = serde_json::from_str(&content).map_err(|e| {
            PomError::SnapshotUnavailable(format!("invalid snapshot {}: {}", self.path.display(), e))
        })?;

        Ok(build_snapshot(&page))
    }

    fn describe(&self) -> String {
        format!("snapshot file {}", self.path.display())
    }
}
