use crate::error::PomError;
use crate::snapshot::extractor::build_snapshot;
use crate::snapshot::snapshot_model::{PageSnapshot, RawPage};

/// Produces the current `PageSnapshot` from some document.
///
/// Synchronous from the caller's point of view. Implementations report any
/// failure to reach a document as `PomError::SnapshotUnavailable`.
pub trait SnapshotSource {
    fn produce(&self) -> Result<PageSnapshot, PomError>;

    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// In-memory probe output. Useful when a caller already holds the raw element
/// list (tests, embedding in another tool).
pub struct RawPageSource {
    page: RawPage,
}

impl RawPageSource {
    pub fn new(page: RawPage) -> Self {
        Self { page }
    }
}

impl SnapshotSource for RawPageSource {
    fn produce(&self) -> Result<PageSnapshot, PomError> {
        Ok(build_snapshot(&self.page))
    }

    fn describe(&self) -> String {
        format!("raw page {}", self.page.url)
    }
}
