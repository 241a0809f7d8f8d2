use tracing::info;

use crate::error::PomError;
use crate::snapshot::snapshot_model::PageSnapshot;
use crate::snapshot::source::SnapshotSource;

/// Single-slot holder for the most recent analysis.
///
/// Set when a snapshot is produced, read when code is emitted, overwritten by
/// the next analysis. Never merges.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    latest: Option<PageSnapshot>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, snapshot: PageSnapshot) -> &PageSnapshot {
        self.latest.insert(snapshot)
    }

    pub fn latest(&self) -> Option<&PageSnapshot> {
        self.latest.as_ref()
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }

    /// Produce a fresh snapshot and overwrite the slot. On failure the
    /// previous snapshot is left untouched.
    pub fn refresh(&mut self, source: &dyn SnapshotSource) -> Result<&PageSnapshot, PomError> {
        let snapshot = source.produce()?;
        info!(
            source = %source.describe(),
            elements = snapshot.elements.len(),
            "snapshot produced"
        );
        Ok(self.store(snapshot))
    }

    /// Reuse the cached snapshot if there is one, otherwise produce it.
    pub fn get_or_refresh(&mut self, source: &dyn SnapshotSource) -> Result<&PageSnapshot, PomError> {
        if self.latest.is_none() {
            self.refresh(source)?;
        }
        self.latest
            .as_ref()
            .ok_or_else(|| PomError::SnapshotUnavailable("No DOM analysis available".into()))
    }
}
