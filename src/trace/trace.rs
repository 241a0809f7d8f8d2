use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::codegen::options::Framework;
use crate::snapshot::snapshot_model::PageSnapshot;

/// Step of a generation request, as written to the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationStage {
    SnapshotProduced,
    AwaitingResponse,
    Succeeded,
    Failed,
    LocalFallback,
    Local,
}

#[derive(Debug, Serialize)]
pub struct GenerationEvent {
    pub timestamp_ms: u128,
    pub stage: GenerationStage,

    pub url: String,
    pub fingerprint: String,
    pub element_count: usize,

    pub framework: Option<Framework>,
    pub detail: Option<String>,
}

impl GenerationEvent {
    pub fn now(stage: GenerationStage, snapshot: &PageSnapshot) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            stage,
            url: snapshot.url.clone(),
            fingerprint: snapshot.fingerprint(),
            element_count: snapshot.elements.len(),
            framework: None,
            detail: None,
        }
    }

    pub fn with_framework(mut self, framework: Framework) -> Self {
        self.framework = Some(framework);
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
