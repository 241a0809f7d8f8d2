use serde::Serialize;
use tracing::{info, warn};

use crate::ai::adapter::AiPomAdapter;
use crate::ai::provider::TextGenerator;
use crate::codegen::emitter::{class_name, emit_local, GeneratedPom};
use crate::codegen::options::GenerationOptions;
use crate::error::PomError;
use crate::snapshot::cache::SnapshotCache;
use crate::snapshot::snapshot_model::PageSnapshot;
use crate::snapshot::source::SnapshotSource;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{GenerationEvent, GenerationStage};

/// Which path produced the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "kebab-case")]
pub enum OutputOrigin {
    Local,
    Ai,
    /// The AI request failed once; `reason` is the error it failed with.
    LocalFallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    pub pom: GeneratedPom,
    pub origin: OutputOrigin,
}

// ============================================================================
// PomGenerator: picks the emission path for one snapshot
// ============================================================================

/// Emits a page object from a snapshot.
///
/// The AI path is taken only when `use_ai` is set and a text generator was
/// configured (credentials present). An AI failure falls back to local
/// emission exactly once; local emission cannot fail, so `generate` always
/// returns source.
pub struct PomGenerator {
    ai: Option<Box<dyn TextGenerator>>,
    tracer: TraceLogger,
}

impl PomGenerator {
    pub fn local() -> Self {
        Self {
            ai: None,
            tracer: TraceLogger::disabled(),
        }
    }

    pub fn with_ai(mut self, generator: Box<dyn TextGenerator>) -> Self {
        self.ai = Some(generator);
        self
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn has_ai(&self) -> bool {
        self.ai.is_some()
    }

    pub fn generate(&self, snapshot: &PageSnapshot, options: &GenerationOptions) -> GenerationOutcome {
        let generator = match (&self.ai, options.use_ai) {
            (Some(generator), true) => generator.as_ref(),
            _ => return self.generate_local(snapshot, options, OutputOrigin::Local),
        };

        self.trace(GenerationStage::AwaitingResponse, snapshot, options, None);
        let mut adapter = AiPomAdapter::new(generator);

        match adapter.dispatch(snapshot, options) {
            Ok(code) => {
                info!(chars = code.len(), "AI generation succeeded");
                self.trace(GenerationStage::Succeeded, snapshot, options, None);
                GenerationOutcome {
                    pom: GeneratedPom {
                        class_name: class_name(&snapshot.title),
                        framework: options.framework,
                        source: code,
                    },
                    origin: OutputOrigin::Ai,
                }
            }
            Err(err) => {
                let reason = err.to_string();
                warn!(error = %reason, "AI generation failed, generating locally");
                self.trace(GenerationStage::Failed, snapshot, options, Some(&reason));
                self.generate_local(snapshot, options, OutputOrigin::LocalFallback { reason })
            }
        }
    }

    fn generate_local(
        &self,
        snapshot: &PageSnapshot,
        options: &GenerationOptions,
        origin: OutputOrigin,
    ) -> GenerationOutcome {
        let stage = match origin {
            OutputOrigin::LocalFallback { .. } => GenerationStage::LocalFallback,
            _ => GenerationStage::Local,
        };
        let pom = emit_local(snapshot, options);
        self.trace(stage, snapshot, options, Some(&pom.class_name));
        GenerationOutcome { pom, origin }
    }

    fn trace(
        &self,
        stage: GenerationStage,
        snapshot: &PageSnapshot,
        options: &GenerationOptions,
        detail: Option<&str>,
    ) {
        if !self.tracer.is_enabled() {
            return;
        }
        let mut event = GenerationEvent::now(stage, snapshot).with_framework(options.framework);
        if let Some(detail) = detail {
            event = event.with_detail(detail);
        }
        self.tracer.log(&event);
    }
}

// ============================================================================
// GenerationContext (analyze, then generate)
// ============================================================================

/// Owns the single-slot snapshot cache and the generator for a session.
pub struct GenerationContext {
    cache: SnapshotCache,
    generator: PomGenerator,
}

impl GenerationContext {
    pub fn new(generator: PomGenerator) -> Self {
        Self {
            cache: SnapshotCache::new(),
            generator,
        }
    }

    /// Produce a snapshot and overwrite the cached one.
    pub fn analyze(&mut self, source: &dyn SnapshotSource) -> Result<&PageSnapshot, PomError> {
        let snapshot = self.cache.refresh(source)?;
        if self.generator.tracer.is_enabled() {
            let event = GenerationEvent::now(GenerationStage::SnapshotProduced, snapshot)
                .with_detail(source.describe());
            self.generator.tracer.log(&event);
        }
        Ok(snapshot)
    }

    pub fn latest_snapshot(&self) -> Option<&PageSnapshot> {
        self.cache.latest()
    }

    pub fn generate(
        &mut self,
        source: &dyn SnapshotSource,
        options: &GenerationOptions,
    ) -> Result<GenerationOutcome, PomError> {
        self.analyze(source)?;
        self.generate_cached(options)
    }

    /// Generate from the last analysis without touching the document again.
    pub fn generate_cached(&self, options: &GenerationOptions) -> Result<GenerationOutcome, PomError> {
        let snapshot = self
            .cache
            .latest()
            .ok_or_else(|| PomError::SnapshotUnavailable("No DOM analysis available".into()))?;
        Ok(self.generator.generate(snapshot, options))
    }
}
