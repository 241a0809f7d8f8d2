use tracing::{debug, info};

use crate::ai::prompt::build_prompt;
use crate::ai::provider::TextGenerator;
use crate::codegen::options::GenerationOptions;
use crate::error::AiError;
use crate::snapshot::snapshot_model::PageSnapshot;

/// Lifecycle of one AI generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    AwaitingResponse,
    Succeeded(String),
    Failed(AiError),
}

impl DispatchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DispatchState::Succeeded(_) | DispatchState::Failed(_))
    }
}

/// Serializes a snapshot into a prompt and dispatches it exactly once.
///
/// The returned text is passed through as-is; no structural check is made
/// on what the provider wrote.
pub struct AiPomAdapter<'g> {
    generator: &'g dyn TextGenerator,
    state: DispatchState,
}

impl<'g> AiPomAdapter<'g> {
    pub fn new(generator: &'g dyn TextGenerator) -> Self {
        Self {
            generator,
            state: DispatchState::Idle,
        }
    }

    pub fn state(&self) -> &DispatchState {
        &self.state
    }

    /// Model from the options, or the provider default when blank.
    pub fn model_for(&self, options: &GenerationOptions) -> String {
        if options.model.trim().is_empty() {
            self.generator.provider().default_model().to_string()
        } else {
            options.model.clone()
        }
    }

    pub fn dispatch(
        &mut self,
        snapshot: &PageSnapshot,
        options: &GenerationOptions,
    ) -> Result<String, AiError> {
        if self.state != DispatchState::Idle {
            return Err(AiError::AlreadyDispatched);
        }

        let prompt = build_prompt(snapshot, options);
        let model = self.model_for(options);
        debug!(chars = prompt.len(), "built generation prompt");
        info!(provider = %self.generator.provider(), model = %model, "sending page structure to AI provider");

        self.state = DispatchState::AwaitingResponse;
        match self.generator.generate(&prompt, &model) {
            Ok(code) => {
                self.state = DispatchState::Succeeded(code.clone());
                Ok(code)
            }
            Err(err) => {
                self.state = DispatchState::Failed(err.clone());
                Err(err)
            }
        }
    }
}
