pub mod ai;
pub mod cli;
pub mod codegen;
pub mod error;
pub mod generator;
pub mod locator;
pub mod naming;
pub mod snapshot;
pub mod text;
pub mod trace;

pub use codegen::emitter::{emit_local, GeneratedPom};
pub use codegen::options::{AiProvider, Framework, GenerationOptions};
pub use error::{AiError, PomError};
pub use generator::{GenerationContext, GenerationOutcome, OutputOrigin, PomGenerator};
pub use snapshot::snapshot_model::{ElementDescriptor, PageSnapshot};
