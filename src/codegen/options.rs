use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    Selenium,
    Playwright,
}

impl Framework {
    /// Both idioms target C#.
    pub fn file_extension(&self) -> &'static str {
        "cs"
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framework::Selenium => f.write_str("selenium"),
            Framework::Playwright => f.write_str("playwright"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum AiProvider {
    #[default]
    #[serde(rename = "openai")]
    #[value(name = "openai")]
    OpenAi,
    #[serde(rename = "google")]
    #[value(name = "google")]
    Google,
}

impl AiProvider {
    pub fn default_model(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "gpt-4",
            AiProvider::Google => "gemini-pro",
        }
    }

    /// Environment variable consulted for the API key when none is configured.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "OPENAI_API_KEY",
            AiProvider::Google => "GOOGLE_API_KEY",
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiProvider::OpenAi => f.write_str("openai"),
            AiProvider::Google => f.write_str("google"),
        }
    }
}

/// Everything that shapes one generation run. Pure input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    pub framework: Framework,
    pub generate_methods: bool,
    pub include_comments: bool,
    pub smart_naming: bool,
    pub use_ai: bool,
    pub ai_provider: AiProvider,
    pub model: String,
    pub namespace: String,
    /// Resolve identifier collisions instead of emitting duplicates.
    pub deduplicate_names: bool,
}

pub const DEFAULT_NAMESPACE: &str = "YourNamespace.Pages";

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            framework: Framework::Selenium,
            generate_methods: true,
            include_comments: true,
            smart_naming: true,
            use_ai: false,
            ai_provider: AiProvider::OpenAi,
            model: AiProvider::OpenAi.default_model().to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            deduplicate_names: true,
        }
    }
}
