use clap::{ArgGroup, Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::codegen::options::{AiProvider, Framework, GenerationOptions};

pub const DEFAULT_CONFIG_PATH: &str = "pom-generator.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "pom-generator",
    version,
    about = "Generate C# Page Object Models from a web page"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: pom-generator.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a page and emit a Page Object Model class
    Generate(GenerateArgs),

    /// List the elements a page object would be built from
    Analyze(AnalyzeArgs),
}

/// Where the page comes from. Exactly one source flag is required.
#[derive(Args, Debug, Clone)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .multiple(false)
        .args(["html", "fetch", "snapshot", "probe"])
))]
pub struct SourceArgs {
    /// Static HTML file
    #[arg(long)]
    pub html: Option<String>,

    /// URL to download and parse as static HTML
    #[arg(long)]
    pub fetch: Option<String>,

    /// Raw page JSON captured by a browser probe
    #[arg(long)]
    pub snapshot: Option<String>,

    /// Probe command line; it receives --url as its last argument
    #[arg(long, requires = "url")]
    pub probe: Option<String>,

    /// Page URL handed to the probe
    #[arg(long)]
    pub url: Option<String>,

    /// URL recorded in the page object for --html input
    #[arg(long)]
    pub page_url: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Target framework
    #[arg(long, value_enum)]
    pub framework: Option<Framework>,

    /// Emit interaction methods
    #[arg(long, action = clap::ArgAction::Set)]
    pub methods: Option<bool>,

    /// Emit a comment above each element
    #[arg(long, action = clap::ArgAction::Set)]
    pub comments: Option<bool>,

    /// Derive names from element attributes instead of position
    #[arg(long, action = clap::ArgAction::Set)]
    pub smart_naming: Option<bool>,

    /// Rename colliding element names
    #[arg(long, action = clap::ArgAction::Set)]
    pub dedupe: Option<bool>,

    /// Namespace of the generated class
    #[arg(long)]
    pub namespace: Option<String>,

    /// Generate through an AI provider (falls back to local generation)
    #[arg(long)]
    pub ai: bool,

    /// AI provider
    #[arg(long, value_enum)]
    pub provider: Option<AiProvider>,

    /// AI model name
    #[arg(long)]
    pub model: Option<String>,

    /// AI API key (default: from the environment)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Override the provider endpoint
    #[arg(long)]
    pub ai_endpoint: Option<String>,

    /// Append generation events to this JSONL file
    #[arg(long)]
    pub trace: Option<String>,

    /// Write <ClassName>.cs into this directory instead of stdout
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Derive names from element attributes instead of position
    #[arg(long, action = clap::ArgAction::Set)]
    pub smart_naming: Option<bool>,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `pom-generator.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub framework: Option<Framework>,
    pub generate_methods: Option<bool>,
    pub include_comments: Option<bool>,
    pub smart_naming: Option<bool>,
    pub deduplicate_names: Option<bool>,
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiConfig {
    pub enabled: Option<bool>,
    pub provider: Option<AiProvider>,
    pub model: Option<String>,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Option Builders (merge CLI args with config file)
// ============================================================================

/// CLI > config > built-in default, field by field.
pub fn resolve_options(args: &GenerateArgs, config: &AppConfig) -> GenerationOptions {
    let defaults = GenerationOptions::default();
    let generation = &config.generation;

    let ai_provider = args
        .provider
        .or(config.ai.provider)
        .unwrap_or(defaults.ai_provider);
    let model = args
        .model
        .clone()
        .or_else(|| config.ai.model.clone())
        .unwrap_or_else(|| ai_provider.default_model().to_string());

    GenerationOptions {
        framework: args
            .framework
            .or(generation.framework)
            .unwrap_or(defaults.framework),
        generate_methods: args
            .methods
            .or(generation.generate_methods)
            .unwrap_or(defaults.generate_methods),
        include_comments: args
            .comments
            .or(generation.include_comments)
            .unwrap_or(defaults.include_comments),
        smart_naming: args
            .smart_naming
            .or(generation.smart_naming)
            .unwrap_or(defaults.smart_naming),
        use_ai: args.ai || config.ai.enabled.unwrap_or(defaults.use_ai),
        ai_provider,
        model,
        namespace: args
            .namespace
            .clone()
            .or_else(|| generation.namespace.clone())
            .unwrap_or(defaults.namespace),
        deduplicate_names: args
            .dedupe
            .or(generation.deduplicate_names)
            .unwrap_or(defaults.deduplicate_names),
    }
}

/// `--api-key` > variable named by `ai.api_key_env` > provider default
/// variable. Blank keys count as absent.
pub fn resolve_api_key(
    cli_key: Option<&str>,
    config: &AppConfig,
    provider: AiProvider,
    env: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let from_env = || {
        config
            .ai
            .api_key_env
            .as_deref()
            .and_then(|name| env(name))
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env(provider.api_key_env()))
    };

    cli_key
        .map(str::to_string)
        .filter(|key| !key.trim().is_empty())
        .or_else(from_env)
        .filter(|key| !key.trim().is_empty())
}

/// Trace path: CLI > config.
pub fn resolve_trace_path(cli_path: Option<&str>, config: &AppConfig) -> Option<String> {
    cli_path
        .map(str::to_string)
        .or_else(|| config.trace.path.clone())
}
