use std::path::{Path, PathBuf};

use tracing::info;

use crate::ai::provider::build_generator;
use crate::cli::config::{
    resolve_api_key, resolve_options, resolve_trace_path, AnalyzeArgs, AppConfig, GenerateArgs,
    SourceArgs,
};
use crate::codegen::emitter::{class_name, resolve_elements, GeneratedPom};
use crate::codegen::options::GenerationOptions;
use crate::error::PomError;
use crate::generator::{GenerationContext, OutputOrigin, PomGenerator};
use crate::snapshot::html_source::HtmlSnapshotSource;
use crate::snapshot::probe::{JsonSnapshotSource, ProbeSnapshotSource};
use crate::snapshot::snapshot_model::PageSnapshot;
use crate::snapshot::source::SnapshotSource;
use crate::trace::logger::TraceLogger;

// ============================================================================
// generate subcommand
// ============================================================================

pub fn cmd_generate(args: &GenerateArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let options = resolve_options(args, config);
    let source = build_source(&args.source)?;
    let generator = build_pom_generator(args, config, &options);

    if options.use_ai && !generator.has_ai() {
        info!(
            provider = %options.ai_provider,
            "no API key found, generating locally"
        );
    }

    let mut context = GenerationContext::new(generator);
    let outcome = context.generate(source.as_ref(), &options)?;

    if let OutputOrigin::LocalFallback { reason } = &outcome.origin {
        eprintln!("AI generation failed ({}); used local generation", reason);
    }

    match &args.output_dir {
        Some(dir) => {
            let path = write_pom(Path::new(dir), &outcome.pom)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", outcome.pom.source),
    }

    Ok(())
}

/// Generator for the resolved options: AI-capable only when AI is requested
/// and a key is available.
pub fn build_pom_generator(
    args: &GenerateArgs,
    config: &AppConfig,
    options: &GenerationOptions,
) -> PomGenerator {
    let mut generator = PomGenerator::local();

    if let Some(path) = resolve_trace_path(args.trace.as_deref(), config) {
        generator = generator.with_tracer(TraceLogger::new(&path));
    }

    if options.use_ai {
        let key = resolve_api_key(args.api_key.as_deref(), config, options.ai_provider, |name| {
            std::env::var(name).ok()
        });
        if let Some(key) = key {
            let endpoint = args.ai_endpoint.as_deref().or(config.ai.endpoint.as_deref());
            generator = generator.with_ai(build_generator(options.ai_provider, &key, endpoint));
        }
    }

    generator
}

// ============================================================================
// analyze subcommand
// ============================================================================

pub fn cmd_analyze(args: &AnalyzeArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = build_source(&args.source)?;
    let snapshot = source.produce()?;

    if args.json {
        let json = serde_json::to_string_pretty(&snapshot).map_err(|e| PomError::Json {
            context: "snapshot".into(),
            source: e,
        })?;
        println!("{}", json);
        return Ok(());
    }

    let defaults = GenerationOptions::default();
    let options = GenerationOptions {
        smart_naming: args
            .smart_naming
            .or(config.generation.smart_naming)
            .unwrap_or(defaults.smart_naming),
        deduplicate_names: config
            .generation
            .deduplicate_names
            .unwrap_or(defaults.deduplicate_names),
        ..defaults
    };
    print!("{}", format_analysis(&snapshot, &options));
    Ok(())
}

/// One line per retained element: index, name, purpose, tag, locator.
pub fn format_analysis(snapshot: &PageSnapshot, options: &GenerationOptions) -> String {
    let class = class_name(&snapshot.title);
    let mut out = format!(
        "{} ({}) - {} elements\n",
        class,
        snapshot.url,
        snapshot.elements.len()
    );

    for element in resolve_elements(snapshot, &class, options) {
        out.push_str(&format!(
            "  [{}] {} {} <{}> {}\n",
            element.index,
            element.name,
            element.descriptor.purpose,
            element.descriptor.tag_name,
            element.locator
        ));
    }
    out
}

// ============================================================================
// Helpers
// ============================================================================

/// Save as `<dir>/<ClassName>.cs`, creating `dir` if needed.
pub fn write_pom(dir: &Path, pom: &GeneratedPom) -> Result<PathBuf, PomError> {
    let io_error = |path: &Path| {
        let path = path.display().to_string();
        move |source| PomError::Io { path, source }
    };

    std::fs::create_dir_all(dir).map_err(io_error(dir))?;
    let path = dir.join(pom.file_name());
    std::fs::write(&path, &pom.source).map_err(io_error(&path))?;
    Ok(path)
}

/// Snapshot source selected by the source flags.
pub fn build_source(args: &SourceArgs) -> Result<Box<dyn SnapshotSource>, PomError> {
    if let Some(path) = &args.html {
        let source = HtmlSnapshotSource::from_file(Path::new(path), args.page_url.as_deref())?;
        return Ok(Box::new(source));
    }
    if let Some(url) = &args.fetch {
        return Ok(Box::new(HtmlSnapshotSource::fetch(url)?));
    }
    if let Some(path) = &args.snapshot {
        return Ok(Box::new(JsonSnapshotSource::new(path.as_str())));
    }
    if let Some(command) = &args.probe {
        let url = args
            .url
            .as_deref()
            .ok_or_else(|| PomError::Config("--probe requires --url".into()))?;
        return Ok(Box::new(ProbeSnapshotSource::from_command_line(command, url)?));
    }
    Err(PomError::Config(
        "one of --html, --fetch, --snapshot or --probe is required".into(),
    ))
}
