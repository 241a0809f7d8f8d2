use clap::Parser;
use pom_generator::cli::commands::{cmd_analyze, cmd_generate};
use pom_generator::cli::config::{Cli, Commands, load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match &cli.command {
        Commands::Generate(args) => cmd_generate(args, &config)?,
        Commands::Analyze(args) => cmd_analyze(args, &config)?,
    }

    Ok(())
}

/// stderr only; stdout carries generated source. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
