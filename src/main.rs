use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use servicescout::cli::{Cli, OutputFormat};
use servicescout::discovery::{DiscoveryEngine, ScanConfig};
use servicescout::output::OutputWriter;
use servicescout::ports;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "servicescout=debug"
    } else {
        "servicescout=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let custom_ports = match &cli.ports {
        Some(spec) => Some(ports::parse_port_spec(spec)?),
        None => None,
    };

    let engine = DiscoveryEngine::new(ScanConfig {
        timeout_ms: cli.timeout,
        batch_size: cli.batch_size,
        progress: cli.output_format == OutputFormat::Human && cli.output_file.is_none(),
    });

    let started = chrono::Utc::now();
    let services = engine.discover(&cli.host, custom_ports.as_deref()).await;
    let elapsed = chrono::Utc::now() - started;

    OutputWriter::new(cli.output_format, cli.output_file).write(&services)?;

    if cli.output_format == OutputFormat::Human {
        eprintln!(
            "\n{} {} {} {}",
            "✓".green().bold(),
            format!("{} service(s)", services.len()).bold(),
            "in".dimmed(),
            format!("{}ms", elapsed.num_milliseconds()).cyan()
        );
    }

    Ok(())
}
