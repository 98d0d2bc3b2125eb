use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::discovery::DEFAULT_HOST;

#[derive(Parser, Debug)]
#[command(name = "servicescout")]
#[command(version = "0.1.0")]
#[command(about = "Discover reachable local services and fingerprint their protocols", long_about = None)]
pub struct Cli {
    #[arg(default_value = DEFAULT_HOST, help = "Host to scan (IP or hostname)")]
    pub host: String,

    #[arg(
        short,
        long,
        help = "Ports to probe: -p3000,5432 or -p8000-8010. Defaults to the built-in well-known table."
    )]
    pub ports: Option<String>,

    #[arg(long, default_value_t = 1000, help = "Per-probe timeout in milliseconds")]
    pub timeout: u64,

    #[arg(long, default_value_t = 10, help = "Ports probed concurrently per batch")]
    pub batch_size: usize,

    #[arg(short = 'o', long, value_enum, default_value = "human", help = "Output format")]
    pub output_format: OutputFormat,

    #[arg(short = 'f', long, help = "Output file path")]
    pub output_file: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum OutputFormat {
    #[value(name = "human", help = "Human-readable output")]
    Human,
    #[value(name = "json", help = "JSON output")]
    Json,
}
