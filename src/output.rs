use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::cli::OutputFormat;
use crate::discovery::results::{DiscoveredService, Protocol};

/// Pure, stateless rendering of discovery results to text: one block per
/// service — an icon keyed by type, the derived name, then
/// `host:port • type` plus the most specific detail available (page
/// title, else server header, else nothing).
pub fn format(services: &[DiscoveredService]) -> String {
    if services.is_empty() {
        return "No services discovered.".to_string();
    }

    let mut out = String::new();
    for (i, service) in services.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{} {}\n",
            icon(service.kind.protocol()),
            service.name
        ));
        out.push_str(&format!(
            "   {}:{} • {}",
            service.host,
            service.port,
            service.kind.protocol()
        ));
        if let Some(detail) = detail_of(service) {
            out.push_str(&format!(" • {detail}"));
        }
        out.push('\n');
    }
    out
}

fn detail_of(service: &DiscoveredService) -> Option<&str> {
    let details = service.kind.details()?;
    details.title.as_deref().or(details.server.as_deref())
}

fn icon(protocol: Protocol) -> &'static str {
    match protocol {
        Protocol::Http => "🌐",
        Protocol::Https => "🔒",
        Protocol::Redis => "⚡",
        Protocol::Postgres => "🐘",
        Protocol::Mysql => "🗄",
        Protocol::Mongodb => "🍃",
        Protocol::Ssh => "🔑",
        Protocol::Unknown => "🔌",
    }
}

/// Writes rendered results to stdout or a file in the chosen format.
pub struct OutputWriter {
    format: OutputFormat,
    file: Option<PathBuf>,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, file: Option<PathBuf>) -> Self {
        Self { format, file }
    }

    pub fn write(&self, services: &[DiscoveredService]) -> Result<()> {
        let output = match self.format {
            OutputFormat::Human => format(services),
            OutputFormat::Json => serde_json::to_string_pretty(services)?,
        };

        match &self.file {
            Some(path) => {
                let file = File::create(path)?;
                let mut writer = BufWriter::new(file);
                writer.write_all(output.as_bytes())?;
                writer.flush()?;
            }
            None => {
                println!("{output}");
                io::stdout().flush()?;
            }
        }

        Ok(())
    }
}
