use anyhow::{anyhow, bail, Result};

use crate::discovery::results::{CandidatePort, Protocol};

/// Built-in candidate table: common web-dev ports, the four database
/// families, and SSH. Used whenever the caller does not supply ports.
pub fn well_known_ports() -> Vec<CandidatePort> {
    const TABLE: &[(u16, Protocol)] = &[
        (22, Protocol::Ssh),
        (80, Protocol::Http),
        (443, Protocol::Https),
        (3000, Protocol::Http),
        (3001, Protocol::Http),
        (3306, Protocol::Mysql),
        (4200, Protocol::Http),
        (5000, Protocol::Http),
        (5173, Protocol::Http),
        (5432, Protocol::Postgres),
        (6379, Protocol::Redis),
        (8000, Protocol::Http),
        (8080, Protocol::Http),
        (8443, Protocol::Https),
        (8888, Protocol::Http),
        (27017, Protocol::Mongodb),
    ];
    TABLE
        .iter()
        .map(|&(port, hint)| CandidatePort::new(port, hint))
        .collect()
}

/// Parse a CLI port spec like `3000,5432,8000-8010` into a deduplicated
/// list, preserving first-seen order.
pub fn parse_port_spec(spec: &str) -> Result<Vec<u16>> {
    let mut out = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((start, end)) = part.split_once('-') {
            let start = parse_port(start.trim())?;
            let end = parse_port(end.trim())?;
            if start > end {
                bail!("invalid port range {start}-{end} (start > end)");
            }
            for port in start..=end {
                if seen.insert(port) {
                    out.push(port);
                }
            }
        } else {
            let port = parse_port(part)?;
            if seen.insert(port) {
                out.push(port);
            }
        }
    }

    if out.is_empty() {
        bail!("port spec contained no ports: {spec}");
    }
    Ok(out)
}

fn parse_port(s: &str) -> Result<u16> {
    let value: u32 = s.parse().map_err(|_| anyhow!("invalid port value: {s}"))?;
    if value == 0 || value > 65535 {
        bail!("port out of range: {value}");
    }
    Ok(value as u16)
}
