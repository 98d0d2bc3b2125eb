use anyhow::{anyhow, Result};
use std::net::{IpAddr, ToSocketAddrs};

/// Resolve a host argument (IP literal or name) to a single address.
/// Resolution happens once per scan, up front.
pub fn resolve_host(host: &str) -> Result<IpAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let addr = format!("{host}:0")
        .to_socket_addrs()
        .map_err(|_| anyhow!("failed to resolve hostname: {host}"))?
        .next()
        .ok_or_else(|| anyhow!("no address found for hostname: {host}"))?;

    Ok(addr.ip())
}
