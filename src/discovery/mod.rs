pub mod cache;
pub mod classifier;
pub mod liveness;
pub mod namer;
pub mod probes;
pub mod results;

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::network;
use crate::ports;
use self::cache::DiscoveryCache;
use self::classifier::Classifier;
use self::results::{CandidatePort, DiscoveredService, Protocol};

/// Host scanned when the caller does not name one.
pub const DEFAULT_HOST: &str = "localhost";

/// Knobs the engine consumes; owned and supplied by the caller.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Per-probe timeout in milliseconds, shared by liveness and handshakes.
    pub timeout_ms: u64,
    /// Ports probed concurrently as one unit; batches run sequentially.
    pub batch_size: usize,
    /// Render an in-scan progress bar (CLI use; hidden otherwise).
    pub progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_ms: probes::PROBE_TIMEOUT_MS,
            batch_size: 10,
            progress: false,
        }
    }
}

/// Public entry point wiring liveness, classification and naming into a
/// single ordered result list.
pub struct DiscoveryEngine {
    config: ScanConfig,
    classifier: Classifier,
}

impl DiscoveryEngine {
    pub fn new(config: ScanConfig) -> Self {
        let classifier = Classifier::new(Duration::from_millis(config.timeout_ms));
        Self { config, classifier }
    }

    /// Scan `host`, probing `custom_ports` (hinted unknown) or the built-in
    /// well-known table. Never errors: an unresolvable host or a dead port
    /// simply produces no entries.
    pub async fn discover(
        &self,
        host: &str,
        custom_ports: Option<&[u16]>,
    ) -> Vec<DiscoveredService> {
        let candidates: Vec<CandidatePort> = match custom_ports {
            Some(list) => list
                .iter()
                .map(|&port| CandidatePort::new(port, Protocol::Unknown))
                .collect(),
            None => ports::well_known_ports(),
        };

        let ip = match network::resolve_host(host) {
            Ok(ip) => ip,
            Err(err) => {
                warn!(host, %err, "skipping scan: host did not resolve");
                return Vec::new();
            }
        };

        let probe_timeout = Duration::from_millis(self.config.timeout_ms);
        let batch_size = self.config.batch_size.max(1);
        let bar = self.progress_bar(candidates.len() as u64);

        let mut services = Vec::new();
        // Batches run strictly one after another; within a batch the probes
        // are concurrent, and the collect below re-imposes candidate order
        // among the batch's survivors no matter who answered first.
        for batch in candidates.chunks(batch_size) {
            let settled = join_all(batch.iter().map(|&candidate| {
                let bar = bar.clone();
                async move {
                    let found = self.probe_candidate(host, ip, candidate, probe_timeout).await;
                    bar.inc(1);
                    found
                }
            }))
            .await;
            services.extend(settled.into_iter().flatten());
        }

        bar.finish_and_clear();
        info!(host, discovered = services.len(), "scan complete");
        services
    }

    /// Same as [`discover`](Self::discover), consulting and populating a
    /// caller-owned cache first.
    pub async fn discover_with_cache(
        &self,
        cache: &DiscoveryCache,
        host: &str,
        custom_ports: Option<&[u16]>,
    ) -> Vec<DiscoveredService> {
        let key = cache_key(host, custom_ports);
        if let Some(hit) = cache.get(&key) {
            debug!(host, "serving discovery results from cache");
            return hit;
        }
        let services = self.discover(host, custom_ports).await;
        cache.store(&key, services.clone());
        services
    }

    async fn probe_candidate(
        &self,
        host: &str,
        ip: IpAddr,
        candidate: CandidatePort,
        probe_timeout: Duration,
    ) -> Option<DiscoveredService> {
        let addr = SocketAddr::new(ip, candidate.port);
        if !liveness::is_open(addr, probe_timeout).await {
            return None;
        }
        debug!(port = candidate.port, hint = %candidate.hint, "port open, classifying");

        let kind = self.classifier.classify(host, addr, candidate).await;
        let name = namer::name(&kind, candidate.port);
        Some(DiscoveredService {
            host: host.to_string(),
            port: candidate.port,
            name,
            kind,
        })
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} ports probed")
        {
            bar.set_style(style);
        }
        bar
    }
}

fn cache_key(host: &str, custom_ports: Option<&[u16]>) -> String {
    match custom_ports {
        Some(list) => {
            let joined = list
                .iter()
                .map(u16::to_string)
                .collect::<Vec<_>>()
                .join(",");
            format!("{host}|{joined}")
        }
        None => host.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_separates_custom_port_sets() {
        assert_eq!(cache_key("localhost", None), "localhost");
        assert_eq!(cache_key("localhost", Some(&[80, 443])), "localhost|80,443");
        assert_ne!(
            cache_key("localhost", Some(&[80])),
            cache_key("localhost", Some(&[443]))
        );
    }
}
