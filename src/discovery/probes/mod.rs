// Protocol handshake probes run after liveness is confirmed.
// Each opens its own connection; one attempt, no backoff, no retry.

pub mod http;
pub mod postgres;
pub mod redis;

use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;

use super::results::Protocol;

/// Default per-probe timeout in milliseconds.
pub const PROBE_TIMEOUT_MS: u64 = 1000;

/// A raw-TCP handshake that yields a yes/no verdict for one port.
///
/// The caller has already confirmed liveness, but a port closing in
/// between the two checks simply reads as a non-match.
#[async_trait]
pub trait WireProbe: Send + Sync {
    /// Family confirmed by this probe.
    fn protocol(&self) -> Protocol;

    /// Standard port that triggers this probe even without a hint.
    fn standard_port(&self) -> u16;

    async fn confirm(&self, addr: SocketAddr, probe_timeout: Duration) -> bool;
}
