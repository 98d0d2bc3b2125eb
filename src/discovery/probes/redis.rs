use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use super::WireProbe;
use crate::discovery::results::Protocol;

pub const REDIS_PORT: u16 = 6379;

/// Key-value handshake: send `PING`, expect a RESP `+PONG` in the first
/// reply chunk. A server that delays its answer past the timeout reads as
/// a non-match.
pub struct RedisProbe;

#[async_trait]
impl WireProbe for RedisProbe {
    fn protocol(&self) -> Protocol {
        Protocol::Redis
    }

    fn standard_port(&self) -> u16 {
        REDIS_PORT
    }

    async fn confirm(&self, addr: SocketAddr, probe_timeout: Duration) -> bool {
        let reply = match timeout(probe_timeout, ping(addr)).await {
            Ok(Ok(reply)) => reply,
            _ => return false,
        };
        let matched = reply.contains("+PONG");
        if matched {
            debug!(%addr, "redis handshake confirmed");
        }
        matched
    }
}

/// One PING round trip; exactly one reply chunk is consulted.
async fn ping(addr: SocketAddr) -> std::io::Result<String> {
    let mut stream = TcpStream::connect(addr).await?;
    stream.write_all(b"PING\r\n").await?;
    let mut buf = vec![0u8; 256];
    let n = stream.read(&mut buf).await?;
    buf.truncate(n);
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
