use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use super::WireProbe;
use crate::discovery::results::Protocol;

pub const POSTGRES_PORT: u16 = 5432;

/// SSLRequest code from the PostgreSQL wire protocol.
const SSL_REQUEST_CODE: u32 = 80877103;

/// Relational-DB handshake: send an SSLRequest packet and accept either of
/// the two protocol-conformant single-byte answers (`S` = SSL supported,
/// `N` = not supported). Both distinguish a real server of this family
/// from an arbitrary echo service.
pub struct PostgresProbe;

#[async_trait]
impl WireProbe for PostgresProbe {
    fn protocol(&self) -> Protocol {
        Protocol::Postgres
    }

    fn standard_port(&self) -> u16 {
        POSTGRES_PORT
    }

    async fn confirm(&self, addr: SocketAddr, probe_timeout: Duration) -> bool {
        let first = match timeout(probe_timeout, negotiate(addr)).await {
            Ok(Ok(Some(byte))) => byte,
            _ => return false,
        };
        let matched = first == b'S' || first == b'N';
        if matched {
            debug!(%addr, reply = %(first as char), "postgres ssl negotiation answered");
        }
        matched
    }
}

/// 8-byte big-endian SSLRequest: length 8, then the request code.
fn ssl_request() -> [u8; 8] {
    let mut packet = [0u8; 8];
    packet[..4].copy_from_slice(&8u32.to_be_bytes());
    packet[4..].copy_from_slice(&SSL_REQUEST_CODE.to_be_bytes());
    packet
}

async fn negotiate(addr: SocketAddr) -> std::io::Result<Option<u8>> {
    let mut stream = TcpStream::connect(addr).await?;
    stream.write_all(&ssl_request()).await?;
    let mut buf = [0u8; 16];
    let n = stream.read(&mut buf).await?;
    Ok(if n > 0 { Some(buf[0]) } else { None })
}
