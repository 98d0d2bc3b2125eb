use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio::time::{timeout, Duration};

/// Bare TCP connect attempt used only to decide whether a port accepts
/// connections. Refused, unreachable and timed-out all collapse to `false`;
/// the stream is dropped immediately on success so no descriptor outlives
/// the check.
pub async fn is_open(addr: SocketAddr, connect_timeout: Duration) -> bool {
    matches!(timeout(connect_timeout, TcpStream::connect(addr)).await, Ok(Ok(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn open_port_is_reported_open() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(is_open(addr, Duration::from_millis(1000)).await);
    }

    #[tokio::test]
    async fn closed_port_is_reported_closed() {
        // Bind then drop to get a port that is very likely closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        assert!(!is_open(addr, Duration::from_millis(1000)).await);
    }

    #[tokio::test]
    async fn unroutable_target_times_out_closed() {
        // TEST-NET-1 is reserved and should never answer.
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 80);
        let start = std::time::Instant::now();
        assert!(!is_open(addr, Duration::from_millis(200)).await);
        assert!(start.elapsed() < Duration::from_millis(1500));
    }
}
