use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

use super::probes::http::HttpProber;
use super::probes::postgres::{PostgresProbe, POSTGRES_PORT};
use super::probes::redis::{RedisProbe, REDIS_PORT};
use super::probes::WireProbe;
use super::results::{CandidatePort, Protocol, ServiceKind};

/// Plaintext web-dev ports probed as HTTP even without a hint.
pub const HTTP_PORTS: &[u16] = &[80, 3000, 3001, 4200, 5000, 5173, 8000, 8080, 8888];

/// Ports probed as HTTPS even without a hint.
pub const HTTPS_PORTS: &[u16] = &[443, 8443];

/// Which handshake(s) a confirmed-open port gets. First matching branch
/// wins and only that branch runs, except the documented HTTP-to-TLS
/// fallback inside the web branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Wire(Protocol),
    Https,
    HttpWithTlsFallback,
    PassThrough,
}

/// Pure dispatch decision for a candidate.
///
/// The web branches key off raw port membership while the database
/// branches key off hint-or-exact-standard-port, so a caller-supplied
/// 8080 can still classify as web but a Redis instance on an unusual
/// port stays at its hint. That asymmetry is product behavior; keep it.
pub fn route(candidate: CandidatePort) -> Route {
    let CandidatePort { port, hint } = candidate;
    if hint == Protocol::Redis || port == REDIS_PORT {
        Route::Wire(Protocol::Redis)
    } else if hint == Protocol::Postgres || port == POSTGRES_PORT {
        Route::Wire(Protocol::Postgres)
    } else if hint == Protocol::Https || HTTPS_PORTS.contains(&port) {
        Route::Https
    } else if hint == Protocol::Http || HTTP_PORTS.contains(&port) {
        Route::HttpWithTlsFallback
    } else {
        Route::PassThrough
    }
}

/// Runs the handshake(s) a route calls for and settles on a kind.
/// Classification is purely additive: an open port that fails every
/// applicable probe still keeps its hinted kind.
pub struct Classifier {
    wire: Vec<Box<dyn WireProbe>>,
    web: HttpProber,
    probe_timeout: Duration,
}

impl Classifier {
    pub fn new(probe_timeout: Duration) -> Self {
        let wire: Vec<Box<dyn WireProbe>> = vec![Box::new(RedisProbe), Box::new(PostgresProbe)];
        Self {
            wire,
            web: HttpProber::new(probe_timeout),
            probe_timeout,
        }
    }

    pub async fn classify(
        &self,
        host: &str,
        addr: SocketAddr,
        candidate: CandidatePort,
    ) -> ServiceKind {
        match route(candidate) {
            Route::Wire(protocol) => {
                for probe in &self.wire {
                    if probe.protocol() == protocol {
                        if probe.confirm(addr, self.probe_timeout).await {
                            return ServiceKind::from_hint(protocol);
                        }
                        break;
                    }
                }
            }
            Route::Https => {
                if let Some(details) = self.web.fetch(host, candidate.port, true).await {
                    return ServiceKind::Https {
                        details: Some(details),
                    };
                }
            }
            Route::HttpWithTlsFallback => {
                if let Some(details) = self.web.fetch(host, candidate.port, false).await {
                    return ServiceKind::Http {
                        details: Some(details),
                    };
                }
                // Covers services that bind a plaintext-looking port but
                // actually speak TLS.
                if let Some(details) = self.web.fetch(host, candidate.port, true).await {
                    debug!(port = candidate.port, "plaintext probe failed, TLS fallback matched");
                    return ServiceKind::Https {
                        details: Some(details),
                    };
                }
            }
            Route::PassThrough => {}
        }
        ServiceKind::from_hint(candidate.hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(port: u16, hint: Protocol) -> CandidatePort {
        CandidatePort::new(port, hint)
    }

    #[test]
    fn standard_database_ports_route_to_wire_probes() {
        assert_eq!(route(candidate(6379, Protocol::Unknown)), Route::Wire(Protocol::Redis));
        assert_eq!(route(candidate(5432, Protocol::Unknown)), Route::Wire(Protocol::Postgres));
    }

    #[test]
    fn hints_route_regardless_of_port() {
        assert_eq!(route(candidate(9999, Protocol::Redis)), Route::Wire(Protocol::Redis));
        assert_eq!(route(candidate(9999, Protocol::Postgres)), Route::Wire(Protocol::Postgres));
        assert_eq!(route(candidate(9999, Protocol::Https)), Route::Https);
        assert_eq!(route(candidate(9999, Protocol::Http)), Route::HttpWithTlsFallback);
    }

    #[test]
    fn database_branches_outrank_web_branches() {
        // 6379 with an http hint still goes to the redis probe first.
        assert_eq!(route(candidate(6379, Protocol::Http)), Route::Wire(Protocol::Redis));
    }

    #[test]
    fn well_known_web_ports_route_without_hints() {
        assert_eq!(route(candidate(443, Protocol::Unknown)), Route::Https);
        assert_eq!(route(candidate(8443, Protocol::Unknown)), Route::Https);
        assert_eq!(route(candidate(8080, Protocol::Unknown)), Route::HttpWithTlsFallback);
        assert_eq!(route(candidate(3000, Protocol::Unknown)), Route::HttpWithTlsFallback);
    }

    #[test]
    fn custom_port_asymmetry_is_preserved() {
        // A caller-supplied web-looking port still gets web probing, but an
        // unhinted non-standard port gets nothing at all.
        assert_eq!(route(candidate(8080, Protocol::Unknown)), Route::HttpWithTlsFallback);
        assert_eq!(route(candidate(7777, Protocol::Unknown)), Route::PassThrough);
    }

    #[test]
    fn passthrough_for_hint_only_families() {
        assert_eq!(route(candidate(3306, Protocol::Mysql)), Route::PassThrough);
        assert_eq!(route(candidate(27017, Protocol::Mongodb)), Route::PassThrough);
        assert_eq!(route(candidate(22, Protocol::Ssh)), Route::PassThrough);
    }
}
