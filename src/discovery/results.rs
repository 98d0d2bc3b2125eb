use serde::Serialize;

/// Protocol families the classifier can assign to an open port.
///
/// Only `Http`, `Https`, `Redis`, `Postgres` and `Unknown` are produced by
/// active probing; `Mysql`, `Mongodb` and `Ssh` ride along as hints from the
/// well-known-port table and pass through unchanged when the port is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
    Redis,
    Postgres,
    Mysql,
    Mongodb,
    Ssh,
    Unknown,
}

impl Protocol {
    /// Short label used when deriving a service name without an HTTP title.
    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Http => "web",
            Protocol::Https => "web-secure",
            Protocol::Redis => "redis",
            Protocol::Postgres => "postgres",
            Protocol::Mysql => "mysql",
            Protocol::Mongodb => "mongodb",
            Protocol::Ssh => "ssh",
            Protocol::Unknown => "service",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Http => write!(f, "http"),
            Protocol::Https => write!(f, "https"),
            Protocol::Redis => write!(f, "redis"),
            Protocol::Postgres => write!(f, "postgres"),
            Protocol::Mysql => write!(f, "mysql"),
            Protocol::Mongodb => write!(f, "mongodb"),
            Protocol::Ssh => write!(f, "ssh"),
            Protocol::Unknown => write!(f, "unknown"),
        }
    }
}

/// A port queued for probing, with its a-priori protocol expectation.
/// Built once at scan start; caller-supplied ports carry `Protocol::Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidatePort {
    pub port: u16,
    pub hint: Protocol,
}

impl CandidatePort {
    pub fn new(port: u16, hint: Protocol) -> Self {
        Self { port, hint }
    }
}

/// Extra identification pulled from a successful HTTP(S) exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpDetails {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Classified protocol for an open port. Only the web variants can carry
/// details, and they carry `None` when the port was merely hinted as web
/// but the exchange itself did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServiceKind {
    Http {
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<HttpDetails>,
    },
    Https {
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<HttpDetails>,
    },
    Redis,
    Postgres,
    Mysql,
    Mongodb,
    Ssh,
    Unknown,
}

impl ServiceKind {
    /// Kind for an open port whose probes all came up empty: the hint as-is.
    pub fn from_hint(hint: Protocol) -> Self {
        match hint {
            Protocol::Http => ServiceKind::Http { details: None },
            Protocol::Https => ServiceKind::Https { details: None },
            Protocol::Redis => ServiceKind::Redis,
            Protocol::Postgres => ServiceKind::Postgres,
            Protocol::Mysql => ServiceKind::Mysql,
            Protocol::Mongodb => ServiceKind::Mongodb,
            Protocol::Ssh => ServiceKind::Ssh,
            Protocol::Unknown => ServiceKind::Unknown,
        }
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            ServiceKind::Http { .. } => Protocol::Http,
            ServiceKind::Https { .. } => Protocol::Https,
            ServiceKind::Redis => Protocol::Redis,
            ServiceKind::Postgres => Protocol::Postgres,
            ServiceKind::Mysql => Protocol::Mysql,
            ServiceKind::Mongodb => Protocol::Mongodb,
            ServiceKind::Ssh => Protocol::Ssh,
            ServiceKind::Unknown => Protocol::Unknown,
        }
    }

    pub fn details(&self) -> Option<&HttpDetails> {
        match self {
            ServiceKind::Http { details } | ServiceKind::Https { details } => details.as_ref(),
            _ => None,
        }
    }
}

/// Terminal record for one confirmed-open port. `name` is always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredService {
    pub host: String,
    pub port: u16,
    pub name: String,
    #[serde(flatten)]
    pub kind: ServiceKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_display_is_lowercase() {
        assert_eq!(format!("{}", Protocol::Http), "http");
        assert_eq!(format!("{}", Protocol::Https), "https");
        assert_eq!(format!("{}", Protocol::Unknown), "unknown");
    }

    #[test]
    fn hint_passthrough_keeps_web_variants_detail_free() {
        let kind = ServiceKind::from_hint(Protocol::Http);
        assert_eq!(kind.protocol(), Protocol::Http);
        assert!(kind.details().is_none());
    }

    #[test]
    fn serialized_record_flattens_kind_tag() {
        let svc = DiscoveredService {
            host: "localhost".into(),
            port: 3000,
            name: "web-3000".into(),
            kind: ServiceKind::Http {
                details: Some(HttpDetails {
                    status: 200,
                    server: Some("nginx".into()),
                    title: None,
                }),
            },
        };
        let json = serde_json::to_value(&svc).unwrap();
        assert_eq!(json["type"], "http");
        assert_eq!(json["details"]["status"], 200);
        assert_eq!(json["details"]["server"], "nginx");
        assert!(json["details"].get("title").is_none());
    }

    #[test]
    fn non_web_kinds_serialize_without_details() {
        let svc = DiscoveredService {
            host: "localhost".into(),
            port: 6379,
            name: "redis-6379".into(),
            kind: ServiceKind::Redis,
        };
        let json = serde_json::to_value(&svc).unwrap();
        assert_eq!(json["type"], "redis");
        assert!(json.get("details").is_none());
    }
}
