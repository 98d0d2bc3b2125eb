pub mod cli;
pub mod discovery;
pub mod network;
pub mod output;
pub mod ports;

pub use discovery::cache::DiscoveryCache;
pub use discovery::results::{
    CandidatePort, DiscoveredService, HttpDetails, Protocol, ServiceKind,
};
pub use discovery::{DiscoveryEngine, ScanConfig};
pub use output::format;
