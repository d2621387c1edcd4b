//! Core building blocks for casting local audio: mDNS service discovery,
//! ephemeral HTTP media hosting, MIME sniffing, and outbound-address
//! resolution.

pub mod config;
pub mod discovery;
pub mod host;
pub mod net;
pub mod sniff;

pub use discovery::{discover, DiscoveryError, ServiceLocation};
pub use host::{host_bytes, host_file, HostError, MediaHost};
