use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use hickory_proto::error::ProtoError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RData, RecordType};
use thiserror::Error;
use tokio::net::UdpSocket;
use tracing::{debug, info};

/// mDNS multicast group (RFC 6762).
const MDNS_GROUP: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(224, 0, 0, 251), 5353);

/// mDNS responses larger than this are a protocol violation and get truncated.
const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Resolved location of a discovered service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceLocation {
    pub addr: Ipv4Addr,
    pub port: u16,
}

impl std::fmt::Display for ServiceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("mDNS socket error: {0}")]
    Socket(#[from] std::io::Error),
    #[error("DNS message error: {0}")]
    Protocol(#[from] ProtoError),
    #[error("no mDNS reply within {0:?}")]
    Timeout(Duration),
    #[error("reply carried no usable SRV/A record pair")]
    Incomplete,
}

/// Resolve a DNS-SD service type (e.g. `_googlecast._tcp`) to an address and
/// port via a one-shot mDNS PTR query. Waits for at most one reply within
/// `timeout`; there is no retry.
pub async fn discover(
    service_type: &str,
    timeout: Duration,
) -> Result<ServiceLocation, DiscoveryError> {
    discover_at(service_type, SocketAddr::V4(MDNS_GROUP), timeout).await
}

/// Same as [`discover`] but with an explicit query target, so tests can stand
/// in a loopback responder for the multicast group.
async fn discover_at(
    service_type: &str,
    target: SocketAddr,
    timeout: Duration,
) -> Result<ServiceLocation, DiscoveryError> {
    let query = build_query(service_type)?;

    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.send_to(&query, target).await?;
    debug!(service_type, %target, "mDNS query sent");

    let mut buf = vec![0u8; MAX_RESPONSE_BYTES];
    let (len, from) = tokio::time::timeout(timeout, socket.recv_from(&mut buf))
        .await
        .map_err(|_| DiscoveryError::Timeout(timeout))??;

    let reply = Message::from_vec(&buf[..len])?;
    let location = extract_location(&reply)?;
    info!(service_type, %from, %location, "service resolved");
    Ok(location)
}

/// Build the wire form of a single-question PTR query for
/// `<service_type>.local.`.
fn build_query(service_type: &str) -> Result<Vec<u8>, DiscoveryError> {
    let name = Name::from_utf8(format!("{service_type}.local."))?;

    let mut message = Message::new();
    message
        .set_id(0)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(false)
        .add_query(Query::query(name, RecordType::PTR));

    Ok(message.to_vec()?)
}

/// Scan every record in the additional section: SRV records contribute the
/// port, A records the address. The last record of each kind wins; the scan
/// never stops early. A reply missing either kind is an incomplete discovery,
/// not a partial success.
fn extract_location(reply: &Message) -> Result<ServiceLocation, DiscoveryError> {
    let mut addr = None;
    let mut port = None;

    for record in reply.additionals() {
        match record.data() {
            Some(RData::SRV(srv)) => port = Some(srv.port()),
            Some(RData::A(a)) => addr = Some(a.0),
            _ => {}
        }
    }

    match (addr, port) {
        (Some(addr), Some(port)) => Ok(ServiceLocation { addr, port }),
        _ => Err(DiscoveryError::Incomplete),
    }
}
