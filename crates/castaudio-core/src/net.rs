use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use thiserror::Error;

/// Public address used to select the outbound interface. The socket is never
/// written to, so nothing is actually sent there.
const PROBE_ADDR: &str = "8.8.8.8:80";

#[derive(Debug, Error)]
pub enum NetError {
    #[error("failed to open probe socket: {0}")]
    Socket(std::io::Error),
    #[error("no usable route to the internet: {0}")]
    NoRoute(std::io::Error),
    #[error("outbound interface has no IPv4 address")]
    NoIpv4,
}

/// Returns the IPv4 address of the local interface the OS would pick to reach
/// the public internet. A UDP `connect` populates the local address without
/// any packet leaving the host.
pub fn outbound_ipv4() -> Result<Ipv4Addr, NetError> {
    let socket = UdpSocket::bind("0.0.0.0:0").map_err(NetError::Socket)?;
    socket.connect(PROBE_ADDR).map_err(NetError::NoRoute)?;
    let local = socket.local_addr().map_err(NetError::NoRoute)?;

    match local.ip() {
        IpAddr::V4(ip) => Ok(ip),
        IpAddr::V6(_) => Err(NetError::NoIpv4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbound_ipv4_is_not_unspecified() {
        let ip = outbound_ipv4().expect("host should have an outbound route");
        assert_ne!(ip, Ipv4Addr::UNSPECIFIED);
    }
}
