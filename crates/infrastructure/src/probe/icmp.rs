use super::reachability::ReachabilityCheck;
use async_trait::async_trait;
use hostpulse_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::debug;

const ICMPV4_ECHO_REQUEST: u8 = 8;
const ICMPV4_ECHO_REPLY: u8 = 0;
const ICMPV6_ECHO_REQUEST: u8 = 128;
const ICMPV6_ECHO_REPLY: u8 = 129;

const HEADER_LEN: usize = 8;
const PAYLOAD_LEN: usize = 16;
const RECV_BUFFER_LEN: usize = 512;

/// Single ICMP echo over an unprivileged datagram ICMP socket.
///
/// Needs `net.ipv4.ping_group_range` to cover the process group on Linux.
/// When the socket cannot be opened the check fails with
/// `ProbeUnavailable` so a fallback can take over.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcmpEcho;

impl IcmpEcho {
    pub fn new() -> Self {
        Self
    }

    fn open_socket(address: IpAddr) -> Result<UdpSocket, DomainError> {
        use socket2::{Domain, Protocol, Socket, Type};

        let (domain, protocol) = match address {
            IpAddr::V4(_) => (Domain::IPV4, Protocol::ICMPV4),
            IpAddr::V6(_) => (Domain::IPV6, Protocol::ICMPV6),
        };

        let socket = Socket::new(domain, Type::DGRAM, Some(protocol))
            .map_err(|e| DomainError::ProbeUnavailable(format!("ICMP socket: {}", e)))?;
        socket
            .set_nonblocking(true)
            .map_err(|e| DomainError::ProbeUnavailable(format!("ICMP socket: {}", e)))?;

        let std_socket: std::net::UdpSocket = socket.into();
        UdpSocket::from_std(std_socket)
            .map_err(|e| DomainError::ProbeUnavailable(format!("ICMP socket: {}", e)))
    }
}

#[async_trait]
impl ReachabilityCheck for IcmpEcho {
    fn name(&self) -> &'static str {
        "icmp"
    }

    async fn check(&self, address: IpAddr, timeout: Duration) -> Result<bool, DomainError> {
        let socket = Self::open_socket(address)?;

        let sequence = fastrand::u16(..);
        let payload: [u8; PAYLOAD_LEN] = fastrand::u128(..).to_be_bytes();
        let packet = build_echo_request(address.is_ipv4(), sequence, &payload);

        socket
            .send_to(&packet, SocketAddr::new(address, 0))
            .await
            .map_err(|e| DomainError::IoError(format!("ICMP send to {}: {}", address, e)))?;

        let deadline = Instant::now() + timeout;
        let mut buf = [0u8; RECV_BUFFER_LEN];
        loop {
            let received =
                match tokio::time::timeout_at(deadline, socket.recv_from(&mut buf)).await {
                    Err(_) => {
                        debug!(address = %address, "ICMP echo timed out");
                        return Ok(false);
                    }
                    Ok(Err(e)) => {
                        return Err(DomainError::IoError(format!(
                            "ICMP recv from {}: {}",
                            address, e
                        )))
                    }
                    Ok(Ok((len, from))) if from.ip() == address => len,
                    Ok(Ok(_)) => continue,
                };

            if is_matching_reply(&buf[..received], address.is_ipv4(), sequence, &payload) {
                return Ok(true);
            }
        }
    }
}

/// Echo request bytes. The identifier is left for the kernel to assign on
/// datagram ICMP sockets; ICMPv6 checksums are also kernel-computed.
pub(crate) fn build_echo_request(ipv4: bool, sequence: u16, payload: &[u8]) -> Vec<u8> {
    let mut packet = Vec::with_capacity(HEADER_LEN + payload.len());
    packet.push(if ipv4 {
        ICMPV4_ECHO_REQUEST
    } else {
        ICMPV6_ECHO_REQUEST
    });
    packet.push(0);
    packet.extend_from_slice(&[0, 0]);
    packet.extend_from_slice(&[0, 0]);
    packet.extend_from_slice(&sequence.to_be_bytes());
    packet.extend_from_slice(payload);

    if ipv4 {
        let sum = checksum(&packet);
        packet[2..4].copy_from_slice(&sum.to_be_bytes());
    }
    packet
}

/// Matches an echo reply by type, sequence and payload. Some platforms prefix
/// IPv4 replies with the IP header even on datagram sockets.
pub(crate) fn is_matching_reply(data: &[u8], ipv4: bool, sequence: u16, payload: &[u8]) -> bool {
    let icmp = if ipv4 && data.first().is_some_and(|b| b >> 4 == 4) {
        let ihl = usize::from(data[0] & 0x0f) * 4;
        match data.get(ihl..) {
            Some(rest) => rest,
            None => return false,
        }
    } else {
        data
    };

    if icmp.len() < HEADER_LEN + payload.len() {
        return false;
    }

    let expected_type = if ipv4 {
        ICMPV4_ECHO_REPLY
    } else {
        ICMPV6_ECHO_REPLY
    };

    icmp[0] == expected_type
        && icmp[6..8] == sequence.to_be_bytes()
        && &icmp[HEADER_LEN..HEADER_LEN + payload.len()] == payload
}

fn checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = data
        .chunks(2)
        .map(|pair| match pair {
            [hi, lo] => u32::from(u16::from_be_bytes([*hi, *lo])),
            [hi] => u32::from(*hi) << 8,
            _ => 0,
        })
        .sum();
    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    !(sum as u16)
}
