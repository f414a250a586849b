use std::net::Ipv4Addr;

use super::checksum::checksum;
use super::ip::{Ipv4Header, TCP_PROTOCOL_NUM};
use super::tcp::TCP_CHECKSUM_OFFSET;

pub const PSEUDO_HEADER_LEN: usize = 12;

/// The RFC 793 pseudo-header. Only ever fed to the checksum, never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoHeader {
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub protocol: u8,
    /// TCP header plus payload, in bytes.
    pub tcp_length: u16,
}

impl PseudoHeader {
    pub fn new(ip: &Ipv4Header, tcp_length: u16) -> PseudoHeader {
        PseudoHeader {
            source: ip.source,
            destination: ip.destination,
            protocol: TCP_PROTOCOL_NUM,
            tcp_length,
        }
    }

    /// `[source (4)] [destination (4)] [zero (1)] [protocol (1)] [tcp length (2)]`
    pub fn encode(&self) -> [u8; PSEUDO_HEADER_LEN] {
        let mut buffer = [0u8; PSEUDO_HEADER_LEN];
        buffer[0..4].copy_from_slice(&self.source.octets());
        buffer[4..8].copy_from_slice(&self.destination.octets());
        buffer[9] = self.protocol;
        buffer[10..12].copy_from_slice(&self.tcp_length.to_be_bytes());
        buffer
    }
}

/// Computes the TCP checksum (RFC 793) for `tcp_header` and `payload` sent
/// with the addresses in `ip`.
///
/// The checksum field inside `tcp_header` is treated as zero whatever it
/// currently holds, so the result can be written straight back into it.
pub fn tcp_checksum(ip: &Ipv4Header, tcp_header: &[u8], payload: &[u8]) -> u16 {
    let tcp_length = (tcp_header.len() + payload.len()) as u16;
    let pseudo_header = PseudoHeader::new(ip, tcp_length);

    let mut checksum_buffer =
        Vec::with_capacity(PSEUDO_HEADER_LEN + tcp_header.len() + payload.len());
    checksum_buffer.extend_from_slice(&pseudo_header.encode());
    let header_start = checksum_buffer.len();
    checksum_buffer.extend_from_slice(tcp_header);
    if let Some(field) = checksum_buffer
        .get_mut(header_start + TCP_CHECKSUM_OFFSET..header_start + TCP_CHECKSUM_OFFSET + 2)
    {
        field.fill(0);
    }
    checksum_buffer.extend_from_slice(payload);

    checksum(&checksum_buffer)
}

/// Checks a received segment (header and payload, checksum field as
/// received) against the addresses in `ip`.
pub fn verify_tcp_checksum(ip: &Ipv4Header, segment: &[u8]) -> bool {
    let pseudo_header = PseudoHeader::new(ip, segment.len() as u16);

    let mut checksum_buffer = Vec::with_capacity(PSEUDO_HEADER_LEN + segment.len());
    checksum_buffer.extend_from_slice(&pseudo_header.encode());
    checksum_buffer.extend_from_slice(segment);

    checksum(&checksum_buffer) == 0
}
