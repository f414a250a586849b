use std::fmt;
use std::net::Ipv4Addr;

use super::checksum::checksum;
use crate::error::DecodeError;

/// IANA protocol number for TCP.
pub const TCP_PROTOCOL_NUM: u8 = 6;
/// Fixed IPv4 header length in bytes (IHL = 5, no options).
pub const IPV4_HEADER_LEN: usize = 20;
/// Byte offset of the header checksum inside the IPv4 header.
pub const IP_CHECKSUM_OFFSET: usize = 10;
pub const DEFAULT_TTL: u8 = 64;

// Wire layout, all multi-byte fields big-endian:
//
//   [0]      version (hi nibble) | IHL (lo nibble)
//   [1]      type of service
//   [2..4]   total length
//   [4..6]   identification
//   [6..8]   flags (3 bits) | fragment offset (13 bits)
//   [8]      time to live
//   [9]      protocol
//   [10..12] header checksum
//   [12..16] source address
//   [16..20] destination address

/// A fixed 20 byte IPv4 header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Header {
    /// Version: 4 bits
    pub version: u8,
    /// Internet header length in 32-bit words: 4 bits
    pub ihl: u8,
    /// Type of service: 8 bits
    pub tos: u8,
    /// Total length of header and payload: 16 bits
    pub total_length: u16,
    /// Identification: 16 bits
    pub identification: u16,
    /// Flags: 3 bits
    pub flags: u8,
    /// Fragment offset: 13 bits
    pub frag_offset: u16,
    /// Time to live: 8 bits
    pub ttl: u8,
    /// Protocol: 8 bits
    pub proto: u8,
    /// Header checksum: 16 bits
    pub checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
}

impl Ipv4Header {
    /// Header for a TCP segment of `segment_len` bytes. No fragmentation,
    /// checksum left at zero.
    pub fn for_tcp(
        source: Ipv4Addr,
        destination: Ipv4Addr,
        segment_len: u16,
        identification: u16,
    ) -> Ipv4Header {
        Ipv4Header {
            version: 4,
            ihl: 5,
            tos: 0,
            total_length: IPV4_HEADER_LEN as u16 + segment_len,
            identification,
            flags: 0,
            frag_offset: 0,
            ttl: DEFAULT_TTL,
            proto: TCP_PROTOCOL_NUM,
            checksum: 0,
            source,
            destination,
        }
    }

    /// Serializes the header. The checksum field is written as stored.
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(IPV4_HEADER_LEN);

        buffer.push((self.version << 4) | (self.ihl & 0x0f));
        buffer.push(self.tos);
        buffer.extend_from_slice(&self.total_length.to_be_bytes());
        buffer.extend_from_slice(&self.identification.to_be_bytes());
        let flags_frag = (u16::from(self.flags & 0x07) << 13) | (self.frag_offset & 0x1fff);
        buffer.extend_from_slice(&flags_frag.to_be_bytes());
        buffer.push(self.ttl);
        buffer.push(self.proto);
        buffer.extend_from_slice(&self.checksum.to_be_bytes());
        buffer.extend_from_slice(&self.source.octets());
        buffer.extend_from_slice(&self.destination.octets());

        buffer
    }

    /// Reads the fixed header fields from the front of `buffer`.
    ///
    /// This is a structural read only: nothing is validated and options
    /// past byte 20 are not looked at.
    pub fn decode(buffer: &[u8]) -> Result<Ipv4Header, DecodeError> {
        let b: &[u8; IPV4_HEADER_LEN] = buffer
            .get(..IPV4_HEADER_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or(DecodeError::TruncatedBuffer {
                header: "IPv4",
                needed: IPV4_HEADER_LEN,
                actual: buffer.len(),
            })?;

        let flags_frag = u16::from_be_bytes([b[6], b[7]]);

        Ok(Ipv4Header {
            version: b[0] >> 4,
            ihl: b[0] & 0x0f,
            tos: b[1],
            total_length: u16::from_be_bytes([b[2], b[3]]),
            identification: u16::from_be_bytes([b[4], b[5]]),
            flags: (flags_frag >> 13) as u8,
            frag_offset: flags_frag & 0x1fff,
            ttl: b[8],
            proto: b[9],
            checksum: u16::from_be_bytes([b[10], b[11]]),
            source: Ipv4Addr::new(b[12], b[13], b[14], b[15]),
            destination: Ipv4Addr::new(b[16], b[17], b[18], b[19]),
        })
    }

    /// Header length in bytes as announced by IHL; where the payload starts.
    pub fn header_len(&self) -> usize {
        usize::from(self.ihl) * 4
    }

    pub fn is_tcp(&self) -> bool {
        self.proto == TCP_PROTOCOL_NUM
    }

    /// Computes the header checksum over the header with its checksum field
    /// zeroed and stores it.
    pub fn fill_checksum(&mut self) {
        let mut bytes = self.encode();
        bytes[IP_CHECKSUM_OFFSET..IP_CHECKSUM_OFFSET + 2].fill(0);
        self.checksum = checksum(&bytes);
    }

    /// True when the fixed 20 bytes sum to zero with the stored checksum.
    pub fn checksum_valid(&self) -> bool {
        checksum(&self.encode()) == 0
    }
}

impl fmt::Display for Ipv4Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IPv4 Header")?;
        writeln!(f, "   |-Version          : {}", self.version)?;
        writeln!(
            f,
            "   |-Header Length    : {} words / {} bytes",
            self.ihl,
            self.header_len()
        )?;
        writeln!(f, "   |-Type Of Service  : {}", self.tos)?;
        writeln!(f, "   |-Total Length     : {} bytes", self.total_length)?;
        writeln!(f, "   |-Identification   : {}", self.identification)?;
        writeln!(f, "   |-TTL              : {}", self.ttl)?;
        writeln!(f, "   |-Protocol         : {}", self.proto)?;
        writeln!(f, "   |-Checksum         : 0x{:04x}", self.checksum)?;
        writeln!(f, "   |-Source IP        : {}", self.source)?;
        write!(f, "   |-Destination IP   : {}", self.destination)
    }
}
