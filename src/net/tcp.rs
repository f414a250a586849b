use std::fmt;

use super::ip::Ipv4Header;
use super::pseudo::tcp_checksum;
use crate::error::DecodeError;

/// Fixed TCP header length in bytes (data offset = 5, no options).
pub const TCP_HEADER_LEN: usize = 20;
/// Byte offset of the checksum inside the TCP header.
pub const TCP_CHECKSUM_OFFSET: usize = 16;
/// Byte offset of the control flags inside the TCP header.
pub const TCP_FLAGS_OFFSET: usize = 13;
/// Receive window advertised on the outbound SYN.
pub const SYN_WINDOW: u16 = 5840;

pub const FLAG_FIN: u8 = 0x01;
pub const FLAG_SYN: u8 = 0x02;
pub const FLAG_RST: u8 = 0x04;
pub const FLAG_PSH: u8 = 0x08;
pub const FLAG_ACK: u8 = 0x10;
pub const FLAG_URG: u8 = 0x20;

/// Represents the structure of a TCP header without options.
///
/// Wire layout, multi-byte fields big-endian:
///
/// ```text
///   [0..2]   source port
///   [2..4]   destination port
///   [4..8]   sequence number
///   [8..12]  acknowledgment number
///   [12]     data offset (hi nibble) | reserved
///   [13]     flags: CWR ECE URG ACK PSH RST SYN FIN
///   [14..16] window
///   [16..18] checksum
///   [18..20] urgent pointer
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpHeader {
    /// Source port (16 bits)
    pub source_port: u16,
    /// Destination port (16 bits)
    pub destination_port: u16,
    /// Sequence number (32 bits)
    pub sequence_number: u32,
    /// Acknowledgment number (32 bits)
    pub ack_number: u32,
    /// Data offset (4 bits) - Number of 32-bit words in header
    pub data_offset: u8,
    pub flags_urg: bool, // Urgent
    pub flags_ack: bool, // Acknowledgment
    pub flags_psh: bool, // Push
    pub flags_rst: bool, // Reset
    pub flags_syn: bool, // Synchronize
    pub flags_fin: bool, // Finish
    /// Window size (16 bits)
    pub window: u16,
    /// Checksum (16 bits)
    pub checksum: u16,
    /// Urgent pointer (16 bits)
    pub urgent_pointer: u16,
}

impl TcpHeader {
    /// Opening segment of a handshake: only SYN set, nothing acknowledged,
    /// checksum still zero.
    pub fn syn(source_port: u16, destination_port: u16, sequence_number: u32) -> TcpHeader {
        TcpHeader {
            source_port,
            destination_port,
            sequence_number,
            ack_number: 0,
            data_offset: 5,
            flags_urg: false,
            flags_ack: false,
            flags_psh: false,
            flags_rst: false,
            flags_syn: true,
            flags_fin: false,
            window: SYN_WINDOW,
            checksum: 0,
            urgent_pointer: 0,
        }
    }

    /// Flags packed into the wire byte. CWR and ECE are always clear.
    pub fn flags(&self) -> u8 {
        ((self.flags_urg as u8) << 5)
            | ((self.flags_ack as u8) << 4)
            | ((self.flags_psh as u8) << 3)
            | ((self.flags_rst as u8) << 2)
            | ((self.flags_syn as u8) << 1)
            | (self.flags_fin as u8)
    }

    pub fn is_syn_ack(&self) -> bool {
        self.flags_syn && self.flags_ack
    }

    /// Header length in bytes as announced by the data offset.
    pub fn header_len(&self) -> usize {
        usize::from(self.data_offset) * 4
    }

    /// Serializes the header. The checksum field is written as stored.
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(TCP_HEADER_LEN);

        buffer.extend_from_slice(&self.source_port.to_be_bytes());
        buffer.extend_from_slice(&self.destination_port.to_be_bytes());
        buffer.extend_from_slice(&self.sequence_number.to_be_bytes());
        buffer.extend_from_slice(&self.ack_number.to_be_bytes());
        buffer.push(self.data_offset << 4);
        buffer.push(self.flags());
        buffer.extend_from_slice(&self.window.to_be_bytes());
        buffer.extend_from_slice(&self.checksum.to_be_bytes());
        buffer.extend_from_slice(&self.urgent_pointer.to_be_bytes());

        buffer
    }

    /// Reads the fixed header fields from the front of `buffer`. No field is
    /// validated and options are not parsed.
    pub fn decode(buffer: &[u8]) -> Result<TcpHeader, DecodeError> {
        let b: &[u8; TCP_HEADER_LEN] = buffer
            .get(..TCP_HEADER_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or(DecodeError::TruncatedBuffer {
                header: "TCP",
                needed: TCP_HEADER_LEN,
                actual: buffer.len(),
            })?;

        let flags = b[TCP_FLAGS_OFFSET];

        Ok(TcpHeader {
            source_port: u16::from_be_bytes([b[0], b[1]]),
            destination_port: u16::from_be_bytes([b[2], b[3]]),
            sequence_number: u32::from_be_bytes([b[4], b[5], b[6], b[7]]),
            ack_number: u32::from_be_bytes([b[8], b[9], b[10], b[11]]),
            data_offset: b[12] >> 4,
            flags_urg: flags & FLAG_URG != 0,
            flags_ack: flags & FLAG_ACK != 0,
            flags_psh: flags & FLAG_PSH != 0,
            flags_rst: flags & FLAG_RST != 0,
            flags_syn: flags & FLAG_SYN != 0,
            flags_fin: flags & FLAG_FIN != 0,
            window: u16::from_be_bytes([b[14], b[15]]),
            checksum: u16::from_be_bytes([b[16], b[17]]),
            urgent_pointer: u16::from_be_bytes([b[18], b[19]]),
        })
    }

    /// Computes the checksum over pseudo-header, header and `payload`, and
    /// stores it.
    pub fn fill_checksum(&mut self, ip: &Ipv4Header, payload: &[u8]) {
        self.checksum = tcp_checksum(ip, &self.encode(), payload);
    }
}

impl fmt::Display for TcpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TCP Header")?;
        writeln!(f, "   |-Source Port      : {}", self.source_port)?;
        writeln!(f, "   |-Destination Port : {}", self.destination_port)?;
        writeln!(f, "   |-Sequence Number  : {}", self.sequence_number)?;
        writeln!(f, "   |-Ack Number       : {}", self.ack_number)?;
        writeln!(
            f,
            "   |-Header Length    : {} words / {} bytes",
            self.data_offset,
            self.header_len()
        )?;
        writeln!(
            f,
            "   |-Flags            : URG={} ACK={} PSH={} RST={} SYN={} FIN={}",
            self.flags_urg as u8,
            self.flags_ack as u8,
            self.flags_psh as u8,
            self.flags_rst as u8,
            self.flags_syn as u8,
            self.flags_fin as u8,
        )?;
        writeln!(f, "   |-Window           : {}", self.window)?;
        writeln!(f, "   |-Checksum         : 0x{:04x}", self.checksum)?;
        write!(f, "   |-Urgent Pointer   : {}", self.urgent_pointer)
    }
}
