use std::mem::MaybeUninit;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tracing::debug;

use crate::error::ProbeError;

/// Largest datagram a raw IPv4 socket can hand back.
pub const MAX_PACKET_SIZE: usize = 65535;

/// Byte-in / byte-out channel the probe talks through.
///
/// The real implementation is a raw socket; tests substitute an in-memory
/// one. Dropping the transport releases it.
pub trait RawTransport {
    /// Sends a complete IPv4 datagram, header included.
    fn send(&mut self, packet: &[u8], destination: SocketAddr) -> Result<usize, ProbeError>;

    /// Blocks for the next inbound datagram, returning it with its sender.
    fn receive(&mut self, max_size: usize) -> Result<(Vec<u8>, Ipv4Addr), ProbeError>;

    /// `None` blocks forever. An expired timeout surfaces from `receive` as
    /// a `Transport` error of kind `WouldBlock` or `TimedOut`.
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<(), ProbeError>;

    fn close(self)
    where
        Self: Sized,
    {
    }
}

/// Raw IPv4 socket with `IP_HDRINCL` set, so the kernel sends our header
/// as written. Needs root or `CAP_NET_RAW`.
#[derive(Debug)]
pub struct RawSocketTransport {
    socket: Socket,
    recv_buffer: Vec<MaybeUninit<u8>>,
}

impl RawSocketTransport {
    pub fn open() -> Result<RawSocketTransport, ProbeError> {
        let socket = Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::TCP))
            .map_err(ProbeError::from_open)?;
        socket
            .set_header_included_v4(true)
            .map_err(ProbeError::from_open)?;
        debug!("raw socket opened with IP_HDRINCL");

        Ok(RawSocketTransport {
            socket,
            recv_buffer: Vec::new(),
        })
    }
}

/// First `max_size` slots of `buffer`, growing it only when it is too short.
fn recv_slice(buffer: &mut Vec<MaybeUninit<u8>>, max_size: usize) -> &mut [MaybeUninit<u8>] {
    if buffer.len() < max_size {
        buffer.resize(max_size, MaybeUninit::uninit());
    }
    &mut buffer[..max_size]
}

impl RawTransport for RawSocketTransport {
    fn send(&mut self, packet: &[u8], destination: SocketAddr) -> Result<usize, ProbeError> {
        let destination = SockAddr::from(destination);
        self.socket
            .send_to(packet, &destination)
            .map_err(|e| ProbeError::transport("send", e))
    }

    fn receive(&mut self, max_size: usize) -> Result<(Vec<u8>, Ipv4Addr), ProbeError> {
        let recv_buffer = recv_slice(&mut self.recv_buffer, max_size);
        let (received, from) = self
            .socket
            .recv_from(recv_buffer)
            .map_err(|e| ProbeError::transport("receive", e))?;

        // SAFETY: recv_from initialised the first `received` bytes.
        let packet = unsafe {
            std::slice::from_raw_parts(recv_buffer.as_ptr() as *const u8, received)
        }
        .to_vec();

        let source = match from.as_socket().map(|addr| addr.ip()) {
            Some(IpAddr::V4(ip)) => ip,
            _ => Ipv4Addr::UNSPECIFIED,
        };

        Ok((packet, source))
    }

    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<(), ProbeError> {
        self.socket
            .set_read_timeout(timeout)
            .map_err(|e| ProbeError::transport("set_read_timeout", e))
    }

    fn close(self) {
        debug!("closing raw socket");
        drop(self.socket);
    }
}
