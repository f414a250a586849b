use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::error::{DecodeError, ProbeError};
use crate::hextools::format_hexdump;
use crate::net::ip::{Ipv4Header, IPV4_HEADER_LEN};
use crate::net::pseudo::verify_tcp_checksum;
use crate::net::tcp::{TcpHeader, TCP_HEADER_LEN};
use crate::transport::{RawTransport, MAX_PACKET_SIZE};

/// Read timeouts are never shorter than this; a zero socket timeout means
/// "block forever".
const MIN_READ_TIMEOUT: Duration = Duration::from_millis(1);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Who we probe and from where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTarget {
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub source_port: u16,
    pub destination_port: u16,
}

impl ProbeTarget {
    /// Parses dotted-decimal addresses and decimal ports.
    pub fn parse(
        source: &str,
        destination: &str,
        source_port: &str,
        destination_port: &str,
    ) -> Result<ProbeTarget, ProbeError> {
        Ok(ProbeTarget {
            source: parse_addr("source address", source)?,
            destination: parse_addr("destination address", destination)?,
            source_port: parse_port("source port", source_port)?,
            destination_port: parse_port("destination port", destination_port)?,
        })
    }

    pub fn destination_socket(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.destination, self.destination_port))
    }

    /// True when the segment travels the reverse direction of our probe.
    pub fn is_reply(&self, from: Ipv4Addr, tcp: &TcpHeader) -> bool {
        from == self.destination
            && tcp.source_port == self.destination_port
            && tcp.destination_port == self.source_port
    }
}

fn parse_addr(what: &str, value: &str) -> Result<Ipv4Addr, ProbeError> {
    value
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| {
            ProbeError::InvalidArgument(format!(
                "{what} {value:?} is not a dotted-decimal IPv4 address"
            ))
        })
}

fn parse_port(what: &str, value: &str) -> Result<u16, ProbeError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| ProbeError::InvalidArgument(format!("{what} {value:?} is not in 0-65535")))
}

/// How long the driver keeps listening for a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenPolicy {
    #[default]
    Forever,
    Deadline(Duration),
}

/// Which inbound segments may end the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowFilter {
    /// Every TCP segment the raw socket sees is considered.
    #[default]
    Promiscuous,
    /// Only segments coming back on the probe's own flow.
    ProbeFlow,
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub listen: ListenPolicy,
    pub filter: FlowFilter,
    /// Read slice used while a cancel flag is installed.
    pub poll_interval: Duration,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            listen: ListenPolicy::Forever,
            filter: FlowFilter::Promiscuous,
            poll_interval: DEFAULT_POLL_INTERVAL,
            cancel: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Idle,
    Sent,
    Listening,
    Classified,
    TimedOut,
    Cancelled,
    TransportError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Outside the probe's flow.
    Unrelated,
    SynAckReceived,
    Other,
}

/// A decoded inbound segment and what we made of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub classification: Classification,
    pub from: Ipv4Addr,
    pub ip: Ipv4Header,
    pub tcp: TcpHeader,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    SynAck(ProbeResult),
    TimedOut { waited: Duration },
    Cancelled,
}

/// The outbound SYN, headers plus the 40 bytes that go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynPacket {
    pub ip: Ipv4Header,
    pub tcp: TcpHeader,
    pub bytes: Vec<u8>,
}

/// Builds the SYN datagram for `target` with both checksums filled in.
pub fn build_syn_packet(target: &ProbeTarget, identification: u16, sequence: u32) -> SynPacket {
    let mut ip = Ipv4Header::for_tcp(
        target.source,
        target.destination,
        TCP_HEADER_LEN as u16,
        identification,
    );
    ip.fill_checksum();

    let mut tcp = TcpHeader::syn(target.source_port, target.destination_port, sequence);
    tcp.fill_checksum(&ip, &[]);

    let mut bytes = Vec::with_capacity(IPV4_HEADER_LEN + TCP_HEADER_LEN);
    bytes.extend_from_slice(&ip.encode());
    bytes.extend_from_slice(&tcp.encode());

    SynPacket { ip, tcp, bytes }
}

/// Decodes an inbound datagram. `Ok(None)` when it does not carry TCP.
pub fn decode_inbound(packet: &[u8]) -> Result<Option<(Ipv4Header, TcpHeader)>, DecodeError> {
    let ip = Ipv4Header::decode(packet)?;
    if !ip.is_tcp() {
        return Ok(None);
    }
    let segment = packet.get(ip.header_len()..).unwrap_or_default();
    let tcp = TcpHeader::decode(segment)?;
    Ok(Some((ip, tcp)))
}

/// Classifies on flags alone.
pub fn classify_flags(tcp: &TcpHeader) -> Classification {
    if tcp.is_syn_ack() {
        Classification::SynAckReceived
    } else {
        Classification::Other
    }
}

/// Classifies `tcp`, received from `from`, against the probe in `target`.
pub fn classify(
    target: &ProbeTarget,
    from: Ipv4Addr,
    tcp: &TcpHeader,
    filter: FlowFilter,
) -> Classification {
    match filter {
        FlowFilter::ProbeFlow if !target.is_reply(from, tcp) => Classification::Unrelated,
        _ => classify_flags(tcp),
    }
}

/// Sends one SYN and watches the raw channel for the answer.
pub struct Prober<T: RawTransport, R: Rng = ThreadRng> {
    transport: T,
    rng: R,
    target: ProbeTarget,
    config: ProbeConfig,
    state: ProbeState,
    read_timeout: Option<Duration>,
}

impl<T: RawTransport> Prober<T> {
    pub fn new(transport: T, target: ProbeTarget, config: ProbeConfig) -> Self {
        Prober::with_rng(transport, target, config, rand::thread_rng())
    }
}

impl<T: RawTransport, R: Rng> Prober<T, R> {
    pub fn with_rng(transport: T, target: ProbeTarget, config: ProbeConfig, rng: R) -> Self {
        Prober {
            transport,
            rng,
            target,
            config,
            state: ProbeState::Idle,
            read_timeout: None,
        }
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    /// Hands the transport back, e.g. to close it explicitly.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Sends the SYN and listens until a SYN-ACK, the deadline or
    /// cancellation. Any transport failure ends the run.
    pub fn run(&mut self) -> Result<ProbeOutcome, ProbeError> {
        let result = self.send_syn().and_then(|_| self.listen());
        if result.is_err() {
            self.state = ProbeState::TransportError;
        }
        result
    }

    fn send_syn(&mut self) -> Result<SynPacket, ProbeError> {
        let identification: u16 = self.rng.gen();
        let sequence: u32 = self.rng.gen();
        let packet = build_syn_packet(&self.target, identification, sequence);

        info!("sending SYN\n{}\n{}", packet.ip, packet.tcp);
        trace!("outbound datagram:\n{}", format_hexdump(&packet.bytes));

        let sent = self
            .transport
            .send(&packet.bytes, self.target.destination_socket())?;
        info!(
            bytes = sent,
            "SYN sent from {}:{} to {}:{}",
            self.target.source,
            self.target.source_port,
            self.target.destination,
            self.target.destination_port
        );
        self.state = ProbeState::Sent;

        Ok(packet)
    }

    fn listen(&mut self) -> Result<ProbeOutcome, ProbeError> {
        self.state = ProbeState::Listening;
        let started = Instant::now();
        let deadline = match self.config.listen {
            ListenPolicy::Forever => None,
            ListenPolicy::Deadline(limit) => Some(started + limit),
        };
        info!(
            policy = ?self.config.listen,
            filter = ?self.config.filter,
            "waiting for incoming packets"
        );

        loop {
            if self.cancelled() {
                info!("probe cancelled");
                self.state = ProbeState::Cancelled;
                return Ok(ProbeOutcome::Cancelled);
            }

            let remaining = deadline.map(|d| d.saturating_duration_since(Instant::now()));
            if remaining == Some(Duration::ZERO) {
                let waited = started.elapsed();
                info!(?waited, "no SYN-ACK before the deadline");
                self.state = ProbeState::TimedOut;
                return Ok(ProbeOutcome::TimedOut { waited });
            }

            let poll = self.config.cancel.as_ref().map(|_| self.config.poll_interval);
            let timeout = match (remaining, poll) {
                (Some(r), Some(p)) => Some(r.min(p)),
                (r, p) => r.or(p),
            }
            .map(|t| t.max(MIN_READ_TIMEOUT));
            self.apply_read_timeout(timeout)?;

            match self.transport.receive(MAX_PACKET_SIZE) {
                Ok((packet, from)) => {
                    if let Some(result) = self.observe(&packet, from) {
                        info!(
                            "*** SYN-ACK received from {} - handshake half open ***",
                            result.from
                        );
                        self.state = ProbeState::Classified;
                        return Ok(ProbeOutcome::SynAck(result));
                    }
                }
                Err(err) if timeout.is_some() && err.is_timeout() => continue,
                Err(err) => {
                    warn!(error = %err, "receive failed");
                    return Err(err);
                }
            }
        }
    }

    fn apply_read_timeout(&mut self, timeout: Option<Duration>) -> Result<(), ProbeError> {
        if self.read_timeout != timeout {
            self.transport.set_read_timeout(timeout)?;
            self.read_timeout = timeout;
        }
        Ok(())
    }

    fn cancelled(&self) -> bool {
        self.config
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Decodes and classifies one inbound datagram. Returns the result only
    /// when it ends the probe.
    fn observe(&self, packet: &[u8], from: Ipv4Addr) -> Option<ProbeResult> {
        trace!("inbound datagram from {from}:\n{}", format_hexdump(packet));

        let (ip, tcp) = match decode_inbound(packet) {
            Ok(Some(headers)) => headers,
            Ok(None) => {
                debug!(%from, "ignoring non-TCP packet");
                return None;
            }
            Err(err) => {
                warn!(%from, error = %err, "skipping malformed packet");
                return None;
            }
        };

        info!("received packet from {from}\n{ip}\n{tcp}");
        let segment_end = usize::from(ip.total_length)
            .min(packet.len())
            .max(ip.header_len());
        if let Some(segment) = packet.get(ip.header_len()..segment_end) {
            debug!(
                ip_checksum_ok = ip.checksum_valid(),
                tcp_checksum_ok = verify_tcp_checksum(&ip, segment),
                "checksums"
            );
        }

        let classification = classify(&self.target, from, &tcp, self.config.filter);
        match classification {
            Classification::SynAckReceived => Some(ProbeResult {
                classification,
                from,
                ip,
                tcp,
            }),
            Classification::Other => {
                info!(flags = tcp.flags(), "other flag combination, still listening");
                None
            }
            Classification::Unrelated => {
                debug!(
                    "segment {}:{} -> {} is outside the probe flow",
                    from, tcp.source_port, tcp.destination_port
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::checksum::checksum;
    use crate::net::pseudo::tcp_checksum;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;
    use std::io;

    fn target() -> ProbeTarget {
        ProbeTarget::parse("192.168.1.10", "192.168.1.20", "54321", "80").unwrap()
    }

    /// Replays scripted reads and records what was sent.
    #[derive(Default)]
    struct ScriptedTransport {
        sent: Vec<(Vec<u8>, SocketAddr)>,
        inbound: VecDeque<Result<(Vec<u8>, Ipv4Addr), io::ErrorKind>>,
        timeouts: Vec<Option<Duration>>,
        reads: usize,
        fail_send: bool,
    }

    impl RawTransport for ScriptedTransport {
        fn send(&mut self, packet: &[u8], destination: SocketAddr) -> Result<usize, ProbeError> {
            if self.fail_send {
                return Err(ProbeError::transport("send", io::ErrorKind::NetworkUnreachable.into()));
            }
            self.sent.push((packet.to_vec(), destination));
            Ok(packet.len())
        }

        fn receive(&mut self, _max_size: usize) -> Result<(Vec<u8>, Ipv4Addr), ProbeError> {
            self.reads += 1;
            match self.inbound.pop_front() {
                Some(Ok(read)) => Ok(read),
                Some(Err(kind)) => Err(ProbeError::transport("receive", kind.into())),
                None => {
                    // Behave like an expiring socket timeout.
                    std::thread::sleep(Duration::from_millis(1));
                    Err(ProbeError::transport("receive", io::ErrorKind::WouldBlock.into()))
                }
            }
        }

        fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<(), ProbeError> {
            self.timeouts.push(timeout);
            Ok(())
        }
    }

    fn reply(
        from: Ipv4Addr,
        to: Ipv4Addr,
        sport: u16,
        dport: u16,
        syn: bool,
        ack: bool,
    ) -> Vec<u8> {
        let mut ip = Ipv4Header::for_tcp(from, to, TCP_HEADER_LEN as u16, 7);
        ip.fill_checksum();
        let mut tcp = TcpHeader::syn(sport, dport, 99);
        tcp.flags_syn = syn;
        tcp.flags_ack = ack;
        tcp.ack_number = if ack { 1 } else { 0 };
        tcp.fill_checksum(&ip, &[]);
        let mut bytes = ip.encode();
        bytes.extend_from_slice(&tcp.encode());
        bytes
    }

    #[test]
    fn syn_packet_is_forty_consistent_bytes() {
        let t = target();
        let packet = build_syn_packet(&t, 0x1c46, 0x2a4d3b1f);

        assert_eq!(packet.bytes.len(), 40);
        assert_eq!(packet.ip.checksum, 0xdb1b);
        assert_eq!(packet.tcp.checksum, 0xdbb5);
        assert_eq!(checksum(&packet.bytes[..20]), 0);
        assert_eq!(
            tcp_checksum(&packet.ip, &packet.bytes[20..], &[]),
            packet.tcp.checksum
        );
        assert_eq!(packet.bytes[33], 0x02);
    }

    #[test]
    fn classification_by_flags() {
        let t = target();
        let from = t.destination;
        let mut tcp = TcpHeader::syn(80, 54321, 1);
        tcp.flags_ack = true;
        assert_eq!(
            classify(&t, from, &tcp, FlowFilter::Promiscuous),
            Classification::SynAckReceived
        );

        tcp.flags_ack = false;
        assert_eq!(
            classify(&t, from, &tcp, FlowFilter::Promiscuous),
            Classification::Other
        );

        tcp.flags_syn = false;
        tcp.flags_rst = true;
        tcp.flags_ack = true;
        assert_eq!(
            classify(&t, from, &tcp, FlowFilter::Promiscuous),
            Classification::Other
        );
    }

    #[test]
    fn probe_flow_filter_marks_foreign_segments_unrelated() {
        let t = target();
        let mut tcp = TcpHeader::syn(443, 50000, 1);
        tcp.flags_ack = true;

        assert_eq!(
            classify(&t, Ipv4Addr::new(8, 8, 8, 8), &tcp, FlowFilter::ProbeFlow),
            Classification::Unrelated
        );
        assert_eq!(
            classify(&t, Ipv4Addr::new(8, 8, 8, 8), &tcp, FlowFilter::Promiscuous),
            Classification::SynAckReceived
        );

        let own = TcpHeader { source_port: 80, destination_port: 54321, ..tcp };
        assert_eq!(
            classify(&t, t.destination, &own, FlowFilter::ProbeFlow),
            Classification::SynAckReceived
        );
    }

    #[test]
    fn decode_inbound_skips_other_protocols() {
        let mut udp = Ipv4Header::for_tcp(Ipv4Addr::LOCALHOST, Ipv4Addr::LOCALHOST, 8, 1);
        udp.proto = 17;
        assert_eq!(decode_inbound(&udp.encode()), Ok(None));
    }

    #[test]
    fn decode_inbound_honours_ihl() {
        let t = target();
        let plain = reply(t.destination, t.source, 80, 54321, true, true);
        let mut with_options = plain[..20].to_vec();
        with_options[0] = 0x46;
        with_options.extend_from_slice(&[1, 1, 1, 0]);
        with_options.extend_from_slice(&plain[20..]);

        let (ip, tcp) = decode_inbound(&with_options).unwrap().unwrap();
        assert_eq!(ip.header_len(), 24);
        assert!(tcp.is_syn_ack());
        assert_eq!(tcp.source_port, 80);
    }

    #[test]
    fn decode_inbound_reports_truncated_tcp() {
        let t = target();
        let packet = reply(t.destination, t.source, 80, 54321, true, true);
        assert!(decode_inbound(&packet[..30]).is_err());
        assert!(decode_inbound(&packet[..10]).is_err());
    }

    #[test]
    fn run_sends_one_syn_and_stops_at_syn_ack() {
        let t = target();
        let mut transport = ScriptedTransport::default();
        let mut icmp = Ipv4Header::for_tcp(t.destination, t.source, 8, 3);
        icmp.proto = 1;
        transport.inbound.push_back(Ok((icmp.encode(), t.destination)));
        transport.inbound.push_back(Ok((vec![0x45; 6], t.destination)));
        transport
            .inbound
            .push_back(Ok((reply(t.destination, t.source, 80, 54321, false, true), t.destination)));
        transport
            .inbound
            .push_back(Ok((reply(t.destination, t.source, 80, 54321, true, true), t.destination)));

        let mut prober =
            Prober::with_rng(transport, t, ProbeConfig::default(), StdRng::seed_from_u64(7));
        assert_eq!(prober.state(), ProbeState::Idle);

        let outcome = prober.run().unwrap();
        assert_eq!(prober.state(), ProbeState::Classified);
        match outcome {
            ProbeOutcome::SynAck(result) => {
                assert_eq!(result.classification, Classification::SynAckReceived);
                assert_eq!(result.from, t.destination);
                assert_eq!(result.tcp.destination_port, 54321);
            }
            other => panic!("unexpected outcome {other:?}"),
        }

        let transport = prober.into_transport();
        assert_eq!(transport.sent.len(), 1);
        let (bytes, destination) = &transport.sent[0];
        assert_eq!(bytes.len(), 40);
        assert_eq!(*destination, t.destination_socket());
        assert!(transport.inbound.is_empty());
        assert_eq!(transport.timeouts.first(), None);
    }

    #[test]
    fn send_failure_is_a_transport_error() {
        let transport = ScriptedTransport {
            fail_send: true,
            ..Default::default()
        };
        let mut prober =
            Prober::with_rng(transport, target(), ProbeConfig::default(), StdRng::seed_from_u64(1));

        let err = prober.run().unwrap_err();
        assert!(matches!(err, ProbeError::Transport { op: "send", .. }));
        assert_eq!(prober.state(), ProbeState::TransportError);
    }

    #[test]
    fn receive_failure_is_fatal_and_not_retried() {
        let mut transport = ScriptedTransport::default();
        transport
            .inbound
            .push_back(Err(io::ErrorKind::ConnectionReset));
        let t = target();
        let syn_ack = reply(t.destination, t.source, 80, 54321, true, true);
        transport.inbound.push_back(Ok((syn_ack, t.destination)));

        let mut prober =
            Prober::with_rng(transport, target(), ProbeConfig::default(), StdRng::seed_from_u64(2));
        let err = prober.run().unwrap_err();
        assert!(matches!(err, ProbeError::Transport { op: "receive", .. }));
        assert_eq!(prober.state(), ProbeState::TransportError);
        assert_eq!(prober.into_transport().inbound.len(), 1);
    }

    #[test]
    fn timeout_without_deadline_is_fatal() {
        // Forever policy never arms a read timeout, so a timeout is a real error.
        let transport = ScriptedTransport::default();
        let mut prober =
            Prober::with_rng(transport, target(), ProbeConfig::default(), StdRng::seed_from_u64(3));
        assert!(prober.run().unwrap_err().is_timeout());
        assert_eq!(prober.state(), ProbeState::TransportError);
    }

    #[test]
    fn deadline_ends_in_timed_out() {
        let config = ProbeConfig {
            listen: ListenPolicy::Deadline(Duration::from_millis(20)),
            ..Default::default()
        };
        let mut transport = ScriptedTransport::default();
        let t = target();
        let bare_syn = reply(t.destination, t.source, 80, 54321, true, false);
        transport.inbound.push_back(Ok((bare_syn, t.destination)));

        let mut prober =
            Prober::with_rng(transport, target(), config, StdRng::seed_from_u64(4));
        let outcome = prober.run().unwrap();

        match outcome {
            ProbeOutcome::TimedOut { waited } => assert!(waited >= Duration::from_millis(20)),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(prober.state(), ProbeState::TimedOut);
        let transport = prober.into_transport();
        let limit = Duration::from_millis(20);
        assert!(transport
            .timeouts
            .iter()
            .all(|t| matches!(t, Some(d) if *d >= MIN_READ_TIMEOUT && *d <= limit)));
    }

    #[test]
    fn cancel_flag_stops_listening() {
        let cancel = Arc::new(AtomicBool::new(true));
        let config = ProbeConfig {
            cancel: Some(cancel),
            ..Default::default()
        };
        let mut prober = Prober::with_rng(
            ScriptedTransport::default(),
            target(),
            config,
            StdRng::seed_from_u64(5),
        );

        assert_eq!(prober.run().unwrap(), ProbeOutcome::Cancelled);
        assert_eq!(prober.state(), ProbeState::Cancelled);
        assert_eq!(prober.into_transport().sent.len(), 1);
    }

    #[test]
    fn cancel_flag_raised_while_listening_is_noticed() {
        let poll_interval = Duration::from_millis(5);
        let cancel = Arc::new(AtomicBool::new(false));
        let config = ProbeConfig {
            poll_interval,
            cancel: Some(Arc::clone(&cancel)),
            ..Default::default()
        };
        assert_eq!(config.listen, ListenPolicy::Forever);

        let raiser = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            cancel.store(true, Ordering::Relaxed);
        });

        let mut prober = Prober::with_rng(
            ScriptedTransport::default(),
            target(),
            config,
            StdRng::seed_from_u64(6),
        );
        let outcome = prober.run();
        raiser.join().unwrap();

        assert_eq!(outcome.unwrap(), ProbeOutcome::Cancelled);
        assert_eq!(prober.state(), ProbeState::Cancelled);
        let transport = prober.into_transport();
        assert!(transport.reads > 1, "only {} reads", transport.reads);
        assert_eq!(transport.timeouts, vec![Some(poll_interval)]);
    }

    #[test]
    fn parse_rejects_bad_arguments() {
        for (s, d, sp, dp) in [
            ("192.168.1", "10.0.0.2", "1", "2"),
            ("10.0.0.1", "host", "1", "2"),
            ("10.0.0.1", "10.0.0.2", "65536", "2"),
            ("10.0.0.1", "10.0.0.2", "1", "-1"),
        ] {
            let err = ProbeTarget::parse(s, d, sp, dp).unwrap_err();
            assert!(matches!(err, ProbeError::InvalidArgument(_)), "{s} {d} {sp} {dp}");
        }
    }
}
