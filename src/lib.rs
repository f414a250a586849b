//! Crafts raw IPv4/TCP packets outside the kernel's TCP stack, sends a single
//! SYN and watches what comes back.
//!
//! Layers, bottom up:
//! - [`net::checksum`]: the RFC 1071 internet checksum
//! - [`net::ip`], [`net::tcp`]: fixed-offset header encode/decode
//! - [`net::pseudo`]: the RFC 793 pseudo-header checksum
//! - [`probe`]: the SYN send / classify state machine over a [`transport::RawTransport`]

pub mod cli;
pub mod error;
pub mod hextools;
pub mod net;
pub mod probe;
pub mod transport;

pub use error::{DecodeError, ProbeError};
pub use probe::{ProbeConfig, ProbeOutcome, ProbeTarget, Prober};

use tracing::level_filters::LevelFilter;

/// Installs the fmt subscriber. `verbosity` counts `-v` flags: 0 is info,
/// 1 debug, 2 and up trace. Safe to call more than once.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
