use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::error::ProbeError;
use crate::probe::{FlowFilter, ListenPolicy, ProbeConfig, ProbeTarget};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "synprobe",
    about = "Send one hand-built TCP SYN over a raw socket and watch for the SYN-ACK",
    after_help = "Requires root or CAP_NET_RAW."
)]
pub struct Cli {
    /// Source IPv4 address written into the packet (dotted decimal)
    pub source_ip: String,

    /// Destination IPv4 address (dotted decimal)
    pub destination_ip: String,

    /// Source port, 0-65535
    pub source_port: String,

    /// Destination port, 0-65535
    pub destination_port: String,

    /// Stop listening after this many milliseconds. Listens forever when absent.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Only let segments on the probe's own flow end the probe
    #[arg(long, action = ArgAction::SetTrue)]
    pub probe_flow_only: bool,

    /// More output: -v debug, -vv trace with hex dumps
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn target(&self) -> Result<ProbeTarget, ProbeError> {
        ProbeTarget::parse(
            &self.source_ip,
            &self.destination_ip,
            &self.source_port,
            &self.destination_port,
        )
    }

    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            listen: match self.timeout_ms {
                Some(ms) => ListenPolicy::Deadline(Duration::from_millis(ms)),
                None => ListenPolicy::Forever,
            },
            filter: if self.probe_flow_only {
                FlowFilter::ProbeFlow
            } else {
                FlowFilter::Promiscuous
            },
            ..ProbeConfig::default()
        }
    }
}
