use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use synprobe::cli::Cli;
use synprobe::transport::{RawSocketTransport, RawTransport};
use synprobe::{ProbeError, ProbeOutcome, Prober};

fn main() -> Result<()> {
    let cli = Cli::parse();
    synprobe::init_tracing(cli.verbose);

    let target = cli.target()?;
    let config = cli.probe_config();

    let transport = RawSocketTransport::open().map_err(|err| {
        if let ProbeError::Permission(_) = err {
            error!("raw sockets need root or CAP_NET_RAW");
        }
        err
    })?;

    let mut prober = Prober::new(transport, target, config);
    let outcome = prober.run();
    prober.into_transport().close();

    match outcome.context("SYN probe failed")? {
        ProbeOutcome::SynAck(result) => info!(
            "{}:{} answered with SYN-ACK (seq {}, ack {}); handshake left half open",
            result.from,
            result.tcp.source_port,
            result.tcp.sequence_number,
            result.tcp.ack_number
        ),
        ProbeOutcome::TimedOut { waited } => info!(?waited, "no SYN-ACK seen"),
        ProbeOutcome::Cancelled => info!("cancelled"),
    }

    Ok(())
}
