use std::io;

/// Structural decode failure. Decoding never validates field contents, so
/// the only thing that can go wrong is a short buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("truncated {header} header: need {needed} bytes, got {actual}")]
    TruncatedBuffer {
        header: &'static str,
        needed: usize,
        actual: usize,
    },
}

/// Errors surfaced by the probe and its raw transport.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("raw socket requires elevated privilege (root or CAP_NET_RAW): {0}")]
    Permission(#[source] io::Error),

    #[error("could not allocate raw socket: {0}")]
    Resource(#[source] io::Error),

    #[error("transport {op} failed: {source}")]
    Transport {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ProbeError {
    pub(crate) fn transport(op: &'static str, source: io::Error) -> Self {
        ProbeError::Transport { op, source }
    }

    /// True for a read that ran out its timeout rather than failing.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ProbeError::Transport { source, .. }
                if matches!(source.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
        )
    }

    /// Maps a failed raw socket open onto the startup failure modes.
    pub(crate) fn from_open(source: io::Error) -> Self {
        match source.raw_os_error() {
            Some(libc::EPERM) | Some(libc::EACCES) => ProbeError::Permission(source),
            Some(libc::EMFILE) | Some(libc::ENFILE) | Some(libc::ENOBUFS)
            | Some(libc::ENOMEM) => ProbeError::Resource(source),
            _ if source.kind() == io::ErrorKind::PermissionDenied => {
                ProbeError::Permission(source)
            }
            _ => ProbeError::transport("open", source),
        }
    }
}
