//! Error types shared by the forwarders, formatters and builders.

use std::io;

use thiserror::Error;

/// Failures surfaced by a [`Sink`](crate::handler::Sink).
///
/// Transient network failures inside the stream forwarder never reach the
/// caller; only the variants below that a call site chooses to return do.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The initial connection (or datagram socket setup) failed.
    #[error("failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    /// A datagram could not be handed to the local socket.
    #[error("send failed: {0}")]
    Send(#[source] io::Error),
    /// The retry buffer is at capacity and the record was not stored.
    #[error("retry buffer full ({capacity} records)")]
    BufferFull { capacity: usize },
    /// Another caller holds a sink configured for exclusive use.
    #[error("sink is configured for exclusive use but was entered concurrently")]
    Contended,
    /// The record could not be turned into bytes.
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl SinkError {
    pub(crate) fn connect(host: &str, port: u16, source: io::Error) -> Self {
        Self::Connect {
            host: host.to_owned(),
            port,
            source,
        }
    }
}

/// Errors raised while formatting a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("serialisation failed: {0}")]
    Serialise(String),
    #[error("frame of {size} bytes exceeds limit of {limit} bytes")]
    FrameTooLarge { size: usize, limit: usize },
}

/// Errors that may occur while building a forwarder.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Invalid user supplied configuration.
    #[error("invalid forwarder configuration: {0}")]
    InvalidConfig(String),
    /// The forwarder rejected construction, typically an eager connect failure.
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// Underlying I/O error whilst reading configuration.
    #[error(transparent)]
    Io(#[from] io::Error),
}
