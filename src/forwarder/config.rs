//! Configuration structures consumed by the forwarders.
//!
//! The builders in [`crate::builders`] validate and construct these values
//! before handing them to [`StreamForwarder`](super::StreamForwarder) or
//! [`DatagramForwarder`](super::DatagramForwarder). Both are immutable once a
//! forwarder owns them.

use std::{num::NonZeroUsize, time::Duration};

use crate::{rate_limited_warner::DEFAULT_WARN_INTERVAL, sync::SyncStrategy};

/// Default number of records the stream forwarder retains while disconnected.
pub const DEFAULT_BUFFER_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => unreachable!(),
};
/// Default connection timeout applied when establishing sockets.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default write timeout applied to socket writes.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// Configuration for a [`StreamForwarder`](super::StreamForwarder).
#[derive(Clone, Debug)]
pub struct ForwarderConfig {
    /// Hostname or literal address of the remote endpoint.
    pub host: String,
    pub port: u16,
    /// Connect on the first flush (or forced emit) instead of at construction.
    pub lazy_connect: bool,
    /// Send every record as it is emitted instead of buffering until flush.
    pub force_flush: bool,
    pub buffer_capacity: NonZeroUsize,
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
    pub warn_interval: Duration,
    pub sync: SyncStrategy,
}

impl ForwarderConfig {
    /// Configuration targeting `host:port` with every other field defaulted.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            lazy_connect: false,
            force_flush: false,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            warn_interval: DEFAULT_WARN_INTERVAL,
            sync: SyncStrategy::default(),
        }
    }

    pub fn with_lazy_connect(mut self, lazy_connect: bool) -> Self {
        self.lazy_connect = lazy_connect;
        self
    }

    pub fn with_force_flush(mut self, force_flush: bool) -> Self {
        self.force_flush = force_flush;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_sync(mut self, sync: SyncStrategy) -> Self {
        self.sync = sync;
        self
    }
}

/// Configuration for a [`DatagramForwarder`](super::DatagramForwarder).
#[derive(Clone, Debug)]
pub struct DatagramConfig {
    pub host: String,
    pub port: u16,
    pub sync: SyncStrategy,
}

impl DatagramConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            sync: SyncStrategy::default(),
        }
    }

    pub fn with_sync(mut self, sync: SyncStrategy) -> Self {
        self.sync = sync;
        self
    }
}
