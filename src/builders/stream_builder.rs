//! Builder for [`StreamForwarder`](crate::forwarder::StreamForwarder).
//!
//! Exposes the connect-on-first-use and force-flush switches, the retry
//! buffer capacity, socket timeouts, the warning interval for lost records,
//! and the synchronisation strategy.

use std::{num::NonZeroUsize, time::Duration};

use crate::{
    error::BuildError,
    forwarder::{ForwarderConfig, StreamForwarder},
    sync::SyncStrategy,
};

use super::{ForwarderBuilderTrait, ensure_positive, validate_host};

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing TCP [`StreamForwarder`] instances.
#[derive(Clone, Debug)]
pub struct StreamForwarderBuilder {
    host: String,
    port: u16,
    lazy_connect: bool,
    force_flush: bool,
    buffer_capacity: Option<usize>,
    connect_timeout_ms: Option<u64>,
    write_timeout_ms: Option<u64>,
    warn_interval_ms: Option<u64>,
    sync: SyncStrategy,
}

impl StreamForwarderBuilder {
    /// Create a builder targeting `host:port` (hostname or literal address).
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            lazy_connect: false,
            force_flush: false,
            buffer_capacity: None,
            connect_timeout_ms: None,
            write_timeout_ms: None,
            warn_interval_ms: None,
            sync: SyncStrategy::default(),
        }
    }

    /// Defer the first connection attempt until it is needed.
    pub fn with_lazy_connect(mut self, lazy: bool) -> Self {
        self.lazy_connect = lazy;
        self
    }

    /// Send each record on emission instead of buffering it until flush.
    pub fn with_force_flush(mut self, force: bool) -> Self {
        self.force_flush = force;
        self
    }

    pub fn with_sync(mut self, sync: SyncStrategy) -> Self {
        self.sync = sync;
        self
    }

    option_setter!(
        #[doc = "Set the retry buffer capacity. Must be greater than zero."]
        with_buffer_capacity,
        buffer_capacity,
        usize
    );
    option_setter!(with_connect_timeout_ms, connect_timeout_ms, u64);
    option_setter!(with_write_timeout_ms, write_timeout_ms, u64);
    option_setter!(
        #[doc = "Minimum spacing between warnings about lost records. Zero disables rate limiting."]
        with_warn_interval_ms,
        warn_interval_ms,
        u64
    );

    fn validate(&self) -> Result<(), BuildError> {
        validate_host(&self.host)?;
        if let Some(capacity) = self.buffer_capacity {
            ensure_positive!(capacity, "buffer_capacity")?;
        }
        if let Some(timeout) = self.connect_timeout_ms {
            ensure_positive!(timeout, "connect_timeout_ms")?;
        }
        if let Some(timeout) = self.write_timeout_ms {
            ensure_positive!(timeout, "write_timeout_ms")?;
        }
        Ok(())
    }

    /// Validate the options and produce the forwarder configuration.
    pub fn build_config(&self) -> Result<ForwarderConfig, BuildError> {
        self.validate()?;
        let mut config = ForwarderConfig::new(self.host.clone(), self.port)
            .with_lazy_connect(self.lazy_connect)
            .with_force_flush(self.force_flush)
            .with_sync(self.sync);
        if let Some(capacity) = self.buffer_capacity.and_then(NonZeroUsize::new) {
            config.buffer_capacity = capacity;
        }
        if let Some(timeout) = self.connect_timeout_ms {
            config.connect_timeout = Duration::from_millis(timeout);
        }
        if let Some(timeout) = self.write_timeout_ms {
            config.write_timeout = Duration::from_millis(timeout);
        }
        if let Some(interval) = self.warn_interval_ms {
            config.warn_interval = Duration::from_millis(interval);
        }
        Ok(config)
    }
}

impl ForwarderBuilderTrait for StreamForwarderBuilder {
    type Forwarder = StreamForwarder;

    fn build_inner(&self) -> Result<Self::Forwarder, BuildError> {
        let config = self.build_config()?;
        Ok(StreamForwarder::new(config)?)
    }
}
