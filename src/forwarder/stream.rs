//! Stream forwarder: buffered, reconnecting delivery over a reliable transport.
//!
//! Records are either sent as they arrive (`force_flush`) or queued in a
//! [`RetryBuffer`] and drained on [`StreamForwarder::flush`]. Reconnect and
//! send failures never reach the caller; the only error an emission can
//! produce in normal operation is [`SinkError::BufferFull`].

use std::fmt;

use log::{debug, warn};

use crate::{
    error::SinkError, handler::Sink, rate_limited_warner::RateLimitedWarner, sync::SinkLock,
};

use super::{
    buffer::RetryBuffer,
    config::ForwarderConfig,
    transport::{TcpClient, Transport},
};

struct StreamState<T> {
    transport: T,
    buffer: RetryBuffer,
}

/// Records a forwarder gave up on by the time it was torn down.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct Undelivered {
    /// Force-flush losses still held back by the warning rate limit.
    pub(super) lost: u64,
    /// Records left in the retry buffer.
    pub(super) discarded: usize,
}

/// Forwarder shipping records over a connection-oriented transport.
pub struct StreamForwarder<T: Transport = TcpClient> {
    config: ForwarderConfig,
    state: SinkLock<StreamState<T>>,
    warner: RateLimitedWarner,
}

impl StreamForwarder<TcpClient> {
    /// Construct a TCP forwarder from `config`.
    ///
    /// Connects immediately unless `config.lazy_connect` is set; a failed
    /// initial connection is returned as [`SinkError::Connect`].
    pub fn new(config: ForwarderConfig) -> Result<Self, SinkError> {
        let transport = TcpClient::new(config.connect_timeout, config.write_timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> StreamForwarder<T> {
    /// Construct a forwarder around an arbitrary transport.
    pub fn with_transport(config: ForwarderConfig, mut transport: T) -> Result<Self, SinkError> {
        if !config.lazy_connect {
            transport
                .connect(&config.host, config.port)
                .map_err(|source| SinkError::connect(&config.host, config.port, source))?;
            debug!(
                "StreamForwarder connected to {}:{}",
                config.host, config.port
            );
        }
        let state = StreamState {
            transport,
            buffer: RetryBuffer::new(config.buffer_capacity),
        };
        Ok(Self {
            state: SinkLock::new(state, config.sync),
            warner: RateLimitedWarner::new(config.warn_interval),
            config,
        })
    }

    pub fn config(&self) -> &ForwarderConfig {
        &self.config
    }

    /// Number of records waiting in the retry buffer.
    pub fn pending(&self) -> usize {
        self.state.inspect(|state| state.buffer.len())
    }

    pub fn is_connected(&self) -> bool {
        self.state.inspect(|state| state.transport.is_connected())
    }

    /// Hand one formatted record to the forwarder.
    ///
    /// In buffered mode the record is queued without any network I/O. In
    /// force-flush mode it is sent straight away; if that is impossible the
    /// record is lost and only counted towards a rate-limited warning.
    pub fn emit(&self, record: Vec<u8>) -> Result<(), SinkError> {
        let mut state = self.state.acquire()?;
        if !self.config.force_flush {
            return state.buffer.push(record);
        }

        let transport = &mut state.transport;
        self.ensure_connected(transport);
        let delivered = transport.is_connected()
            && match transport.send(&record) {
                Ok(()) => true,
                Err(err) => {
                    debug!("StreamForwarder write failed: {err}");
                    false
                }
            };
        if !delivered {
            self.warner.record_drop();
            self.warner.warn_if_due(|count| self.warn_lost(count));
        }
        Ok(())
    }

    /// Drain as much of the retry buffer as connectivity allows.
    ///
    /// A record leaves the buffer once the transport accepts it; the first
    /// failed send ends the cycle with that record still at the head. A
    /// TCP peer that has gone away is only noticed when a write fails, so
    /// the record written just after the peer closed can be accepted by the
    /// local socket and still be lost.
    pub fn flush(&self) {
        let Ok(mut state) = self.state.acquire() else {
            debug!("StreamForwarder flush skipped: sink entered concurrently");
            return;
        };
        let StreamState { transport, buffer } = &mut *state;
        self.ensure_connected(transport);
        while transport.is_connected() {
            let Some(record) = buffer.front() else {
                break;
            };
            if let Err(err) = transport.send(record) {
                debug!(
                    "StreamForwarder write failed with {} records pending: {err}",
                    buffer.len()
                );
                break;
            }
            buffer.pop_front();
        }
    }

    fn warn_lost(&self, count: u64) {
        warn!(
            "StreamForwarder dropped {count} records; {}:{} unavailable",
            self.config.host, self.config.port
        );
    }

    /// Empty the retry buffer and collect force-flush losses not yet reported.
    pub(super) fn take_undelivered(&mut self) -> Undelivered {
        let discarded = self.state.get_mut().buffer.clear();
        let mut lost = 0;
        self.warner.flush(|count| lost = count);
        Undelivered { lost, discarded }
    }

    fn ensure_connected(&self, transport: &mut T) {
        if transport.is_connected() {
            return;
        }
        match transport.connect(&self.config.host, self.config.port) {
            Ok(()) => debug!(
                "StreamForwarder reconnected to {}:{}",
                self.config.host, self.config.port
            ),
            Err(err) => debug!(
                "StreamForwarder failed to connect to {}:{}: {err}",
                self.config.host, self.config.port
            ),
        }
    }

    #[cfg(test)]
    pub(crate) fn buffered(&self) -> Vec<Vec<u8>> {
        self.state
            .inspect(|state| state.buffer.iter().map(<[u8]>::to_vec).collect())
    }
}

impl<T: Transport> Sink for StreamForwarder<T> {
    fn emit(&self, record: Vec<u8>) -> Result<(), SinkError> {
        StreamForwarder::emit(self, record)
    }

    fn flush(&self) {
        StreamForwarder::flush(self)
    }
}

impl<T: Transport> Drop for StreamForwarder<T> {
    fn drop(&mut self) {
        let Undelivered { lost, discarded } = self.take_undelivered();
        if lost > 0 {
            self.warn_lost(lost);
        }
        if discarded > 0 {
            warn!(
                "StreamForwarder closed with {discarded} undelivered records for {}:{}",
                self.config.host, self.config.port
            );
        }
    }
}

impl<T: Transport> fmt::Debug for StreamForwarder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamForwarder")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("force_flush", &self.config.force_flush)
            .field("sync", &self.state.strategy())
            .finish()
    }
}
