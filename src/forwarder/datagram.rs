//! Datagram forwarder: immediate, unbuffered delivery.

use std::fmt;

use log::debug;

use crate::{error::SinkError, handler::Sink, sync::SinkLock};

use super::{
    config::DatagramConfig,
    transport::{Transport, UdpClient},
};

/// Forwarder sending each record as a single datagram.
///
/// There is no retry buffer and no reconnect logic. Send failures are
/// returned to the caller as [`SinkError::Send`].
pub struct DatagramForwarder<T: Transport = UdpClient> {
    config: DatagramConfig,
    transport: SinkLock<T>,
}

impl DatagramForwarder<UdpClient> {
    /// Bind a local UDP socket aimed at `config.host:config.port`.
    pub fn new(config: DatagramConfig) -> Result<Self, SinkError> {
        Self::with_transport(config, UdpClient::new())
    }

    /// Local address the datagrams are sent from.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.inspect(UdpClient::local_addr)
    }
}

impl<T: Transport> DatagramForwarder<T> {
    /// Construct a forwarder around an arbitrary transport, connecting it
    /// immediately.
    pub fn with_transport(config: DatagramConfig, mut transport: T) -> Result<Self, SinkError> {
        transport
            .connect(&config.host, config.port)
            .map_err(|source| SinkError::connect(&config.host, config.port, source))?;
        debug!(
            "DatagramForwarder ready for {}:{}",
            config.host, config.port
        );
        Ok(Self {
            transport: SinkLock::new(transport, config.sync),
            config,
        })
    }

    pub fn config(&self) -> &DatagramConfig {
        &self.config
    }

    pub fn emit(&self, record: Vec<u8>) -> Result<(), SinkError> {
        self.transport.acquire()?.send(&record).map_err(SinkError::Send)
    }
}

impl<T: Transport> Sink for DatagramForwarder<T> {
    fn emit(&self, record: Vec<u8>) -> Result<(), SinkError> {
        DatagramForwarder::emit(self, record)
    }

    fn flush(&self) {}
}

impl<T: Transport> fmt::Debug for DatagramForwarder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatagramForwarder")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("sync", &self.transport.strategy())
            .finish()
    }
}
