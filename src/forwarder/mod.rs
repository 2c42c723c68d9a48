//! Network forwarders shipping formatted log records to a remote endpoint.
//!
//! [`StreamForwarder`] targets a connection-oriented transport. It either
//! sends each record as it is emitted or keeps a bounded [`RetryBuffer`] that
//! is drained on flush, reconnecting whenever the connection has dropped.
//! [`DatagramForwarder`] sends every record immediately over a connectionless
//! transport and keeps no state between calls.
//!
//! Both forwarders are synchronous: connect and send run on the calling
//! thread while the forwarder's lock is held.

mod buffer;
mod config;
mod datagram;
mod stream;
mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use buffer::RetryBuffer;
pub use config::{
    DEFAULT_BUFFER_CAPACITY, DEFAULT_CONNECT_TIMEOUT, DEFAULT_WRITE_TIMEOUT, DatagramConfig,
    ForwarderConfig,
};
pub use datagram::DatagramForwarder;
pub use stream::StreamForwarder;
pub use transport::{TcpClient, Transport, UdpClient};
