//! Network log forwarding.
//!
//! `netsink` ships formatted log records to a remote collector over TCP
//! ([`StreamForwarder`]) or UDP ([`DatagramForwarder`]). Producers never block
//! on an unavailable collector for longer than a connect attempt, and a
//! prolonged outage is bounded by a fixed-size retry buffer that reports
//! overflow instead of growing.
//!
//! ```no_run
//! use netsink::{ForwarderBuilderTrait, ForwardingHandler, Level, LogRecord, StreamForwarderBuilder};
//!
//! let forwarder = StreamForwarderBuilder::new("logs.example.com", 5170)
//!     .with_lazy_connect(true)
//!     .with_buffer_capacity(128)
//!     .build_inner()?;
//! let handler = ForwardingHandler::new(forwarder);
//! handler.handle(&LogRecord::new("app", Level::Info, "started"))?;
//! handler.flush();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builders;
pub mod config_file;
pub mod error;
pub mod formatter;
pub mod forwarder;
pub mod handler;
pub mod level;
#[cfg(feature = "log-compat")]
pub mod log_compat;
pub mod log_record;
pub mod rate_limited_warner;
pub mod sync;

pub use builders::{DatagramForwarderBuilder, ForwarderBuilderTrait, StreamForwarderBuilder};
pub use config_file::{ForwarderFileConfig, load_config, parse_config};
pub use error::{BuildError, FormatError, SinkError};
pub use formatter::{DefaultFormatter, JsonFormatter, MsgPackFormatter, RecordFormatter, SharedFormatter};
pub use forwarder::{
    DatagramConfig, DatagramForwarder, ForwarderConfig, RetryBuffer, StreamForwarder, TcpClient,
    Transport, UdpClient,
};
pub use handler::{ForwardingHandler, Sink};
pub use level::Level;
#[cfg(feature = "log-compat")]
pub use log_compat::ForwardingLogger;
pub use log_record::{LogRecord, RecordMetadata};
pub use sync::SyncStrategy;
