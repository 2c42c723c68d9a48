//! Formatters turning [`LogRecord`] values into the opaque byte buffers the
//! forwarders ship.
//!
//! Forwarders never inspect these bytes. A formatter is therefore also
//! responsible for any record delimiting the receiving end relies on: the
//! text and JSON formatters terminate each record with a newline, while
//! [`MsgPackFormatter`] prefixes a big-endian length.

use std::{fmt, sync::Arc};

use crate::{error::FormatError, log_record::LogRecord};

mod json;
mod msgpack;

pub use json::JsonFormatter;
pub use msgpack::{DEFAULT_MAX_FRAME_SIZE, MsgPackFormatter, frame_payload};

/// Trait for formatting log records into bytes.
///
/// Implementors must be thread-safe (`Send + Sync`) so formatters can be
/// shared across threads in a logging system.
pub trait RecordFormatter: Send + Sync {
    /// Format a log record into a wire representation.
    fn format(&self, record: &LogRecord) -> Result<Vec<u8>, FormatError>;
}

/// Shared formatter trait object used across handlers.
#[derive(Clone)]
pub struct SharedFormatter {
    inner: Arc<dyn RecordFormatter>,
}

impl SharedFormatter {
    /// Create a shared formatter from an owned formatter implementation.
    pub fn new<F>(formatter: F) -> Self
    where
        F: RecordFormatter + 'static,
    {
        Self {
            inner: Arc::new(formatter),
        }
    }

    /// Wrap an existing shared formatter trait object.
    pub fn from_arc(inner: Arc<dyn RecordFormatter>) -> Self {
        Self { inner }
    }

    pub fn format(&self, record: &LogRecord) -> Result<Vec<u8>, FormatError> {
        self.inner.format(record)
    }
}

impl Default for SharedFormatter {
    fn default() -> Self {
        Self::new(DefaultFormatter)
    }
}

impl fmt::Debug for SharedFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedFormatter(<dyn RecordFormatter>)")
    }
}

/// Plain text, one record per line: `logger [LEVEL] message`.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultFormatter;

impl RecordFormatter for DefaultFormatter {
    fn format(&self, record: &LogRecord) -> Result<Vec<u8>, FormatError> {
        Ok(format!("{} [{}] {}\n", record.logger, record.level, record.message).into_bytes())
    }
}

impl RecordFormatter for Arc<dyn RecordFormatter> {
    fn format(&self, record: &LogRecord) -> Result<Vec<u8>, FormatError> {
        (**self).format(record)
    }
}

impl RecordFormatter for Box<dyn RecordFormatter> {
    fn format(&self, record: &LogRecord) -> Result<Vec<u8>, FormatError> {
        (**self).format(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use static_assertions::assert_impl_all;

    #[test]
    fn shared_formatter_is_send_sync() {
        assert_impl_all!(SharedFormatter: Send, Sync);
        assert_impl_all!(Arc<dyn RecordFormatter>: Send, Sync);
    }

    #[test]
    fn default_formatter_formats_basic_record() {
        let record = LogRecord::new("test", Level::Info, "hello");
        let output = DefaultFormatter.format(&record).expect("format");
        assert_eq!(output, b"test [INFO] hello\n");
    }

    #[test]
    fn shared_formatter_delegates() {
        let shared = SharedFormatter::from_arc(Arc::new(DefaultFormatter));
        let record = LogRecord::new("core", Level::Error, "boom");
        assert_eq!(shared.format(&record).unwrap(), b"core [ERROR] boom\n");
    }
}
