//! Emission interface shared by the forwarders.
//!
//! [`Sink`] is the narrow contract both forwarders implement independently:
//! accept one formatted record, and flush on request. [`ForwardingHandler`]
//! sits in front of a sink and turns [`LogRecord`] values into those
//! formatted records.

use std::{fmt, sync::Arc};

use crate::{
    error::SinkError,
    formatter::{RecordFormatter, SharedFormatter},
    level::Level,
    log_record::LogRecord,
};

/// Destination for formatted records.
///
/// `Sink` is `Send + Sync` so a single instance can be shared by every
/// producer thread; implementations serialise access internally.
pub trait Sink: Send + Sync {
    /// Accept one formatted record; ownership moves into the sink.
    fn emit(&self, record: Vec<u8>) -> Result<(), SinkError>;

    /// Push out anything the sink is holding back. Never fails.
    fn flush(&self);
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn emit(&self, record: Vec<u8>) -> Result<(), SinkError> {
        (**self).emit(record)
    }

    fn flush(&self) {
        (**self).flush()
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn emit(&self, record: Vec<u8>) -> Result<(), SinkError> {
        (**self).emit(record)
    }

    fn flush(&self) {
        (**self).flush()
    }
}

/// Formats records and hands them to a [`Sink`].
pub struct ForwardingHandler {
    formatter: SharedFormatter,
    sink: Box<dyn Sink>,
    min_level: Level,
}

impl ForwardingHandler {
    /// Wrap `sink` with the [`DefaultFormatter`](crate::formatter::DefaultFormatter)
    /// and no level threshold.
    pub fn new<S: Sink + 'static>(sink: S) -> Self {
        Self {
            formatter: SharedFormatter::default(),
            sink: Box::new(sink),
            min_level: Level::Trace,
        }
    }

    pub fn with_formatter<F: RecordFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = SharedFormatter::new(formatter);
        self
    }

    pub fn with_shared_formatter(mut self, formatter: SharedFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Ignore records below `level`.
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    /// Format and emit `record`. Records below the threshold are ignored.
    pub fn handle(&self, record: &LogRecord) -> Result<(), SinkError> {
        if !self.enabled(record.level) {
            return Ok(());
        }
        let formatted = self.formatter.format(record)?;
        self.sink.emit(formatted)
    }

    pub fn flush(&self) {
        self.sink.flush();
    }
}

impl fmt::Debug for ForwardingHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardingHandler")
            .field("formatter", &self.formatter)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}
