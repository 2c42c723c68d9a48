//! Compatibility bridge for the Rust `log` crate.
//!
//! [`ForwardingLogger`] implements `log::Log` on top of a
//! [`ForwardingHandler`], so an application's `log::info!` and friends end
//! up at a remote collector. Records emitted by this crate itself are never
//! forwarded: they describe the forwarder's own state and would otherwise
//! re-enter it while its lock is held.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::{
    handler::ForwardingHandler,
    level::Level,
    log_record::{LogRecord, RecordMetadata},
};

const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Adapter implementing the Rust `log::Log` trait.
#[derive(Debug)]
pub struct ForwardingLogger {
    handler: ForwardingHandler,
}

fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

fn to_log_record(record: &Record<'_>) -> LogRecord {
    let mut metadata = RecordMetadata {
        module_path: record.module_path().unwrap_or_default().to_owned(),
        filename: record.file().unwrap_or_default().to_owned(),
        line_number: record.line().unwrap_or_default(),
        ..RecordMetadata::default()
    };
    metadata
        .key_values
        .insert("target".to_owned(), record.target().to_owned());
    LogRecord::with_metadata(
        &record.target().replace("::", "."),
        record.level().into(),
        &record.args().to_string(),
        metadata,
    )
}

impl ForwardingLogger {
    pub fn new(handler: ForwardingHandler) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &ForwardingHandler {
        &self.handler
    }
}

impl Log for ForwardingLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        !is_own_target(metadata.target()) && self.handler.enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Err(err) = self.handler.handle(&to_log_record(record)) {
            // `log::Log` has no error channel and logging here would recurse.
            eprintln!("netsink: failed to forward record: {err}");
        }
    }

    fn flush(&self) {
        self.handler.flush();
    }
}

/// Install `handler` as the global `log` backend.
///
/// Fails if another logger has already been installed.
pub fn install(handler: ForwardingHandler, max_level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ForwardingLogger::new(handler)))?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("netsink", true)]
    #[case("netsink::forwarder::stream", true)]
    #[case("netsinkish", false)]
    #[case("app::netsink", false)]
    fn recognises_own_targets(#[case] target: &str, #[case] expected: bool) {
        assert_eq!(is_own_target(target), expected);
    }

    #[rstest]
    fn converts_log_records() {
        let converted = to_log_record(
            &Record::builder()
                .args(format_args!("hello {}", 42))
                .level(log::Level::Warn)
                .target("app::db")
                .file(Some("db.rs"))
                .line(Some(7))
                .build(),
        );
        assert_eq!(converted.logger, "app.db");
        assert_eq!(converted.level, Level::Warn);
        assert_eq!(converted.message, "hello 42");
        assert_eq!(converted.metadata.line_number, 7);
        assert_eq!(
            converted.metadata.key_values.get("target").map(String::as_str),
            Some("app::db")
        );
    }
}
