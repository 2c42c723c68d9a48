//! Newline-delimited JSON formatter.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::{error::FormatError, log_record::LogRecord};

use super::RecordFormatter;

#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: String,
    logger: &'a str,
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread: Option<&'a str>,
    #[serde(skip_serializing_if = "no_fields")]
    fields: &'a BTreeMap<String, String>,
}

fn no_fields(fields: &&BTreeMap<String, String>) -> bool {
    fields.is_empty()
}

/// Emits one JSON object per line with an RFC 3339 UTC timestamp.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormatter;

impl RecordFormatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> Result<Vec<u8>, FormatError> {
        let timestamp: DateTime<Utc> = record.metadata.timestamp.into();
        let json = JsonRecord {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            logger: &record.logger,
            level: record.level.as_str(),
            message: &record.message,
            thread: record.metadata.thread_name.as_deref(),
            fields: &record.metadata.key_values,
        };
        let mut out =
            serde_json::to_vec(&json).map_err(|err| FormatError::Serialise(err.to_string()))?;
        out.push(b'\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn emits_single_line_object() {
        let record = LogRecord::new("svc", Level::Error, "line\nbreak").with_key_value("k", "v");
        let out = JsonFormatter.format(&record).expect("format");
        assert_eq!(out.last(), Some(&b'\n'));
        assert_eq!(out.iter().filter(|b| **b == b'\n').count(), 1);

        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(value["logger"], "svc");
        assert_eq!(value["level"], "ERROR");
        assert_eq!(value["message"], "line\nbreak");
        assert_eq!(value["fields"]["k"], "v");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn omits_empty_fields() {
        let record = LogRecord::new("svc", Level::Info, "plain");
        let out = JsonFormatter.format(&record).expect("format");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert!(value.get("fields").is_none());
    }
}
