//! MessagePack serialisation with length-prefixed framing.

use rmp_serde::Serializer;
use serde::Serialize;

use crate::{error::FormatError, log_record::LogRecord};

use super::RecordFormatter;

/// Default maximum payload size (in bytes) accepted by the formatter.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1 << 20; // 1 MiB

#[derive(Serialize)]
struct SerializableRecord<'a> {
    logger: &'a str,
    level: &'a str,
    message: &'a str,
    timestamp_ns: u128,
    filename: &'a str,
    line_number: u32,
    module_path: &'a str,
    thread_name: Option<&'a str>,
    key_values: &'a std::collections::BTreeMap<String, String>,
}

impl<'a> From<&'a LogRecord> for SerializableRecord<'a> {
    fn from(record: &'a LogRecord) -> Self {
        let timestamp_ns = record
            .metadata
            .timestamp
            .duration_since(std::time::UNIX_EPOCH)
            .map(|dur| dur.as_nanos())
            .unwrap_or_default();

        Self {
            logger: &record.logger,
            level: record.level.as_str(),
            message: &record.message,
            timestamp_ns,
            filename: &record.metadata.filename,
            line_number: record.metadata.line_number,
            module_path: &record.metadata.module_path,
            thread_name: record.metadata.thread_name.as_deref(),
            key_values: &record.metadata.key_values,
        }
    }
}

/// Formatter emitting `u32` big-endian length + MessagePack map frames.
#[derive(Clone, Copy, Debug)]
pub struct MsgPackFormatter {
    max_frame_size: usize,
}

impl MsgPackFormatter {
    pub fn new(max_frame_size: usize) -> Self {
        Self { max_frame_size }
    }

    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }
}

impl Default for MsgPackFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_SIZE)
    }
}

impl RecordFormatter for MsgPackFormatter {
    fn format(&self, record: &LogRecord) -> Result<Vec<u8>, FormatError> {
        let payload = serialise_record(record)?;
        frame_payload(&payload, self.max_frame_size).ok_or(FormatError::FrameTooLarge {
            size: payload.len(),
            limit: self.max_frame_size,
        })
    }
}

fn serialise_record(record: &LogRecord) -> Result<Vec<u8>, FormatError> {
    let mut buf = Vec::with_capacity(128);
    SerializableRecord::from(record)
        .serialize(&mut Serializer::new(&mut buf).with_struct_map())
        .map_err(|err| FormatError::Serialise(err.to_string()))?;
    Ok(buf)
}

/// Frame the payload with a big-endian length prefix.
pub fn frame_payload(payload: &[u8], max_size: usize) -> Option<Vec<u8>> {
    if payload.len() > max_size {
        return None;
    }
    let len = u32::try_from(payload.len()).ok()?;
    let capacity = payload.len().checked_add(4)?;
    let mut framed = Vec::with_capacity(capacity);
    framed.extend(len.to_be_bytes());
    framed.extend_from_slice(payload);
    Some(framed)
}
