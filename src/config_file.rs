//! INI configuration for the forwarders.
//!
//! A configuration file holds at most one `[stream]` and one `[datagram]`
//! section. Each section is turned into the matching builder so the usual
//! validation runs when the forwarder is built:
//!
//! ```ini
//! [stream]
//! host = logs.example.com
//! port = 5170
//! lazy_connect = true
//! buffer_capacity = 128
//! sync = exclusive
//!
//! [datagram]
//! host = 127.0.0.1
//! port = 514
//! ```

use std::{fs, io::ErrorKind, path::Path};

use encoding_rs::Encoding;
use ini::{Ini, Properties};

use crate::{
    builders::{DatagramForwarderBuilder, StreamForwarderBuilder},
    error::BuildError,
    sync::SyncStrategy,
};

const STREAM_SECTION: &str = "stream";
const DATAGRAM_SECTION: &str = "datagram";

const STREAM_KEYS: &[&str] = &[
    "host",
    "port",
    "lazy_connect",
    "force_flush",
    "buffer_capacity",
    "connect_timeout_ms",
    "write_timeout_ms",
    "warn_interval_ms",
    "sync",
];
const DATAGRAM_KEYS: &[&str] = &["host", "port", "sync"];

/// Builders described by a configuration file.
#[derive(Clone, Debug, Default)]
pub struct ForwarderFileConfig {
    pub stream: Option<StreamForwarderBuilder>,
    pub datagram: Option<DatagramForwarderBuilder>,
}

/// Read and parse the configuration file at `path`.
///
/// `encoding` is a WHATWG label such as `"utf-8"` or `"latin1"`; UTF-8 is
/// assumed when it is `None`.
pub fn load_config(
    path: impl AsRef<Path>,
    encoding: Option<&str>,
) -> Result<ForwarderFileConfig, BuildError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => BuildError::InvalidConfig(format!(
            "{} doesn't exist",
            path.display()
        )),
        _ => BuildError::Io(err),
    })?;
    if bytes.is_empty() {
        return Err(BuildError::InvalidConfig(format!(
            "{} is an empty file",
            path.display()
        )));
    }
    let text = decode_with_encoding(&bytes, encoding.unwrap_or("utf-8"))?;
    parse_config(&text)
}

fn decode_with_encoding(bytes: &[u8], label: &str) -> Result<String, BuildError> {
    let normalized_label = label.trim().to_ascii_lowercase();
    let encoding = Encoding::for_label(normalized_label.as_bytes())
        .ok_or_else(|| BuildError::InvalidConfig(format!("unknown encoding {label}")))?;
    let (decoded, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(BuildError::InvalidConfig(format!(
            "configuration is not valid {}",
            encoding.name()
        )));
    }
    Ok(decoded.into_owned())
}

/// Parse configuration text.
pub fn parse_config(text: &str) -> Result<ForwarderFileConfig, BuildError> {
    let ini = Ini::load_from_str(text)
        .map_err(|err| BuildError::InvalidConfig(format!("malformed configuration: {err}")))?;
    let mut config = ForwarderFileConfig::default();
    for (section, props) in ini.iter() {
        match section {
            Some(STREAM_SECTION) => config.stream = Some(stream_builder(props)?),
            Some(DATAGRAM_SECTION) => config.datagram = Some(datagram_builder(props)?),
            None if props.is_empty() => {}
            None => {
                return Err(BuildError::InvalidConfig(
                    "keys must appear inside a [stream] or [datagram] section".into(),
                ));
            }
            Some(other) => {
                return Err(BuildError::InvalidConfig(format!(
                    "unknown section [{other}]"
                )));
            }
        }
    }
    Ok(config)
}

fn check_keys(section: &str, props: &Properties, allowed: &[&str]) -> Result<(), BuildError> {
    match props.iter().find(|(key, _)| !allowed.contains(key)) {
        Some((key, _)) => Err(BuildError::InvalidConfig(format!(
            "unknown key '{key}' in [{section}]"
        ))),
        None => Ok(()),
    }
}

fn required<'a>(section: &str, props: &'a Properties, key: &str) -> Result<&'a str, BuildError> {
    props
        .get(key)
        .ok_or_else(|| BuildError::InvalidConfig(format!("[{section}] requires '{key}'")))
}

fn parse_value<T: std::str::FromStr>(section: &str, key: &str, raw: &str) -> Result<T, BuildError> {
    raw.trim().parse().map_err(|_| {
        BuildError::InvalidConfig(format!("[{section}] {key} has invalid value '{raw}'"))
    })
}

fn parse_bool(section: &str, key: &str, raw: &str) -> Result<bool, BuildError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(BuildError::InvalidConfig(format!(
            "[{section}] {key} must be a boolean, got '{raw}'"
        ))),
    }
}

fn parse_sync(section: &str, raw: &str) -> Result<SyncStrategy, BuildError> {
    raw.parse()
        .map_err(|msg: String| BuildError::InvalidConfig(format!("[{section}] {msg}")))
}

fn stream_builder(props: &Properties) -> Result<StreamForwarderBuilder, BuildError> {
    let section = STREAM_SECTION;
    check_keys(section, props, STREAM_KEYS)?;
    let host = required(section, props, "host")?;
    let port = parse_value(section, "port", required(section, props, "port")?)?;
    let mut builder = StreamForwarderBuilder::new(host.trim(), port);

    if let Some(raw) = props.get("lazy_connect") {
        builder = builder.with_lazy_connect(parse_bool(section, "lazy_connect", raw)?);
    }
    if let Some(raw) = props.get("force_flush") {
        builder = builder.with_force_flush(parse_bool(section, "force_flush", raw)?);
    }
    if let Some(raw) = props.get("buffer_capacity") {
        builder = builder.with_buffer_capacity(parse_value(section, "buffer_capacity", raw)?);
    }
    if let Some(raw) = props.get("connect_timeout_ms") {
        builder = builder.with_connect_timeout_ms(parse_value(section, "connect_timeout_ms", raw)?);
    }
    if let Some(raw) = props.get("write_timeout_ms") {
        builder = builder.with_write_timeout_ms(parse_value(section, "write_timeout_ms", raw)?);
    }
    if let Some(raw) = props.get("warn_interval_ms") {
        builder = builder.with_warn_interval_ms(parse_value(section, "warn_interval_ms", raw)?);
    }
    if let Some(raw) = props.get("sync") {
        builder = builder.with_sync(parse_sync(section, raw)?);
    }
    Ok(builder)
}

fn datagram_builder(props: &Properties) -> Result<DatagramForwarderBuilder, BuildError> {
    let section = DATAGRAM_SECTION;
    check_keys(section, props, DATAGRAM_KEYS)?;
    let host = required(section, props, "host")?;
    let port = parse_value(section, "port", required(section, props, "port")?)?;
    let mut builder = DatagramForwarderBuilder::new(host.trim(), port);
    if let Some(raw) = props.get("sync") {
        builder = builder.with_sync(parse_sync(section, raw)?);
    }
    Ok(builder)
}
