//! Forwarder builders and associated traits.
//!
//! Builders collect user supplied options, validate them, and construct a
//! forwarder. Each builder implements [`ForwarderBuilderTrait`], which can
//! also hand back a boxed [`Sink`] for callers that do not care about the
//! concrete forwarder type.

use crate::{error::BuildError, handler::Sink};

pub mod datagram_builder;
pub mod stream_builder;

pub use datagram_builder::DatagramForwarderBuilder;
pub use stream_builder::StreamForwarderBuilder;

/// Validate that a value is greater than zero, returning an error otherwise.
macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value == 0 {
            Err($crate::error::BuildError::InvalidConfig(format!(
                "{} must be greater than zero",
                $field
            )))
        } else {
            Ok($value)
        }
    }};
}

pub(crate) use ensure_positive;

pub(crate) fn validate_host(host: &str) -> Result<(), BuildError> {
    if host.trim().is_empty() {
        return Err(BuildError::InvalidConfig("host must not be empty".into()));
    }
    Ok(())
}

/// Trait implemented by all forwarder builders.
pub trait ForwarderBuilderTrait: Send + Sync {
    type Forwarder: Sink + 'static;

    /// Validate the options and construct the forwarder.
    fn build_inner(&self) -> Result<Self::Forwarder, BuildError>;

    /// Build the forwarder behind a trait object.
    fn build(&self) -> Result<Box<dyn Sink>, BuildError> {
        Ok(Box::new(self.build_inner()?))
    }
}
