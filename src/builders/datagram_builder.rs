//! Builder for [`DatagramForwarder`](crate::forwarder::DatagramForwarder).

use crate::{
    error::BuildError,
    forwarder::{DatagramConfig, DatagramForwarder},
    sync::SyncStrategy,
};

use super::{ForwarderBuilderTrait, validate_host};

/// Builder for constructing UDP [`DatagramForwarder`] instances.
#[derive(Clone, Debug)]
pub struct DatagramForwarderBuilder {
    host: String,
    port: u16,
    sync: SyncStrategy,
}

impl DatagramForwarderBuilder {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            sync: SyncStrategy::default(),
        }
    }

    pub fn with_sync(mut self, sync: SyncStrategy) -> Self {
        self.sync = sync;
        self
    }

    pub fn build_config(&self) -> Result<DatagramConfig, BuildError> {
        validate_host(&self.host)?;
        Ok(DatagramConfig::new(self.host.clone(), self.port).with_sync(self.sync))
    }
}

impl ForwarderBuilderTrait for DatagramForwarderBuilder {
    type Forwarder = DatagramForwarder;

    fn build_inner(&self) -> Result<Self::Forwarder, BuildError> {
        Ok(DatagramForwarder::new(self.build_config()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_host() {
        let err = DatagramForwarderBuilder::new("", 514)
            .build_inner()
            .expect_err("blank host must fail");
        assert!(matches!(err, BuildError::InvalidConfig(_)));
    }

    #[test]
    fn unresolvable_host_fails_construction() {
        let err = DatagramForwarderBuilder::new("host.invalid", 514)
            .build_inner()
            .expect_err("resolution failure must surface");
        assert!(matches!(err, BuildError::Sink(_)));
    }

    #[test]
    fn builds_against_loopback() {
        let forwarder = DatagramForwarderBuilder::new("127.0.0.1", 9)
            .with_sync(SyncStrategy::Exclusive)
            .build_inner()
            .expect("udp setup is local");
        assert_eq!(forwarder.config().port, 9);
        assert!(forwarder.local_addr().is_ok());
    }
}
