//! Send/Sync guarantees for core types.

use netsink::{
    DatagramForwarder, DatagramForwarderBuilder, ForwardingHandler, RetryBuffer, SharedFormatter,
    StreamForwarder, StreamForwarderBuilder,
};
use rstest::rstest;
use static_assertions::assert_impl_all;

#[rstest]
fn builders_are_send_sync() {
    assert_impl_all!(StreamForwarderBuilder: Send, Sync);
    assert_impl_all!(DatagramForwarderBuilder: Send, Sync);
}

#[rstest]
fn components_are_send_sync() {
    assert_impl_all!(StreamForwarder: Send, Sync);
    assert_impl_all!(DatagramForwarder: Send, Sync);
    assert_impl_all!(ForwardingHandler: Send, Sync);
    assert_impl_all!(SharedFormatter: Send, Sync);
    assert_impl_all!(RetryBuffer: Send);
}
