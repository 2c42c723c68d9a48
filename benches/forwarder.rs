//! Benchmarks for the buffered emit/flush cycle of `StreamForwarder`.

use std::io;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use netsink::{
    DefaultFormatter, ForwarderConfig, Level, LogRecord, RecordFormatter, StreamForwarder,
    Transport,
};

/// Transport that accepts every write and discards it.
#[derive(Default)]
struct NullTransport {
    connected: bool,
}

impl Transport for NullTransport {
    fn connect(&mut self, _host: &str, _port: u16) -> io::Result<()> {
        self.connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn send(&mut self, payload: &[u8]) -> io::Result<()> {
        black_box(payload);
        Ok(())
    }
}

fn forwarder(capacity: usize) -> StreamForwarder<NullTransport> {
    let config = ForwarderConfig::new("collector", 5170)
        .with_buffer_capacity(capacity.try_into().expect("non-zero capacity"));
    StreamForwarder::with_transport(config, NullTransport::default()).expect("null transport")
}

fn forwarder_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_forwarder");
    let record = DefaultFormatter
        .format(&LogRecord::new("bench", Level::Info, "request served in 12ms"))
        .expect("format record");

    group.bench_function("emit_then_flush_64", |b| {
        b.iter_batched(
            || forwarder(64),
            |fwd| {
                for _ in 0..64 {
                    fwd.emit(record.clone()).expect("buffer has room");
                }
                fwd.flush();
                fwd
            },
            BatchSize::SmallInput,
        );
    });

    let forced = StreamForwarder::with_transport(
        ForwarderConfig::new("collector", 5170).with_force_flush(true),
        NullTransport::default(),
    )
    .expect("null transport");
    group.bench_function("force_flush_emit", |b| {
        b.iter(|| forced.emit(black_box(record.clone())).expect("sent"));
    });

    group.finish();
}

criterion_group!(benches, forwarder_benchmarks);
criterion_main!(benches);
