//! Loopback collectors shared by the integration tests.

#![allow(dead_code)]

use std::{
    io::{BufRead, BufReader},
    net::{SocketAddr, TcpListener, UdpSocket},
    sync::mpsc,
    thread,
    time::Duration,
};

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Bind an ephemeral loopback listener.
pub fn loopback_listener() -> TcpListener {
    TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener")
}

/// Reserve a loopback port with nothing listening on it.
pub fn closed_port() -> SocketAddr {
    let listener = loopback_listener();
    listener.local_addr().expect("listener has address")
}

/// Accept one connection and forward every received line.
pub fn spawn_line_collector(listener: TcpListener) -> (SocketAddr, mpsc::Receiver<String>) {
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept connection");
        for line in BufReader::new(stream).lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    (addr, rx)
}

/// Collect exactly `n` lines or panic on timeout.
pub fn recv_lines(rx: &mpsc::Receiver<String>, n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            rx.recv_timeout(RECV_TIMEOUT)
                .unwrap_or_else(|err| panic!("line {i} not received: {err}"))
        })
        .collect()
}

/// Bind a loopback UDP socket with a receive timeout.
pub fn udp_receiver() -> UdpSocket {
    let socket = UdpSocket::bind(("127.0.0.1", 0)).expect("bind udp receiver");
    socket
        .set_read_timeout(Some(RECV_TIMEOUT))
        .expect("set read timeout");
    socket
}

pub fn recv_datagram(socket: &UdpSocket) -> Vec<u8> {
    let mut buf = vec![0u8; 65_536];
    let len = socket.recv(&mut buf).expect("datagram received");
    buf.truncate(len);
    buf
}
