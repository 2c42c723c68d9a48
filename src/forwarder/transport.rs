//! Transport primitives for the forwarders.
//!
//! A [`Transport`] owns a connection that is either live or not yet
//! established. It never reconnects on its own; the owning forwarder decides
//! when to call [`Transport::connect`] again.

use std::{
    io::{self, Write},
    net::{Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream, ToSocketAddrs, UdpSocket},
    time::Duration,
};

use super::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_WRITE_TIMEOUT};

/// Connection handle driven by a forwarder.
pub trait Transport: Send {
    /// Establish (or re-establish) the connection to `host:port`.
    fn connect(&mut self, host: &str, port: u16) -> io::Result<()>;

    /// Cheap, non-blocking status check.
    fn is_connected(&self) -> bool;

    /// Send a complete record.
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn connect(&mut self, host: &str, port: u16) -> io::Result<()> {
        (**self).connect(host, port)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).send(bytes)
    }
}

fn resolve(host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
    if addrs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{host}:{port} did not resolve to any address"),
        ));
    }
    Ok(addrs)
}

fn not_connected() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "transport is not connected")
}

/// Stream transport over TCP.
#[derive(Debug)]
pub struct TcpClient {
    stream: Option<TcpStream>,
    connect_timeout: Duration,
    write_timeout: Duration,
}

impl TcpClient {
    pub fn new(connect_timeout: Duration, write_timeout: Duration) -> Self {
        Self {
            stream: None,
            connect_timeout,
            write_timeout,
        }
    }

    /// Drop the current socket, if any.
    pub fn close(&mut self) {
        self.stream = None;
    }

    fn connect_any(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        let mut last_err = None;
        for addr in resolve(host, port)? {
            match TcpStream::connect_timeout(&addr, self.connect_timeout) {
                Ok(stream) => return Ok(stream),
                Err(err) => last_err = Some(err),
            }
        }
        let cause = last_err.map(|err| err.to_string()).unwrap_or_default();
        Err(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            format!("unable to connect to {host}:{port}: {cause}"),
        ))
    }
}

impl Default for TcpClient {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_TIMEOUT, DEFAULT_WRITE_TIMEOUT)
    }
}

impl Transport for TcpClient {
    fn connect(&mut self, host: &str, port: u16) -> io::Result<()> {
        self.close();
        let stream = self.connect_any(host, port)?;
        stream.set_nodelay(true)?;
        stream.set_write_timeout(Some(self.write_timeout))?;
        self.stream = Some(stream);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let stream = self.stream.as_mut().ok_or_else(not_connected)?;
        let result = stream.write_all(bytes).and_then(|()| stream.flush());
        if result.is_err() {
            // A partially written record leaves the peer mid-frame.
            self.close();
        }
        result
    }
}

/// Datagram transport over UDP.
///
/// "Connecting" binds an ephemeral local socket and fixes its peer address;
/// no packets are exchanged.
#[derive(Debug, Default)]
pub struct UdpClient {
    socket: Option<UdpSocket>,
}

impl UdpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local address of the bound socket.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket
            .as_ref()
            .ok_or_else(not_connected)?
            .local_addr()
    }
}

impl Transport for UdpClient {
    fn connect(&mut self, host: &str, port: u16) -> io::Result<()> {
        self.socket = None;
        let remote = resolve(host, port)?[0];
        let local: SocketAddr = if remote.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local)?;
        socket.connect(remote)?;
        self.socket = Some(socket);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.socket.is_some()
    }

    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let socket = self.socket.as_ref().ok_or_else(not_connected)?;
        let sent = socket.send(bytes)?;
        if sent != bytes.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("datagram truncated: sent {sent} of {} bytes", bytes.len()),
            ));
        }
        Ok(())
    }
}
