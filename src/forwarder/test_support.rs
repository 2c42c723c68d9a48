//! Scripted in-memory transport for exercising the forwarders.

use std::{
    io,
    sync::{Arc, Barrier},
};

use parking_lot::Mutex;

use super::transport::Transport;

#[derive(Debug, Default)]
struct Script {
    reachable: bool,
    connected: bool,
    // Sends that may still succeed before the link breaks; `None` is unlimited.
    sends_before_break: Option<usize>,
    // Fail every send while keeping the connection up.
    reject_sends: bool,
    // Rendezvous for the next send: (entered, release).
    pause: Option<(Arc<Barrier>, Arc<Barrier>)>,
    sent: Vec<Vec<u8>>,
    connect_calls: usize,
    send_calls: usize,
}

/// Transport whose behaviour is controlled through shared handles.
///
/// Clones share the same script, so a test keeps one clone while the
/// forwarder owns the other.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub(crate) fn reachable() -> Self {
        let transport = Self::default();
        transport.set_reachable(true);
        transport
    }

    pub(crate) fn unreachable() -> Self {
        Self::default()
    }

    pub(crate) fn set_reachable(&self, reachable: bool) {
        self.script.lock().reachable = reachable;
    }

    /// Simulate the peer going away: the link drops and reconnects fail.
    pub(crate) fn go_down(&self) {
        let mut script = self.script.lock();
        script.reachable = false;
        script.connected = false;
    }

    /// Drop the current connection while leaving the peer reachable.
    pub(crate) fn drop_connection(&self) {
        self.script.lock().connected = false;
    }

    /// Let `sends` more sends succeed, then fail and disconnect.
    pub(crate) fn break_after(&self, sends: usize) {
        self.script.lock().sends_before_break = Some(sends);
    }

    pub(crate) fn heal(&self) {
        let mut script = self.script.lock();
        script.sends_before_break = None;
        script.reject_sends = false;
        script.reachable = true;
    }

    pub(crate) fn reject_sends(&self, reject: bool) {
        self.script.lock().reject_sends = reject;
    }

    /// Park the next send until the test releases it.
    ///
    /// The sending thread waits on `entered` once it is inside `send`, then
    /// on `release` before completing. The script itself stays unlocked
    /// while it waits.
    pub(crate) fn pause_next_send(&self) -> (Arc<Barrier>, Arc<Barrier>) {
        let entered = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        self.script.lock().pause = Some((Arc::clone(&entered), Arc::clone(&release)));
        (entered, release)
    }

    pub(crate) fn sent(&self) -> Vec<Vec<u8>> {
        self.script.lock().sent.clone()
    }

    pub(crate) fn connect_calls(&self) -> usize {
        self.script.lock().connect_calls
    }

    pub(crate) fn send_calls(&self) -> usize {
        self.script.lock().send_calls
    }
}

impl Transport for ScriptedTransport {
    fn connect(&mut self, _host: &str, _port: u16) -> io::Result<()> {
        let mut script = self.script.lock();
        script.connect_calls += 1;
        if !script.reachable {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "scripted peer unreachable",
            ));
        }
        script.connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.script.lock().connected
    }

    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let pause = {
            let mut script = self.script.lock();
            script.send_calls += 1;
            script.pause.take()
        };
        if let Some((entered, release)) = pause {
            entered.wait();
            release.wait();
        }
        let mut script = self.script.lock();
        if !script.connected {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "not connected"));
        }
        if script.reject_sends {
            return Err(io::Error::other("scripted send rejected"));
        }
        match script.sends_before_break {
            Some(0) => {
                script.connected = false;
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted break"));
            }
            Some(remaining) => script.sends_before_break = Some(remaining - 1),
            None => {}
        }
        script.sent.push(bytes.to_vec());
        Ok(())
    }
}
