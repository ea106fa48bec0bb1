//! Loopback bind-test probe.

use std::net::{Ipv4Addr, SocketAddr};

use tokio::net::TcpSocket;
use tracing::trace;

use crate::domain::PortState;
use crate::ports::PortProbePort;

/// Probes a port by trying to listen on `127.0.0.1:<port>`.
///
/// A successful bind means the port is free; the listener is dropped
/// before returning so the probe never holds the port. Any failure is
/// reported as busy, including `EACCES` on privileged ports, so a port
/// the current user may not bind is indistinguishable from an occupied
/// one.
///
/// On Linux the socket sets `SO_REUSEADDR`, so connections left in
/// `TIME_WAIT` by a server that just exited do not keep the port busy.
/// Linux still refuses the bind while any listener holds the port,
/// including one on `0.0.0.0`. Other platforms bind without it because
/// BSD stacks let a reusing socket bind over a wildcard listener.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoopbackProbe;

impl LoopbackProbe {
    pub fn new() -> Self {
        Self
    }
}

impl PortProbePort for LoopbackProbe {
    async fn probe(&self, port: u16) -> PortState {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));

        let result = TcpSocket::new_v4().and_then(|socket| {
            // TIME_WAIT leftovers are not owners; an active listener still fails the bind.
            #[cfg(target_os = "linux")]
            socket.set_reuseaddr(true)?;
            socket.bind(addr)?;
            socket.listen(1)
        });

        match result {
            Ok(listener) => {
                drop(listener);
                PortState::Free
            }
            Err(e) => {
                trace!(port = port, error = %e, "Bind failed, treating port as busy");
                PortState::Busy
            }
        }
    }
}
