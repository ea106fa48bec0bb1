//! Port status snapshot service.

use futures::future::join_all;
use tracing::debug;

use crate::adapters::{LoopbackProbe, SystemLookup};
use crate::config::Settings;
use crate::domain::{PortState, ProcessInfo, StatusEntry};
use crate::error::Result;
use crate::ports::{PortProbePort, ProcessLookupPort};

/// Status service wired to the real network stack and OS utilities.
pub type SystemStatusService = StatusService<LoopbackProbe, SystemLookup>;

/// Application service that turns a list of ports into status rows.
///
/// Every call is independent: nothing is cached between snapshots, so a
/// busy port's owner is re-resolved each time.
pub struct StatusService<P: PortProbePort, L: ProcessLookupPort> {
    probe: P,
    lookup: L,
    settings: Settings,
}

impl SystemStatusService {
    /// Service using the loopback probe and the platform lookup.
    pub fn system(settings: Settings) -> Self {
        Self::with_settings(LoopbackProbe::new(), SystemLookup::new(), settings)
    }
}

impl<P: PortProbePort, L: ProcessLookupPort> StatusService<P, L> {
    /// Create a new service with default settings.
    pub fn new(probe: P, lookup: L) -> Self {
        Self::with_settings(probe, lookup, Settings::default())
    }

    pub fn with_settings(probe: P, lookup: L, settings: Settings) -> Self {
        Self {
            probe,
            lookup,
            settings,
        }
    }

    /// Check every port concurrently and wait for all of them.
    ///
    /// Results are returned in the same order as `ports`, whatever order
    /// the individual checks finish in.
    pub async fn snapshot(&self, ports: &[u16]) -> Vec<StatusEntry> {
        join_all(ports.iter().map(|&port| self.check(port))).await
    }

    /// Probe one port, resolving its owner when busy.
    pub async fn check(&self, port: u16) -> StatusEntry {
        match self.probe.probe(port).await {
            PortState::Free => StatusEntry::free(port),
            PortState::Busy => StatusEntry::busy(port, self.lookup(port).await),
        }
    }

    /// Owner of a busy port, or `None` on any failure or timeout.
    pub async fn lookup(&self, port: u16) -> Option<ProcessInfo> {
        match tokio::time::timeout(self.settings.lookup_timeout, self.resolve(port)).await {
            Ok(Ok(info)) => info,
            Ok(Err(e)) => {
                debug!(port = port, error = %e, "Process lookup failed");
                None
            }
            Err(_) => {
                debug!(
                    port = port,
                    timeout_ms = self.settings.lookup_timeout.as_millis() as u64,
                    "Process lookup timed out"
                );
                None
            }
        }
    }

    async fn resolve(&self, port: u16) -> Result<Option<ProcessInfo>> {
        let Some(pid) = self.lookup.find_pid(port).await? else {
            debug!(port = port, "No owning process found");
            return Ok(None);
        };
        let Some(command) = self.lookup.command_line(pid).await? else {
            return Ok(None);
        };
        Ok(Some(ProcessInfo::new(pid, command)))
    }
}
