//! Process lookup adapters.
//!
//! Platform-specific implementations of the two-step owner lookup.

#[cfg(unix)]
mod unix;

#[cfg(target_os = "windows")]
mod windows;

mod utils;

use crate::error::Result;
use crate::ports::ProcessLookupPort;

/// The process lookup for the current platform.
pub struct SystemLookup {
    #[cfg(unix)]
    inner: unix::UnixLookup,

    #[cfg(target_os = "windows")]
    inner: windows::WindowsLookup,
}

impl SystemLookup {
    /// Create a new lookup for the current platform.
    pub fn new() -> Self {
        Self {
            #[cfg(unix)]
            inner: unix::UnixLookup::new(),

            #[cfg(target_os = "windows")]
            inner: windows::WindowsLookup::new(),
        }
    }
}

impl Default for SystemLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLookupPort for SystemLookup {
    async fn find_pid(&self, port: u16) -> Result<Option<u32>> {
        self.inner.find_pid(port).await
    }

    async fn command_line(&self, pid: u32) -> Result<Option<String>> {
        self.inner.command_line(pid).await
    }
}
