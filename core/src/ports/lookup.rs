//! Process lookup port (interface).

use crate::error::Result;

/// Port for identifying the process that owns a listening socket.
///
/// The lookup is split in two steps so every platform keeps the same
/// contract: first find the owning PID, then fetch its command line.
/// `Ok(None)` means "nothing found" and is not an error.
pub trait ProcessLookupPort: Send + Sync {
    /// PID of the first process listening on `port`.
    fn find_pid(&self, port: u16) -> impl std::future::Future<Output = Result<Option<u32>>> + Send;

    /// Full command line of `pid`.
    fn command_line(
        &self,
        pid: u32,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}
