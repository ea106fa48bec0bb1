//! Port liveness probe port (interface).

use crate::domain::PortState;

/// Port for checking whether a single TCP port is in use.
///
/// Implementations must never fail: every error is reported as
/// [`PortState::Busy`].
pub trait PortProbePort: Send + Sync {
    /// Classify `port` as free or busy right now.
    fn probe(&self, port: u16) -> impl std::future::Future<Output = PortState> + Send;
}
