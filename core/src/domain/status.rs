//! Port status domain models.

// ============================================================================
// PortState
// ============================================================================

/// Whether a loopback TCP port can currently be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortState {
    /// Nothing holds the port; a bind on 127.0.0.1 succeeded.
    Free,
    /// The bind failed. Usually another listener, but permission errors look the same.
    Busy,
}

impl PortState {
    /// True when the port is occupied.
    pub fn is_busy(&self) -> bool {
        matches!(self, PortState::Busy)
    }

    /// Upper-case label used in terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            PortState::Free => "FREE",
            PortState::Busy => "BUSY",
        }
    }
}

impl std::fmt::Display for PortState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// ProcessInfo
// ============================================================================

/// The process found listening on a busy port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessInfo {
    /// Process ID of the first owning process.
    pub pid: u32,
    /// Full command line of that process.
    pub command: String,
}

impl ProcessInfo {
    pub fn new(pid: u32, command: impl Into<String>) -> Self {
        Self {
            pid,
            command: command.into(),
        }
    }
}

impl std::fmt::Display for ProcessInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PID {}: {}", self.pid, self.command)
    }
}

// ============================================================================
// StatusEntry
// ============================================================================

/// One row of a snapshot: a port, its state, and its owner when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub port: u16,
    pub state: PortState,
    /// Only ever `Some` when `state` is [`PortState::Busy`].
    pub process: Option<ProcessInfo>,
}

impl StatusEntry {
    /// A free port.
    pub fn free(port: u16) -> Self {
        Self {
            port,
            state: PortState::Free,
            process: None,
        }
    }

    /// A busy port with an optional resolved owner.
    pub fn busy(port: u16, process: Option<ProcessInfo>) -> Self {
        Self {
            port,
            state: PortState::Busy,
            process,
        }
    }

    /// Command line of the owner, if one was resolved.
    pub fn command(&self) -> Option<&str> {
        self.process.as_ref().map(|p| p.command.as_str())
    }
}

/// Count busy and free entries, in that order.
pub fn tally(entries: &[StatusEntry]) -> (usize, usize) {
    let busy = entries.iter().filter(|e| e.state.is_busy()).count();
    (busy, entries.len() - busy)
}

// ============================================================================
// Tests
// ============================================================================
