//! Compiled-in defaults and input validation.
//!
//! portpulse reads no configuration files and no environment variables.
//! Everything tunable lives here as a constant or in [`Settings`].

use std::time::Duration;

use crate::error::{Error, Result};

/// Ports commonly used by local development servers, in display order.
pub const DEFAULT_PORTS: [u16; 28] = [
    3000, 3001, 3002, 3003, 3004, 3005, 4000, 4001, 4200, 5000, 5001, 5173, 5174, 5175, 5176,
    5177, 5178, 5179, 5180, 5500, 6000, 7000, 8000, 8080, 8081, 8888, 9000, 27017,
];

/// Maximum number of rows shown by the dashboard.
pub const DASHBOARD_MAX_PORTS: usize = 20;

/// Number of default ports checked by `status` when none are given.
pub const STATUS_DEFAULT_COUNT: usize = 10;

/// Width of the process column in the dashboard table.
pub const DASHBOARD_COMMAND_WIDTH: usize = 30;

/// Default refresh interval for monitor mode (seconds).
pub const MONITOR_INTERVAL_SECS: u64 = 5;

/// Default refresh interval for the dashboard (seconds).
pub const DASHBOARD_INTERVAL_SECS: u64 = 3;

/// Default refresh interval for watch mode (seconds).
pub const WATCH_INTERVAL_SECS: u64 = 2;

/// Upper bound on a single process lookup (both steps together).
pub const LOOKUP_TIMEOUT_MS: u64 = 2000;

/// Runtime knobs shared by every mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// How long a process lookup may take before it is abandoned.
    pub lookup_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_millis(LOOKUP_TIMEOUT_MS),
        }
    }
}

/// Ports shown by the dashboard: the first [`DASHBOARD_MAX_PORTS`] of `ports`.
pub fn dashboard_ports(ports: &[u16]) -> Vec<u16> {
    ports.iter().copied().take(DASHBOARD_MAX_PORTS).collect()
}

/// Ports checked by `status` when the user gives none.
pub fn status_default_ports() -> Vec<u16> {
    DEFAULT_PORTS
        .iter()
        .copied()
        .take(STATUS_DEFAULT_COUNT)
        .collect()
}

/// Parse and validate a port argument.
///
/// Accepts decimal numbers in 1..=65535, surrounding whitespace allowed.
pub fn parse_port(raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(Error::InvalidPort(raw.to_string())),
    }
}
