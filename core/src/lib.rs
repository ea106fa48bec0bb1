//! PortPulse Core Library
//!
//! Probes local TCP ports and identifies the processes that own them.
//! Provides functionality to:
//! - Check whether a loopback port is free or busy
//! - Resolve the owning PID and command line of a busy port
//! - Take ordered, concurrent snapshots over a list of ports
//! - Track per-port state between snapshots to detect transitions
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: Network stack and OS utility implementations
//! - `application`: Use case services
//!
//! # Platform Support
//! - macOS: Uses `lsof` and `ps` commands
//! - Linux: Uses `lsof` (falling back to `ss`) and `ps` commands
//! - Windows: Uses `netstat` and `tasklist` commands

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{tally, PortState, PriorStates, ProcessInfo, StatusEntry, Transition};

// Re-export other commonly used types
pub use adapters::{LoopbackProbe, SystemLookup};
pub use application::{StatusService, SystemStatusService};
pub use config::Settings;
pub use error::{Error, Result};
pub use ports::{PortProbePort, ProcessLookupPort};
