//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with the operating system. Implementations live in `adapters`.

mod lookup;
mod probe;

pub use lookup::ProcessLookupPort;
pub use probe::PortProbePort;
