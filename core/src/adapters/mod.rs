//! Adapters layer - Operating system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with the network stack or with
//! external process-inspection utilities.

pub mod lookup;
pub mod probe;

// Re-export main types for convenience
pub use lookup::SystemLookup;
pub use probe::LoopbackProbe;
