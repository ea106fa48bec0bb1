//! Domain layer - Pure data models for port status.
//!
//! These types have no I/O dependencies and can be tested in isolation.

mod status;
mod transition;

pub use status::{tally, PortState, ProcessInfo, StatusEntry};
pub use transition::{PriorStates, Transition};
