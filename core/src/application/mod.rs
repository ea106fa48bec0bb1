//! Application layer - Use case services.
//!
//! Services orchestrate domain logic using port interfaces.
//! They are generic over implementations, allowing mocks in tests.

mod status_service;

pub use status_service::{StatusService, SystemStatusService};
