//! Backend test support utilities
//!
//! Shared by the backend's unit tests and integration test binaries:
//! idempotent logging setup, unique test data, and problem-details assertions.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
