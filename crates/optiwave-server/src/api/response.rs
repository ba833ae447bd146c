//! Standard response structures for the OptiWave API
//!
//! The wire shapes live in `optiwave-common` so the client deserializes
//! against the same contract the server serializes; this module re-exports
//! them for handler code.

pub use optiwave_common::{ApiResponse, ErrorDetail, ErrorResponse};
