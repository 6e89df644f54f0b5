//! Request and Response models for the command driver
//!
//! This module defines the DTOs used for deserializing command lines and
//! serializing their responses.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{Request, MAX_HEADER_LENGTH};
pub use responses::{
    ClearResponse, DumpResponse, ErrorResponse, OutcomeResponse, Response, SnapshotResponse,
    StatsResponse,
};
