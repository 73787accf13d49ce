//! Request and Response models for the store's HTTP surface
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{KeysQuery, SetRequest};
pub use responses::{
    DeleteResponse, ErrorResponse, GetResponse, HasResponse, HealthResponse, KeysResponse,
    MetaResponse, SetResponse, SizeResponse, StatsResponse,
};
