//! API Module
//!
//! HTTP handlers and routing over the shared store.
//!
//! # Endpoints
//! - `PUT /set` - Store a value with optional TTL
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /has/:key` - Check whether a key is live
//! - `DELETE /del/:key` - Delete a key
//! - `GET /keys` - List live keys, optionally filtered by `?pattern=`
//! - `GET /size` - Live entry count
//! - `POST /clear` - Remove every entry
//! - `GET /meta/:key` - Entry timestamps
//! - `GET /stats` - Store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
