//! HTTP/REST API layer for Chatdesk.
//!
//! Axum-based REST API at `/api/v1/` with bearer token authentication,
//! a WebSocket chat channel, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
