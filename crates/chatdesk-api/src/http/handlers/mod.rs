//! HTTP request handlers for the REST API.

pub mod auth;
pub mod session;
pub mod ws;
