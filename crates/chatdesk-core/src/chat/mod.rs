//! Chat session and message handling for Chatdesk.
//!
//! This module defines the `ChatRepository` trait that the infrastructure
//! layer implements, and the `ChatService` that orchestrates sessions,
//! ownership checks, and message exchanges.

pub mod repository;
pub mod service;
