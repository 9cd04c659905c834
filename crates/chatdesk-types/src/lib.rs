//! Shared domain types for Chatdesk.
//!
//! This crate contains the core domain types used across the Chatdesk backend:
//! User, ChatSession, Message, auth/token types, and their associated errors.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror,
//! secrecy.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod user;
