//! Infrastructure layer for Chatdesk.
//!
//! Contains implementations of the ports defined in `chatdesk-core`:
//! SQLite storage, argon2 password hashing, HS256 token signing, and the
//! configuration loader.

pub mod config;
pub mod crypto;
pub mod sqlite;
