//! Cryptographic operations for Chatdesk.
//!
//! - `password`: argon2id password hashing
//! - `token`: HS256 access token signing and validation

pub mod password;
pub mod token;
