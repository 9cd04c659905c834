//! Business logic and repository trait definitions for Chatdesk.
//!
//! This crate defines the "ports" (repository and credential traits) that the
//! infrastructure layer implements. It depends only on `chatdesk-types` --
//! never on `chatdesk-infra` or any database/IO crate.

pub mod chat;
pub mod reply;
pub mod repository;
pub mod service;
