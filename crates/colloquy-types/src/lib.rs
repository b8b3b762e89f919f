//! Shared domain types for the Colloquy bot platform client.
//!
//! This crate contains the types exchanged between the drivers in
//! `colloquy-core` and the HTTP endpoint implementations in `colloquy-infra`:
//! sessions, turns, build jobs, alias bindings, and their error taxonomies.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod config;
pub mod conversation;
pub mod error;
pub mod lifecycle;
