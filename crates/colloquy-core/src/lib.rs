//! Drivers and endpoint trait definitions for the Colloquy client.
//!
//! This crate defines the "ports" (endpoint traits) that the HTTP layer in
//! `colloquy-infra` implements, plus the two drivers that orchestrate them:
//! [`conversation::SessionDriver`] for multi-turn conversations and
//! [`lifecycle::ReleaseDriver`] for version builds and alias flips. It
//! depends only on `colloquy-types` -- never on reqwest or any IO crate.

pub mod conversation;
pub mod endpoint;
pub mod lifecycle;
