//! HTTP layer for the Colloquy bot platform client.
//!
//! Contains the concrete implementations of the endpoint traits defined in
//! `colloquy-core`: [`http::runtime::HttpConversationClient`] for the
//! conversation runtime plane and [`http::control::HttpLifecycleClient`] for
//! the build/alias control plane.

pub mod http;

pub use http::control::HttpLifecycleClient;
pub use http::runtime::HttpConversationClient;
