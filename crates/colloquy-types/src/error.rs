//! Error taxonomies for the two API planes.
//!
//! Every failure that originates remotely carries the service's literal
//! error message, so callers never see a bare failure marker where the
//! platform said something more specific.

use thiserror::Error;

/// Errors from the conversation runtime plane.
#[derive(Debug, Error)]
pub enum ConverseError {
    /// Network-level failure: the request never produced a service answer.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The service answered with an error. `message` is the remote
    /// service's literal error text.
    #[error("service error: {message}")]
    Service { message: String },

    /// The service answered 2xx but the body was missing expected fields
    /// or carried values outside the documented contract.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors from the control plane (builds and aliases).
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Network-level failure. Retried a bounded number of times for the
    /// idempotent status poll, never for mutating calls.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The service answered with an error. `message` is the remote
    /// service's literal error text.
    #[error("service error: {message}")]
    Service { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// The requested resource does not exist. Transient during build
    /// polling (the job record may lag its creation), hard otherwise.
    #[error("resource not found")]
    NotFound,

    /// The service reported a terminal build failure.
    #[error("build failed: {reason}")]
    BuildFailed { reason: String },

    /// The caller's wall-clock wait budget was exhausted before the build
    /// reached a terminal status.
    #[error("build did not reach a terminal status within {waited_ms}ms")]
    BuildTimeout { waited_ms: u64 },

    /// No alias with the requested name exists on the bot.
    #[error("alias '{name}' not found")]
    AliasNotFound { name: String },
}
