//! Multi-turn conversation orchestration.
//!
//! The driver owns nothing remote: the service is the source of truth for
//! dialog state. The client's correctness obligation is strictly "never lose
//! or reorder attributes between turns", not to understand them.

pub mod driver;

pub use driver::{ScriptRun, SessionDriver};
