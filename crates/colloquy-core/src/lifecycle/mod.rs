//! Version build and alias release orchestration.

pub mod release;

pub use release::{Backoff, ReleaseDriver};
