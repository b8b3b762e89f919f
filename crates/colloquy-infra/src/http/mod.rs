//! Platform HTTP clients and wire types.
//!
//! The platform exposes two planes on separate hosts: the runtime plane
//! (`run.<region>...`) for conversations and the control plane
//! (`admin.<region>...`) for builds and aliases. Both authenticate with a
//! Bearer API key wrapped in [`secrecy::SecretString`], which never appears
//! in Debug output or logs.

pub mod control;
pub mod runtime;
pub mod wire;
