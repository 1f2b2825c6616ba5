//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod config_gen;
mod links;
mod profile;
mod session;

pub use config_gen::*;
pub use links::*;
pub use profile::*;
pub use session::{login, logout, whoami};
