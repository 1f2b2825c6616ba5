//! Client layer for CLI/TUI interfaces
//!
//! ```text
//! CLI/TUI → ServiceContext ─→ flows (create / analytics / profile)
//!                          └→ SessionGuard → ApiClient → backend
//! ```

mod context;

pub use context::ServiceContext;
