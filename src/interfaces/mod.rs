//! User interfaces
//!
//! Both front-ends drive the same flows through a shared
//! [`ServiceContext`](crate::client::ServiceContext).

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "tui")]
pub mod tui;
