//! Runtime
//!
//! Startup plumbing shared by the binary: picks the execution mode and
//! hands a ready [`ServiceContext`](crate::client::ServiceContext) to it.

pub mod modes;
