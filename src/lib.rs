//! Shorty - a session-aware client for a URL-shortening backend
//!
//! This library provides the building blocks of the `shorty` binary: an
//! HTTP client for the backend's JSON API, the session guard that gates
//! protected screens, and the link creation / analytics / profile flows
//! shared by the command line and terminal interfaces.
//!
//! # Features
//! - **cli**: Command-line interface (default)
//! - **clipboard**: System clipboard through arboard (default)
//! - **tui**: Terminal user interface
//! - **full**: All features enabled
//!
//! # Architecture
//! - `api`: Transport seam, cookie jar, typed endpoints
//! - `session`: Identity context, persistence, route guard
//! - `flows`: Link creation, analytics and profile logic
//! - `client`: Wires config, API client, guard and flows together
//! - `interfaces`: User interfaces (CLI, TUI)
//! - `config`: Configuration management
//! - `runtime`: Execution mode selection
//! - `system`: Logging

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod flows;
pub mod interfaces;
pub mod runtime;
pub mod session;
pub mod system;
