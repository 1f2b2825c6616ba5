//! Backend access layer
//!
//! ```text
//! flows → ApiClient (cookies, auth, contract v1) → HttpTransport ──→ ureq (spawn_blocking)
//!                                                               └→ scripted (tests, offline)
//! ```

mod client;
pub mod constants;
mod cookies;
pub mod transport;
pub mod types;

pub use client::{ApiClient, Identity, body_or_invalid, status_error};
pub use cookies::CookieJar;
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, ScriptedTransport, UreqTransport,
};
pub use types::{CreateLinkPayload, MeResponse, ProfileUpdatePayload, ShortLink};
