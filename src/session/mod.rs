//! Session handling: shared context, guard and persistence

mod context;
mod guard;
mod store;

pub use context::{IdentityEvent, Session, SessionContext, SessionSnapshot};
pub use guard::{GuardDecision, OAuthProvider, Route, SessionGuard};
pub use store::SessionStore;
