pub mod logging;

pub use logging::{LogTarget, init_logging};
