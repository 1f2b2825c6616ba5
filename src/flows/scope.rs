//! Request lifetime of one screen activation

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::errors::{Result, ShortyError};

/// Cancellation scope owned by an active screen
///
/// Leaving the screen cancels the scope; every request started through it
/// then resolves to [`ShortyError::Cancelled`] and its result is dropped.
#[derive(Debug, Clone, Default)]
pub struct ScreenScope {
    token: CancellationToken,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Scope cancelled together with `self`, but cancellable on its own
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        trace!("Screen scope cancelled");
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` until it finishes or the scope is cancelled
    ///
    /// The result of a future that finishes after cancellation is discarded.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.token.is_cancelled() {
            return Err(ShortyError::cancelled("Screen was left"));
        }
        let result = tokio::select! {
            biased;
            _ = self.token.cancelled() => return Err(ShortyError::cancelled("Screen was left")),
            result = fut => result,
        };
        if self.token.is_cancelled() {
            return Err(ShortyError::cancelled("Screen was left"));
        }
        result
    }

    /// Like [`ScreenScope::run`] for futures that cannot fail
    pub async fn guard<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = T>,
    {
        self.run(async move { Ok(fut.await) }).await
    }
}
