//! Cooperative request cancellation.
//!
//! Every [`HttpRequest`](crate::models::HttpRequest) instance owns exactly one
//! token. Cancelling never interrupts the transport call; the controller checks
//! the token once the call returns and drops the outcome if it was set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag marking one request instance as cancelled.
///
/// Clones observe the same flag. Identity of the underlying flag is what ties
/// a token to a single request instance, see [`CancellationToken::same_token`].
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token as cancelled. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Checks if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns `true` if both tokens share the same flag.
    pub fn same_token(&self, other: &CancellationToken) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}
