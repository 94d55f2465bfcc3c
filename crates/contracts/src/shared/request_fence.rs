//! Request tokens for discarding stale async responses.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Hands out monotonically increasing tokens; only the newest one is current.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestFence {
    latest: Arc<AtomicU64>,
}

impl RequestFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, making every earlier token stale
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Marks all outstanding tokens stale without starting a request
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}
