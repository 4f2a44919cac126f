use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{ForgeError, Result};

/// Cooperative cancellation flag handed down from `main`.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once the token has been raised.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ForgeError::Cancelled)
        } else {
            Ok(())
        }
    }
}
