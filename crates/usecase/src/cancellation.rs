//! One-way cancellation for cooperative scans.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Owner side of a cancellation flag. Only the source can cancel.
#[derive(Debug, Clone, Default)]
pub struct CancellationTokenSource {
    inner: Arc<AtomicBool>,
}

impl CancellationTokenSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only handle observing this source.
    pub fn token(&self) -> CancellationToken {
        CancellationToken { inner: Arc::clone(&self.inner) }
    }

    /// Moves every token of this source to the cancelled state. Idempotent.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }

    /// True when `token` was handed out by this source.
    pub fn issued(&self, token: &CancellationToken) -> bool {
        Arc::ptr_eq(&self.inner, &token.inner)
    }
}

/// Observer side of a [`CancellationTokenSource`].
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token nobody can cancel.
    pub fn never() -> Self {
        Self { inner: Arc::new(AtomicBool::new(false)) }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::never()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_visible_through_every_token() {
        let source = CancellationTokenSource::new();
        let first = source.token();
        let second = first.clone();
        assert!(!first.is_cancelled());

        source.cancel();
        source.cancel();
        assert!(first.is_cancelled());
        assert!(second.is_cancelled());
        assert!(source.issued(&second));
    }

    #[test]
    fn sources_are_independent() {
        let a = CancellationTokenSource::new();
        let b = CancellationTokenSource::new();
        a.cancel();
        assert!(!b.token().is_cancelled());
        assert!(!a.issued(&b.token()));
        assert!(!CancellationToken::never().is_cancelled());
    }
}
