//! Request-scoped context
//!
//! A [`Context`] carries typed values down to handlers and an optional
//! cancellation signal. The multiplexer clones its root context into every
//! request and layers the captured path parameters on top.

use http::Extensions;
use std::sync::Arc;
use tokio::sync::watch;

/// Typed values plus a cancellation scope
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: Extensions,
    cancel: Option<watch::Receiver<bool>>,
}

/// Cancels every [`Context`] derived from the one it was created with
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // send_replace never fails, even when every receiver is gone
        self.tx.send_replace(true);
    }
}

impl Context {
    /// Empty context that is never cancelled
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a cancellable context.
    ///
    /// Values are kept. If `self` was already cancellable, the new handle
    /// replaces that scope for the returned context.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            values: self.values.clone(),
            cancel: Some(rx),
        };
        (ctx, CancelHandle { tx: Arc::new(tx) })
    }

    /// Derive a context holding `value`, replacing any value of the same type
    pub fn with_value<T>(&self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut ctx = self.clone();
        ctx.values.insert(value);
        ctx
    }

    pub fn value<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.values.get::<T>()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolve once the context is cancelled. Pends forever for a context
    /// without a cancellation scope.
    pub async fn cancelled(&self) {
        let Some(mut rx) = self.cancel.clone() else {
            return std::future::pending().await;
        };
        // a dropped handle can no longer cancel
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
