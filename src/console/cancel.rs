//! View-scoped cancellation.
//!
//! A [`CancelScope`] is handed to every data context operation started on
//! behalf of a view. Once the view goes away the scope is cancelled and the
//! context refuses to commit results from operations that were started in it.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::watch;

#[derive(Debug)]
struct ScopeInner {
    cancelled: watch::Sender<bool>,
    parent: Option<CancelScope>,
}

/// Cooperative cancellation token. Clones share the same state.
#[derive(Debug, Clone)]
pub struct CancelScope {
    inner: Arc<ScopeInner>,
}

impl Default for CancelScope {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelScope {
    /// A fresh, uncancelled root scope
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    fn with_parent(parent: Option<CancelScope>) -> Self {
        let (cancelled, _) = watch::channel(false);
        Self {
            inner: Arc::new(ScopeInner { cancelled, parent }),
        }
    }

    /// A scope that is cancelled together with `self`, but can also be
    /// cancelled on its own without affecting `self`.
    pub fn child(&self) -> Self {
        Self::with_parent(Some(self.clone()))
    }

    pub fn cancel(&self) {
        self.inner.cancelled.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.cancelled.borrow()
            || self
                .inner
                .parent
                .as_ref()
                .is_some_and(CancelScope::is_cancelled)
    }

    /// Resolves once this scope or any ancestor is cancelled
    pub fn cancelled(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            let own = wait_for_cancel(self.inner.cancelled.subscribe());
            match &self.inner.parent {
                Some(parent) => {
                    tokio::select! {
                        _ = own => {}
                        _ = parent.cancelled() => {}
                    }
                }
                None => own.await,
            }
        })
    }

    /// Guard that cancels the scope when dropped, for tying a scope to the
    /// lifetime of a view value.
    pub fn drop_guard(&self) -> CancelOnDrop {
        CancelOnDrop {
            scope: self.clone(),
        }
    }
}

async fn wait_for_cancel(mut rx: watch::Receiver<bool>) {
    loop {
        let cancelled = *rx.borrow_and_update();
        if cancelled {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender lives as long as the scope; a closed channel means the
            // scope is gone and can never be cancelled.
            std::future::pending::<()>().await;
        }
    }
}

/// Cancels its scope on drop
#[derive(Debug)]
pub struct CancelOnDrop {
    scope: CancelScope,
}

impl CancelOnDrop {
    pub fn scope(&self) -> &CancelScope {
        &self.scope
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
