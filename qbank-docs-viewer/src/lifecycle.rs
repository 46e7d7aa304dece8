//! Page-load lifecycle.
//!
//! The hosting environment owns the "page finished loading" event. Here it
//! is modelled two ways:
//!
//! - a [`load_channel`] whose [`LoadSignal`] can be awaited by a task, and
//! - a [`PageLifecycle`] that the host calls on every load delivery, running
//!   registered [`OnPageLoad`] hooks in registration order.
//!
//! ```
//! use qbank_docs_viewer::lifecycle::load_channel;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let (notifier, mut signal) = load_channel();
//! notifier.notify_loaded();
//! assert!(signal.loaded().await);
//! # });
//! ```

use async_trait::async_trait;
use qbank_docs_log::{debug, error};
use std::sync::Arc;
use tokio::sync::{RwLock, watch};

/// Error returned by a load hook
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

pub type HookResult = Result<(), HookError>;

/// Create a connected notifier/signal pair, initially not loaded.
pub fn load_channel() -> (LoadNotifier, LoadSignal) {
    let (tx, rx) = watch::channel(false);
    (LoadNotifier { tx }, LoadSignal { rx })
}

/// Host side of the load event.
#[derive(Debug, Clone)]
pub struct LoadNotifier {
    tx: watch::Sender<bool>,
}

impl LoadNotifier {
    /// Report that the page finished loading. Safe to call repeatedly.
    pub fn notify_loaded(&self) {
        self.tx.send_replace(true);
    }

    /// Another signal attached to this notifier
    pub fn subscribe(&self) -> LoadSignal {
        LoadSignal {
            rx: self.tx.subscribe(),
        }
    }
}

/// Awaitable side of the load event.
#[derive(Debug, Clone)]
pub struct LoadSignal {
    rx: watch::Receiver<bool>,
}

impl LoadSignal {
    pub fn is_loaded(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until the page has loaded.
    ///
    /// Returns `false` if every notifier was dropped before the load was
    /// reported, meaning it never will be.
    pub async fn loaded(&mut self) -> bool {
        self.rx.wait_for(|loaded| *loaded).await.is_ok()
    }
}

/// Hook run when the host reports that the page has loaded.
#[async_trait]
pub trait OnPageLoad: Send + Sync {
    async fn on_page_load(&self) -> HookResult;
}

/// Ordered registry of load hooks, driven by the host.
#[derive(Clone, Default)]
pub struct PageLifecycle {
    hooks: Arc<RwLock<Vec<(String, Arc<dyn OnPageLoad>)>>>,
}

impl PageLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook; it runs after every hook registered before it.
    pub async fn register(&self, name: impl Into<String>, hook: Arc<dyn OnPageLoad>) {
        let name = name.into();
        debug!("Registered page load hook {}", name);
        self.hooks.write().await.push((name, hook));
    }

    pub async fn hook_count(&self) -> usize {
        self.hooks.read().await.len()
    }

    /// Deliver one load event to every hook.
    ///
    /// A failing hook does not stop the ones after it; all failures are
    /// returned together.
    pub async fn dispatch_load(&self) -> Result<(), Vec<(String, HookError)>> {
        let hooks = self.hooks.read().await;
        debug!("Dispatching page load to {} hook(s)", hooks.len());

        let mut errors = Vec::new();
        for (name, hook) in hooks.iter() {
            if let Err(e) = hook.on_page_load().await {
                error!("Page load hook {} failed: {}", name, e);
                errors.push((name.clone(), e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Wait for the load signal, then dispatch once.
    ///
    /// Returns `Ok(false)` without dispatching if the signal can never fire.
    pub async fn dispatch_when_loaded(
        &self,
        mut signal: LoadSignal,
    ) -> Result<bool, Vec<(String, HookError)>> {
        if !signal.loaded().await {
            debug!("Load notifier dropped before the page loaded");
            return Ok(false);
        }
        self.dispatch_load().await.map(|()| true)
    }

    pub async fn clear(&self) {
        self.hooks.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        id: usize,
        order: Arc<Mutex<Vec<usize>>>,
        fail: bool,
    }

    #[async_trait]
    impl OnPageLoad for Recorder {
        async fn on_page_load(&self) -> HookResult {
            self.order.lock().unwrap().push(self.id);
            if self.fail {
                return Err("boom".into());
            }
            Ok(())
        }
    }

    fn recorder(id: usize, order: &Arc<Mutex<Vec<usize>>>, fail: bool) -> Arc<dyn OnPageLoad> {
        Arc::new(Recorder {
            id,
            order: order.clone(),
            fail,
        })
    }

    #[tokio::test]
    async fn test_hooks_run_in_registration_order() {
        let lifecycle = PageLifecycle::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for id in 1..=3 {
            lifecycle.register(format!("hook{}", id), recorder(id, &order, false)).await;
        }

        assert_eq!(lifecycle.hook_count().await, 3);
        lifecycle.dispatch_load().await.unwrap();
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_hooks() {
        let lifecycle = PageLifecycle::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        lifecycle.register("bad", recorder(1, &order, true)).await;
        lifecycle.register("good", recorder(2, &order, false)).await;

        let errors = lifecycle.dispatch_load().await.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "bad");
        assert_eq!(*order.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_signal_fires_after_notify() {
        let (notifier, mut signal) = load_channel();
        assert!(!signal.is_loaded());

        let waiter = tokio::spawn(async move { signal.loaded().await });
        notifier.notify_loaded();
        notifier.notify_loaded();

        assert!(waiter.await.unwrap());
        assert!(notifier.subscribe().is_loaded());
    }

    #[tokio::test]
    async fn test_dropped_notifier_never_loads() {
        let lifecycle = PageLifecycle::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        lifecycle.register("hook", recorder(1, &order, false)).await;

        let (notifier, signal) = load_channel();
        drop(notifier);

        assert!(!lifecycle.dispatch_when_loaded(signal).await.unwrap());
        assert!(order.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let lifecycle = PageLifecycle::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        lifecycle.register("hook", recorder(1, &order, false)).await;

        lifecycle.clear().await;
        assert_eq!(lifecycle.hook_count().await, 0);
    }
}
