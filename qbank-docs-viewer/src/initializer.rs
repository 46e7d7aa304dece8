//! One-shot viewer initialization.
//!
//! An [`Initializer`] starts out [`InitState::Pending`]. The first page-load
//! delivery consumes the load, moves the configuration into the factory and
//! stores the returned handle in its [`HandleSlot`]; from then on it is
//! [`InitState::Initialized`] and further deliveries do nothing.
//!
//! No precondition is checked before the factory runs. A missing mount
//! element or unreachable document is the factory's to report.

use crate::config::ViewerConfiguration;
use crate::factory::ViewerFactory;
use crate::lifecycle::{HookResult, LoadSignal, OnPageLoad};
use crate::slot::HandleSlot;
use async_trait::async_trait;
use qbank_docs_log::{debug, info};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// Where an [`Initializer`] is in its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    /// Waiting for the page to finish loading
    Pending,
    /// The load has been consumed and the factory called; terminal
    Initialized,
}

impl fmt::Display for InitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitState::Pending => f.write_str("pending"),
            InitState::Initialized => f.write_str("initialized"),
        }
    }
}

/// Builds the viewer exactly once, on the first load delivery.
pub struct Initializer<F: ViewerFactory> {
    factory: F,
    // Held for the whole factory call so racing deliveries wait for it
    configuration: Mutex<Option<ViewerConfiguration>>,
    fired: AtomicBool,
    slot: HandleSlot<F::Handle>,
}

impl<F: ViewerFactory> Initializer<F> {
    /// Initializer for the QBank viewer; the configuration is built when
    /// the page loads.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            configuration: Mutex::new(None),
            fired: AtomicBool::new(false),
            slot: HandleSlot::new(),
        }
    }

    /// Initializer that hands `configuration` to the factory instead of the
    /// QBank defaults.
    pub fn with_configuration(factory: F, configuration: ViewerConfiguration) -> Self {
        Self {
            factory,
            configuration: Mutex::new(Some(configuration)),
            fired: AtomicBool::new(false),
            slot: HandleSlot::new(),
        }
    }

    /// `Initialized` as soon as a delivery has consumed the load.
    ///
    /// The handle lands in the slot only once the factory returns, so
    /// [`handle`](Self::handle) can still be `None` while the factory runs,
    /// and stays `None` if the factory panicked.
    pub fn state(&self) -> InitState {
        if self.fired.load(Ordering::Acquire) {
            InitState::Initialized
        } else {
            InitState::Pending
        }
    }

    /// A reader for the handle slot, valid for as long as any clone lives
    pub fn slot(&self) -> HandleSlot<F::Handle> {
        self.slot.clone()
    }

    pub fn handle(&self) -> Option<&F::Handle> {
        self.slot.get()
    }

    /// React to a page-load delivery.
    ///
    /// Only the first call runs the factory; it returns `true` for that call
    /// and `false` for every other. Calls racing with the first block until
    /// the factory has returned. A factory that panics is not run again.
    pub fn on_load(&self) -> bool {
        let mut pending = self
            .configuration
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if self.fired.swap(true, Ordering::AcqRel) {
            debug!("Viewer already initialized, ignoring load event");
            return false;
        }

        let configuration = pending.take().unwrap_or_else(ViewerConfiguration::qbank);
        info!(
            "Initializing viewer for {} at {}",
            configuration.spec_url, configuration.dom_id
        );

        let handle = self.factory.create(configuration);
        self.slot.fill(handle);
        true
    }

    /// Wait for the page to load, then initialize.
    ///
    /// Resolves to `false` if this call did not run the factory, either
    /// because an earlier delivery already did or because the load can no
    /// longer be reported.
    pub async fn wait_and_initialize(&self, mut signal: LoadSignal) -> bool {
        if !signal.loaded().await {
            debug!("Load signal closed while pending");
            return false;
        }
        self.on_load()
    }
}

#[async_trait]
impl<F: ViewerFactory> OnPageLoad for Initializer<F> {
    async fn on_page_load(&self) -> HookResult {
        self.on_load();
        Ok(())
    }
}

impl<F: ViewerFactory> fmt::Debug for Initializer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Initializer")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Initialize the QBank viewer right away and return the filled slot.
pub fn initialize<F: ViewerFactory>(factory: F) -> HandleSlot<F::Handle> {
    let initializer = Initializer::new(factory);
    initializer.on_load();
    initializer.slot()
}

/// Initialize right away with an explicit configuration.
pub fn initialize_with<F: ViewerFactory>(
    factory: F,
    configuration: ViewerConfiguration,
) -> HandleSlot<F::Handle> {
    let initializer = Initializer::with_configuration(factory, configuration);
    initializer.on_load();
    initializer.slot()
}
