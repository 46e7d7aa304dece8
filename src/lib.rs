// QBank API documentation - Swagger UI bootstrap
//
// Facade over the qbank-docs crates: the viewer configuration and its
// one-shot initializer, settings loading, and logging.

pub use qbank_docs_viewer::*;

pub use qbank_docs_log as log;

#[cfg(feature = "config")]
pub use qbank_docs_config as config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        BundleFactory, BundleOptions, CapabilityProvider, HandleSlot, InitState, Initializer,
        LoadNotifier, LoadSignal, OnPageLoad, PageLifecycle, ProviderKind, ViewerConfiguration,
        ViewerFactory, initialize, initialize_with, load_channel,
    };

    #[cfg(feature = "config")]
    pub use qbank_docs_config::{SettingsLoader, ViewerSettings};
}
