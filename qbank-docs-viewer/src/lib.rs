//! Swagger UI bootstrap for the QBank API documentation.
//!
//! The viewer itself is Swagger UI; this crate owns the part around it:
//! the configuration handed to `SwaggerUIBundle`, the one-shot initializer
//! that runs when the page has loaded, and the write-once slot holding the
//! resulting viewer handle.
//!
//! ## Features
//!
//! - **Typed configuration** - `ViewerConfiguration` with the QBank defaults
//! - **Capability providers** - presets and plugins referenced by name
//! - **One-shot initializer** - the factory runs at most once per page
//! - **Load lifecycle** - awaitable load signal and ordered load hooks
//! - **Bundle rendering** - `swagger-initializer.js` and `index.html`
//!
//! ## Quick Start
//!
//! ```
//! use qbank_docs_viewer::{InitState, Initializer, ViewerConfiguration};
//!
//! let initializer = Initializer::new(|config: ViewerConfiguration| config.dom_id);
//! assert_eq!(initializer.state(), InitState::Pending);
//!
//! // Delivered by the host when the page has finished loading
//! initializer.on_load();
//! initializer.on_load();
//!
//! assert_eq!(initializer.state(), InitState::Initialized);
//! assert_eq!(initializer.handle().map(String::as_str), Some("#swagger-ui"));
//! ```
//!
//! ## Rendering the Bundle
//!
//! ```
//! use qbank_docs_viewer::{BundleFactory, BundleOptions, initialize};
//!
//! let slot = initialize(BundleFactory::new(BundleOptions::default().with_title("QBank")));
//! let bundle = slot.get().unwrap();
//!
//! assert!(bundle.initializer_script.contains("window.ui = SwaggerUIBundle"));
//! assert!(bundle.index_html.contains(r#"<div id="swagger-ui"></div>"#));
//! ```

pub mod bundle;
pub mod config;
pub mod error;
pub mod factory;
pub mod initializer;
pub mod lifecycle;
pub mod provider;
pub mod slot;

pub use bundle::{
    BundleFactory, BundleHandle, BundleOptions, INDEX_FILE, INITIALIZER_FILE, render_index_html,
    render_initializer_script,
};
pub use config::{DEFAULT_DOM_ID, DEFAULT_LAYOUT, DEFAULT_SPEC_URL, ViewerConfiguration};
pub use error::{Result, ViewerError};
pub use factory::ViewerFactory;
pub use initializer::{InitState, Initializer, initialize, initialize_with};
pub use lifecycle::{LoadNotifier, LoadSignal, OnPageLoad, PageLifecycle, load_channel};
pub use provider::{CapabilityProvider, ProviderKind};
pub use slot::HandleSlot;
