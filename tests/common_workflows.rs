//! Integration tests for common qbank-docs workflows.
//!
//! These walk the path a hosting page takes: settings in, one load event,
//! a viewer handle out.

use qbank_docs::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// =============================================================================
// Initializer
// =============================================================================

#[test]
fn test_qbank_viewer_is_built_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(None));

    let factory = {
        let calls = calls.clone();
        let seen = seen.clone();
        move |config: ViewerConfiguration| {
            calls.fetch_add(1, Ordering::SeqCst);
            *seen.lock().unwrap() = Some(config.clone());
            format!("viewer@{}", config.dom_id)
        }
    };

    let initializer = Initializer::new(factory);
    let slot = initializer.slot();

    for _ in 0..3 {
        initializer.on_load();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(slot.get().map(String::as_str), Some("viewer@#swagger-ui"));

    let config = seen.lock().unwrap().clone().unwrap();
    assert_eq!(config.spec_url, "qbank-api.yaml");
    assert_eq!(
        config.presets,
        vec![CapabilityProvider::apis(), CapabilityProvider::standalone()]
    );
    assert_eq!(config.plugins, vec![CapabilityProvider::download_url()]);
}

#[tokio::test]
async fn test_host_driven_initialization() {
    let initializer = Arc::new(Initializer::new(BundleFactory::default()));
    let lifecycle = PageLifecycle::new();
    lifecycle.register("swagger-ui", initializer.clone()).await;

    let (notifier, signal) = load_channel();
    assert_eq!(initializer.state(), InitState::Pending);

    notifier.notify_loaded();
    notifier.notify_loaded();
    assert!(lifecycle.dispatch_when_loaded(signal).await.unwrap());
    lifecycle.dispatch_load().await.unwrap();

    assert_eq!(initializer.state(), InitState::Initialized);
    let bundle = initializer.handle().unwrap();
    assert!(bundle.initializer_script.contains("layout: \"StandaloneLayout\""));
}

// =============================================================================
// Settings
// =============================================================================

#[cfg(feature = "config")]
#[test]
fn test_settings_file_to_rendered_site() {
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("viewer.toml");
    std::fs::write(
        &settings_path,
        "spec_url = \"qbank-api.v2.yaml\"\ntitle = \"QBank v2\"\n",
    )
    .unwrap();

    let settings = SettingsLoader::new()
        .file(&settings_path)
        .without_env()
        .load()
        .unwrap();
    let factory = BundleFactory::new(settings.bundle_options());
    let slot = initialize_with(factory, settings.into_configuration().unwrap());

    let site = dir.path().join("site");
    slot.get().unwrap().write_to(&site).unwrap();

    let script = std::fs::read_to_string(site.join(qbank_docs::INITIALIZER_FILE)).unwrap();
    let html = std::fs::read_to_string(site.join(qbank_docs::INDEX_FILE)).unwrap();
    assert!(script.contains("url: \"qbank-api.v2.yaml\""));
    assert!(html.contains("<title>QBank v2</title>"));
}

#[test]
fn test_configuration_validation_is_advisory() {
    let config = ViewerConfiguration::qbank().with_presets(Vec::new());
    assert!(config.validate().is_err());

    // The initializer still hands it to the factory unchanged
    let slot = initialize_with(|config: ViewerConfiguration| config.presets.len(), config);
    assert_eq!(slot.get(), Some(&0));
}
