//! Render the Swagger UI page and initializer script to a directory.

use super::SettingsSource;
use crate::error::{CliError, CliResult};
use colored::Colorize;
use qbank_docs_config::ViewerSettings;
use qbank_docs_log::info;
use qbank_docs_viewer::{BundleFactory, Initializer, PageLifecycle, load_channel};
use std::path::Path;
use std::sync::Arc;

/// Command-line overrides for the bundle options
#[derive(Debug, Clone, Default)]
pub struct BundleOverrides {
    pub cdn_base: Option<String>,
    pub swagger_ui_version: Option<String>,
    pub title: Option<String>,
}

impl BundleOverrides {
    fn apply_to(&self, settings: &mut ViewerSettings) {
        if self.cdn_base.is_some() {
            settings.cdn_base = self.cdn_base.clone();
        }
        if self.swagger_ui_version.is_some() {
            settings.swagger_ui_version = self.swagger_ui_version.clone();
        }
        if self.title.is_some() {
            settings.title = self.title.clone();
        }
    }
}

/// Drive the initializer through one simulated page load and write what
/// the bundle factory produced. `quiet` drops the per-file status lines.
pub async fn run(
    source: &SettingsSource<'_>,
    overrides: &BundleOverrides,
    out_dir: &Path,
    quiet: bool,
) -> CliResult<()> {
    let mut settings = source.load()?;
    overrides.apply_to(&mut settings);
    let options = settings.bundle_options();
    let configuration = settings.into_configuration()?;

    let initializer = Arc::new(Initializer::with_configuration(
        BundleFactory::new(options),
        configuration,
    ));
    let lifecycle = PageLifecycle::new();
    lifecycle.register("swagger-ui", initializer.clone()).await;

    let (notifier, signal) = load_channel();
    notifier.notify_loaded();
    lifecycle.dispatch_when_loaded(signal).await.map_err(|errors| {
        let messages: Vec<String> = errors
            .iter()
            .map(|(name, e)| format!("{}: {}", name, e))
            .collect();
        CliError::Command(messages.join("; "))
    })?;

    let bundle = initializer
        .handle()
        .ok_or_else(|| CliError::Command("viewer was never initialized".to_string()))?;

    info!("Rendering viewer for {}", bundle.spec_url);
    let written = bundle.write_to(out_dir)?;
    if !quiet {
        for path in written {
            println!("  {} {}", "✓".green().bold(), path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbank_docs_viewer::{INDEX_FILE, INITIALIZER_FILE};

    #[test]
    fn test_overrides_apply_only_set_fields() {
        let overrides = BundleOverrides {
            title: Some("Docs".to_string()),
            ..BundleOverrides::default()
        };
        let mut settings = ViewerSettings {
            swagger_ui_version: Some("5.17.14".to_string()),
            ..ViewerSettings::default()
        };
        overrides.apply_to(&mut settings);

        assert_eq!(settings.title.as_deref(), Some("Docs"));
        assert_eq!(settings.swagger_ui_version.as_deref(), Some("5.17.14"));
        assert!(settings.cdn_base.is_none());
    }

    #[tokio::test]
    async fn test_run_writes_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let source = SettingsSource {
            file: None,
            ignore_env: true,
        };

        run(&source, &BundleOverrides::default(), dir.path(), true).await.unwrap();

        let script = std::fs::read_to_string(dir.path().join(INITIALIZER_FILE)).unwrap();
        assert!(script.contains(r#"url: "qbank-api.yaml""#));
        assert!(dir.path().join(INDEX_FILE).exists());
    }
}
