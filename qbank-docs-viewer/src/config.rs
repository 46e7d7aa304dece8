//! Viewer configuration handed to the Swagger UI factory

use crate::error::{Result, ViewerError};
use crate::provider::{CapabilityProvider, STANDALONE_LAYOUT};
use serde::Serialize;

/// Document the QBank viewer renders, relative to the hosting page.
pub const DEFAULT_SPEC_URL: &str = "qbank-api.yaml";

/// Selector of the element the viewer mounts into.
pub const DEFAULT_DOM_ID: &str = "#swagger-ui";

pub const DEFAULT_LAYOUT: &str = STANDALONE_LAYOUT;

/// Options passed to `SwaggerUIBundle(...)`.
///
/// Built once, moved into the factory, never reused afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfiguration {
    /// Specification document, resolved relative to the hosting page
    pub spec_url: String,
    /// Mount point selector (`#` followed by the element id)
    pub dom_id: String,
    pub deep_linking: bool,
    /// Presets in precedence order
    pub presets: Vec<CapabilityProvider>,
    /// Plugins in activation order
    pub plugins: Vec<CapabilityProvider>,
    /// Layout component name, registered by one of the providers
    pub layout: String,
}

impl Default for ViewerConfiguration {
    fn default() -> Self {
        Self::qbank()
    }
}

impl ViewerConfiguration {
    /// The QBank documentation viewer: `qbank-api.yaml` mounted at
    /// `#swagger-ui` with deep linking, the `apis` and standalone presets,
    /// the download-url plugin and `StandaloneLayout`.
    pub fn qbank() -> Self {
        Self {
            spec_url: DEFAULT_SPEC_URL.to_string(),
            dom_id: DEFAULT_DOM_ID.to_string(),
            deep_linking: true,
            presets: vec![CapabilityProvider::apis(), CapabilityProvider::standalone()],
            plugins: vec![CapabilityProvider::download_url()],
            layout: DEFAULT_LAYOUT.to_string(),
        }
    }

    /// Start from the QBank defaults with a different document
    pub fn new(spec_url: impl Into<String>) -> Self {
        Self {
            spec_url: spec_url.into(),
            ..Self::qbank()
        }
    }

    pub fn with_dom_id(mut self, dom_id: impl Into<String>) -> Self {
        self.dom_id = dom_id.into();
        self
    }

    pub fn with_deep_linking(mut self, enabled: bool) -> Self {
        self.deep_linking = enabled;
        self
    }

    /// Replace the preset list
    pub fn with_presets(mut self, presets: Vec<CapabilityProvider>) -> Self {
        self.presets = presets;
        self
    }

    /// Append a preset after the existing ones
    pub fn with_preset(mut self, preset: CapabilityProvider) -> Self {
        self.presets.push(preset);
        self
    }

    /// Replace the plugin list
    pub fn with_plugins(mut self, plugins: Vec<CapabilityProvider>) -> Self {
        self.plugins = plugins;
        self
    }

    /// Append a plugin after the existing ones
    pub fn with_plugin(mut self, plugin: CapabilityProvider) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Element id the mount selector refers to (`swagger-ui` for `#swagger-ui`)
    pub fn mount_element_id(&self) -> &str {
        self.dom_id.strip_prefix('#').unwrap_or(&self.dom_id)
    }

    /// Check the invariants Swagger UI would otherwise only report in the page.
    ///
    /// Nothing on the initialization path calls this; Swagger UI remains the
    /// authority on whether a configuration works.
    pub fn validate(&self) -> Result<()> {
        if self.spec_url.trim().is_empty() {
            return Err(ViewerError::Validation(
                "specification url cannot be empty".to_string(),
            ));
        }

        if !self.dom_id.starts_with('#') || self.mount_element_id().is_empty() {
            return Err(ViewerError::Validation(format!(
                "mount point '{}' must be an id selector such as '#swagger-ui'",
                self.dom_id
            )));
        }

        if !self.presets.iter().any(|p| p.renders_specification) {
            return Err(ViewerError::Validation(
                "no preset can render the specification document".to_string(),
            ));
        }

        let layout_known = self
            .presets
            .iter()
            .chain(self.plugins.iter())
            .any(|p| p.provides_layout(&self.layout));
        if !layout_known {
            return Err(ViewerError::Validation(format!(
                "layout '{}' is not provided by any active preset or plugin",
                self.layout
            )));
        }

        Ok(())
    }

    /// Options as Swagger UI names them, with providers listed by name
    pub fn to_json(&self) -> Result<String> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct SwaggerOptions<'a> {
            url: &'a str,
            #[serde(rename = "dom_id")]
            dom_id: &'a str,
            deep_linking: bool,
            presets: Vec<&'a str>,
            plugins: Vec<&'a str>,
            layout: &'a str,
        }

        let options = SwaggerOptions {
            url: &self.spec_url,
            dom_id: &self.dom_id,
            deep_linking: self.deep_linking,
            presets: self.presets.iter().map(|p| p.name.as_str()).collect(),
            plugins: self.plugins.iter().map(|p| p.name.as_str()).collect(),
            layout: &self.layout,
        };

        Ok(serde_json::to_string_pretty(&options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{BASE_LAYOUT, ProviderKind};

    #[test]
    fn test_qbank_literals() {
        let config = ViewerConfiguration::default();

        assert_eq!(config.spec_url, "qbank-api.yaml");
        assert_eq!(config.dom_id, "#swagger-ui");
        assert!(config.deep_linking);
        assert_eq!(config.layout, "StandaloneLayout");
        assert_eq!(
            config.presets,
            vec![CapabilityProvider::apis(), CapabilityProvider::standalone()]
        );
        assert_eq!(config.plugins, vec![CapabilityProvider::download_url()]);
    }

    #[test]
    fn test_builder() {
        let config = ViewerConfiguration::new("openapi.json")
            .with_dom_id("#docs")
            .with_deep_linking(false)
            .with_presets(vec![CapabilityProvider::apis()])
            .with_plugins(Vec::new())
            .with_layout(BASE_LAYOUT);

        assert_eq!(config.spec_url, "openapi.json");
        assert_eq!(config.mount_element_id(), "docs");
        assert!(!config.deep_linking);
        assert_eq!(config.presets.len(), 1);
        assert!(config.plugins.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(ViewerConfiguration::qbank().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let err = ViewerConfiguration::new("  ").validate().unwrap_err();
        assert!(err.to_string().contains("specification url"));
    }

    #[test]
    fn test_validate_rejects_bad_mount_point() {
        assert!(ViewerConfiguration::qbank().with_dom_id("swagger-ui").validate().is_err());
        assert!(ViewerConfiguration::qbank().with_dom_id("#").validate().is_err());
    }

    #[test]
    fn test_validate_requires_rendering_preset() {
        let config = ViewerConfiguration::qbank().with_presets(vec![CapabilityProvider::standalone()]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("render"));
    }

    #[test]
    fn test_validate_requires_known_layout() {
        let config = ViewerConfiguration::qbank().with_layout("MissingLayout");
        assert!(config.validate().is_err());

        let config = config.with_plugin(
            CapabilityProvider::custom(ProviderKind::Plugin, "extra", "window.Extra")
                .with_layout("MissingLayout"),
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_json_uses_swagger_keys() {
        let json = ViewerConfiguration::qbank().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["url"], "qbank-api.yaml");
        assert_eq!(value["dom_id"], "#swagger-ui");
        assert_eq!(value["deepLinking"], true);
        assert_eq!(value["layout"], "StandaloneLayout");
        assert_eq!(value["presets"], serde_json::json!(["apis", "standalone"]));
        assert_eq!(value["plugins"], serde_json::json!(["download-url"]));
    }
}
