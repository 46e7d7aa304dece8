//! Capability providers (presets and plugins) handed to Swagger UI.
//!
//! The providers themselves live in the Swagger UI bundle; this module only
//! names them and records what each one is known to contribute, so that a
//! configuration can be checked and rendered without loading any JavaScript.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout contributed by the `apis` preset.
pub const BASE_LAYOUT: &str = "BaseLayout";

/// Layout contributed by the standalone preset.
pub const STANDALONE_LAYOUT: &str = "StandaloneLayout";

/// Whether a provider is listed under `presets` or `plugins`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Preset,
    Plugin,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Preset => f.write_str("preset"),
            ProviderKind::Plugin => f.write_str("plugin"),
        }
    }
}

/// Reference to a preset or plugin supplied by the Swagger UI bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityProvider {
    pub kind: ProviderKind,
    /// Short name used in configuration files
    pub name: String,
    /// JavaScript expression that evaluates to the provider in the page
    pub expression: String,
    /// Layout components this provider registers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layouts: Vec<String>,
    /// Whether it can parse and render an OpenAPI document
    #[serde(default)]
    pub renders_specification: bool,
}

impl CapabilityProvider {
    /// `SwaggerUIBundle.presets.apis`, the preset that renders OpenAPI documents.
    pub fn apis() -> Self {
        Self {
            kind: ProviderKind::Preset,
            name: "apis".to_string(),
            expression: "SwaggerUIBundle.presets.apis".to_string(),
            layouts: vec![BASE_LAYOUT.to_string()],
            renders_specification: true,
        }
    }

    /// `SwaggerUIStandalonePreset`, which adds the top bar and `StandaloneLayout`.
    pub fn standalone() -> Self {
        Self {
            kind: ProviderKind::Preset,
            name: "standalone".to_string(),
            expression: "SwaggerUIStandalonePreset".to_string(),
            layouts: vec![STANDALONE_LAYOUT.to_string()],
            renders_specification: false,
        }
    }

    /// `SwaggerUIBundle.plugins.DownloadUrl`, which fetches the document from `url`.
    pub fn download_url() -> Self {
        Self {
            kind: ProviderKind::Plugin,
            name: "download-url".to_string(),
            expression: "SwaggerUIBundle.plugins.DownloadUrl".to_string(),
            layouts: Vec::new(),
            renders_specification: false,
        }
    }

    /// A provider the bundle does not ship, referenced by an arbitrary expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use qbank_docs_viewer::{CapabilityProvider, ProviderKind};
    ///
    /// let topbar = CapabilityProvider::custom(ProviderKind::Plugin, "topbar", "window.TopbarPlugin")
    ///     .with_layout("TopbarLayout");
    ///
    /// assert!(topbar.provides_layout("TopbarLayout"));
    /// assert!(!topbar.renders_specification);
    /// ```
    pub fn custom(
        kind: ProviderKind,
        name: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            expression: expression.into(),
            layouts: Vec::new(),
            renders_specification: false,
        }
    }

    /// Declare a layout this provider registers
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layouts.push(layout.into());
        self
    }

    /// Mark the provider as able to render an OpenAPI document
    pub fn with_specification_support(mut self) -> Self {
        self.renders_specification = true;
        self
    }

    /// Resolve a built-in provider from its configuration name.
    ///
    /// Matching ignores case and treats `-`, `_` and camel case alike, so
    /// `download-url`, `download_url` and `DownloadUrl` are the same plugin.
    /// A name that exists under the other kind does not resolve.
    pub fn from_name(kind: ProviderKind, name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        let provider = match normalized.as_str() {
            "apis" => Self::apis(),
            "standalone" | "standalonepreset" | "swaggeruistandalonepreset" => Self::standalone(),
            "downloadurl" => Self::download_url(),
            _ => return None,
        };

        (provider.kind == kind).then_some(provider)
    }

    pub fn provides_layout(&self, layout: &str) -> bool {
        self.layouts.iter().any(|l| l == layout)
    }
}

impl fmt::Display for CapabilityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}
