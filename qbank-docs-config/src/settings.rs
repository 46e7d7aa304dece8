//! Viewer settings as they appear in files and the environment

use crate::loader::parse_flag;
use crate::validation::{ConfigValidator, Validate};
use crate::{ConfigError, Result};
use qbank_docs_viewer::{
    BundleOptions, CapabilityProvider, DEFAULT_DOM_ID, DEFAULT_LAYOUT, DEFAULT_SPEC_URL,
    ProviderKind, ViewerConfiguration,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Serializable mirror of [`ViewerConfiguration`] with providers named by
/// string, plus the bundle options used when rendering the page.
///
/// Every field is optional in the source; missing ones take the QBank
/// defaults. Provider lists accept either an array or a comma-separated
/// string so they can be set from a single environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub spec_url: String,
    pub dom_id: String,
    #[serde(deserialize_with = "flag")]
    pub deep_linking: bool,
    #[serde(deserialize_with = "name_list")]
    pub presets: Vec<String>,
    #[serde(deserialize_with = "name_list")]
    pub plugins: Vec<String>,
    pub layout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger_ui_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            spec_url: DEFAULT_SPEC_URL.to_string(),
            dom_id: DEFAULT_DOM_ID.to_string(),
            deep_linking: true,
            presets: vec!["apis".to_string(), "standalone".to_string()],
            plugins: vec!["download-url".to_string()],
            layout: DEFAULT_LAYOUT.to_string(),
            cdn_base: None,
            swagger_ui_version: None,
            title: None,
        }
    }
}

fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(flag) => Ok(flag),
        Flag::Text(raw) => parse_flag(&raw)
            .ok_or_else(|| D::Error::custom(format!("expected a boolean, found '{}'", raw))),
    }
}

fn name_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Names {
        List(Vec<String>),
        Csv(String),
    }

    let names = match Names::deserialize(deserializer)? {
        Names::List(list) => list,
        Names::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };

    Ok(names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

fn resolve(kind: ProviderKind, names: &[String]) -> Result<Vec<CapabilityProvider>> {
    names
        .iter()
        .map(|name| {
            CapabilityProvider::from_name(kind, name)
                .ok_or_else(|| ConfigError::ValidationError(format!("unknown {}: '{}'", kind, name)))
        })
        .collect()
}

impl ViewerSettings {
    /// Resolve provider names and build the configuration handed to the
    /// factory.
    pub fn into_configuration(self) -> Result<ViewerConfiguration> {
        let presets = resolve(ProviderKind::Preset, &self.presets)?;
        let plugins = resolve(ProviderKind::Plugin, &self.plugins)?;

        Ok(ViewerConfiguration::new(self.spec_url)
            .with_dom_id(self.dom_id)
            .with_deep_linking(self.deep_linking)
            .with_presets(presets)
            .with_plugins(plugins)
            .with_layout(self.layout))
    }

    /// Bundle options with any overrides from these settings applied
    pub fn bundle_options(&self) -> BundleOptions {
        let mut options = BundleOptions::default();
        if let Some(ref cdn_base) = self.cdn_base {
            options = options.with_cdn_base(cdn_base.clone());
        }
        if let Some(ref version) = self.swagger_ui_version {
            options = options.with_version(version.clone());
        }
        if let Some(ref title) = self.title {
            options = options.with_title(title.clone());
        }
        options
    }
}

impl Validate for ViewerSettings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::not_empty(&self.spec_url, "spec_url")?;
        ConfigValidator::is_id_selector(&self.dom_id, "dom_id")?;
        ConfigValidator::at_least_one(&self.presets, "presets")?;
        ConfigValidator::not_empty(&self.layout, "layout")?;
        resolve(ProviderKind::Preset, &self.presets)?;
        resolve(ProviderKind::Plugin, &self.plugins)?;
        Ok(())
    }
}
