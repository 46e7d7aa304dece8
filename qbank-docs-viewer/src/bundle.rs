//! Swagger UI bundle integration.
//!
//! Renders the `swagger-initializer.js` script that boots Swagger UI on page
//! load, and the static page that loads the bundle and that script.

use crate::config::ViewerConfiguration;
use crate::error::Result;
use crate::factory::ViewerFactory;
use crate::provider::CapabilityProvider;
use qbank_docs_log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CDN_BASE: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist";

pub const DEFAULT_SWAGGER_UI_VERSION: &str = "5.10.0";

pub const DEFAULT_TITLE: &str = "QBank API";

/// File name the page loads the initializer from
pub const INITIALIZER_FILE: &str = "swagger-initializer.js";

pub const INDEX_FILE: &str = "index.html";

const STANDALONE_GLOBAL: &str = "SwaggerUIStandalonePreset";

/// Where the page loads Swagger UI assets from, and how it is titled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    pub cdn_base: String,
    pub version: String,
    pub title: String,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            version: DEFAULT_SWAGGER_UI_VERSION.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl BundleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cdn_base(mut self, cdn_base: impl Into<String>) -> Self {
        self.cdn_base = cdn_base.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// URL of a file inside the pinned `swagger-ui-dist` release
    pub fn asset_url(&self, file: &str) -> String {
        format!(
            "{}@{}/{}",
            self.cdn_base.trim_end_matches('/'),
            self.version,
            file
        )
    }
}

fn js_string(value: &str) -> String {
    // JSON string literals are valid JavaScript; `</` is split so the text
    // can also be inlined into a <script> element.
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

fn js_list(providers: &[CapabilityProvider]) -> String {
    if providers.is_empty() {
        return "[]".to_string();
    }
    let entries: Vec<String> = providers
        .iter()
        .map(|p| format!("      {}", p.expression))
        .collect();
    format!("[\n{}\n    ]", entries.join(",\n"))
}

fn html_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the script that builds the viewer once the page has loaded and
/// exposes it as `window.ui`.
///
/// # Examples
///
/// ```
/// use qbank_docs_viewer::{ViewerConfiguration, render_initializer_script};
///
/// let script = render_initializer_script(&ViewerConfiguration::qbank());
/// assert!(script.starts_with("window.onload = function() {"));
/// assert!(script.contains(r#"url: "qbank-api.yaml""#));
/// assert!(script.contains("SwaggerUIBundle.plugins.DownloadUrl"));
/// ```
pub fn render_initializer_script(configuration: &ViewerConfiguration) -> String {
    format!(
        r#"window.onload = function() {{
  window.ui = SwaggerUIBundle({{
    url: {url},
    dom_id: {dom_id},
    deepLinking: {deep_linking},
    presets: {presets},
    plugins: {plugins},
    layout: {layout}
  }});
}};
"#,
        url = js_string(&configuration.spec_url),
        dom_id = js_string(&configuration.dom_id),
        deep_linking = configuration.deep_linking,
        presets = js_list(&configuration.presets),
        plugins = js_list(&configuration.plugins),
        layout = js_string(&configuration.layout),
    )
}

/// Render the page hosting the viewer: the mount element, the bundle, and
/// the initializer script.
pub fn render_index_html(configuration: &ViewerConfiguration, options: &BundleOptions) -> String {
    let needs_standalone = configuration
        .presets
        .iter()
        .chain(configuration.plugins.iter())
        .any(|p| p.expression.starts_with(STANDALONE_GLOBAL));

    let standalone_script = if needs_standalone {
        format!(
            "\n    <script src=\"{}\" charset=\"UTF-8\"></script>",
            options.asset_url("swagger-ui-standalone-preset.js")
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" type="text/css" href="{css}">
    <style>
        body {{
            margin: 0;
            padding: 0;
        }}
    </style>
</head>
<body>
    <div id="{mount}"></div>
    <script src="{bundle}" charset="UTF-8"></script>{standalone}
    <script src="{initializer}" charset="UTF-8"></script>
</body>
</html>
"#,
        title = html_escape(&options.title),
        css = options.asset_url("swagger-ui.css"),
        mount = html_escape(configuration.mount_element_id()),
        bundle = options.asset_url("swagger-ui-bundle.js"),
        standalone = standalone_script,
        initializer = INITIALIZER_FILE,
    )
}

/// Rendered viewer: everything a static host needs to serve it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleHandle {
    pub spec_url: String,
    pub initializer_script: String,
    pub index_html: String,
}

impl BundleHandle {
    /// Write `swagger-initializer.js` and `index.html` into `dir`, creating it
    /// if needed. Returns the written paths.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let script_path = dir.join(INITIALIZER_FILE);
        fs::write(&script_path, &self.initializer_script)?;

        let index_path = dir.join(INDEX_FILE);
        fs::write(&index_path, &self.index_html)?;

        info!("Wrote viewer bundle to {}", dir.display());
        Ok(vec![script_path, index_path])
    }
}

/// Factory that renders the viewer into static files rather than a live page
#[derive(Debug, Clone, Default)]
pub struct BundleFactory {
    options: BundleOptions,
}

impl BundleFactory {
    pub fn new(options: BundleOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BundleOptions {
        &self.options
    }
}

impl ViewerFactory for BundleFactory {
    type Handle = BundleHandle;

    fn create(&self, configuration: ViewerConfiguration) -> BundleHandle {
        debug!(
            "Rendering Swagger UI {} bundle for {}",
            self.options.version, configuration.spec_url
        );
        BundleHandle {
            initializer_script: render_initializer_script(&configuration),
            index_html: render_index_html(&configuration, &self.options),
            spec_url: configuration.spec_url,
        }
    }
}
