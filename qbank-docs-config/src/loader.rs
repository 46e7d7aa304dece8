// Settings file loaders

use crate::env::ENV_PREFIX;
use crate::{ConfigError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Supported settings file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }

    /// Detect the format of `path`; a bare `.env` file counts as `Env`.
    pub fn detect(path: &Path) -> Option<Self> {
        if path.file_name().and_then(|n| n.to_str()) == Some(".env") {
            return Some(FileFormat::Env);
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Read a boolean the way a person typing it would mean it.
///
/// Environment and `.env` values stay strings until a boolean field asks
/// for one; this is the conversion those fields use.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parses a settings file into a flat JSON object
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Pick the loader from the file name
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        FileFormat::detect(path).map(Self::new).ok_or_else(|| {
            ConfigError::LoadError(format!("Unsupported settings file: {}", path.display()))
        })
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<Value> {
        let value = match self.format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))?,
            FileFormat::Toml => self.parse_toml(content)?,
            FileFormat::Env => self.parse_env(content)?,
        };

        if !value.is_object() {
            return Err(ConfigError::ParseError(
                "settings file must contain a table of keys".to_string(),
            ));
        }
        Ok(value)
    }

    fn parse_toml(&self, content: &str) -> Result<Value> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        serde_json::to_value(table).map_err(|e| ConfigError::SerializationError(e.to_string()))
    }

    fn parse_env(&self, content: &str) -> Result<Value> {
        let prefix = format!("{}_", ENV_PREFIX);
        let mut map = Map::new();

        for item in dotenvy::from_read_iter(content.as_bytes()) {
            let (key, value) =
                item.map_err(|e| ConfigError::ParseError(format!("env parse error: {}", e)))?;
            let key = key.strip_prefix(prefix.as_str()).unwrap_or(&key).to_lowercase();
            map.insert(key, Value::String(value));
        }

        Ok(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let loader = ConfigLoader::new(FileFormat::Json);
        let value = loader
            .parse(r#"{"spec_url": "api.json", "deep_linking": false}"#)
            .unwrap();

        assert_eq!(value["spec_url"], "api.json");
        assert_eq!(value["deep_linking"], false);
    }

    #[test]
    fn test_parse_json_rejects_non_table() {
        let loader = ConfigLoader::new(FileFormat::Json);
        assert!(loader.parse(r#"["not", "a", "table"]"#).is_err());
    }

    #[test]
    fn test_parse_toml() {
        let loader = ConfigLoader::new(FileFormat::Toml);
        let value = loader
            .parse(
                r#"
                spec_url = "qbank-api.yaml"
                presets = ["apis", "standalone"]
            "#,
            )
            .unwrap();

        assert_eq!(value["spec_url"], "qbank-api.yaml");
        assert_eq!(value["presets"][1], "standalone");
    }

    #[test]
    fn test_parse_env() {
        let loader = ConfigLoader::new(FileFormat::Env);
        let value = loader
            .parse(
                "# viewer\nQBANK_DOCS_SPEC_URL=\"api.yaml\"\nDEEP_LINKING=false\nLAYOUT='BaseLayout'\n",
            )
            .unwrap();

        assert_eq!(value["spec_url"], "api.yaml");
        assert_eq!(value["deep_linking"], "false");
        assert_eq!(value["layout"], "BaseLayout");
    }

    #[test]
    fn test_parse_env_keeps_numbers_as_text() {
        let loader = ConfigLoader::new(FileFormat::Env);
        let value = loader
            .parse("QBANK_DOCS_TITLE=2024
QBANK_DOCS_SWAGGER_UI_VERSION=5
")
            .unwrap();

        assert_eq!(value["title"], "2024");
        assert_eq!(value["swagger_ui_version"], "5");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("qbank-api.yaml"), None);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("JSON"), Some(FileFormat::Json));
        assert_eq!(FileFormat::detect(Path::new("viewer.toml")), Some(FileFormat::Toml));
        assert_eq!(FileFormat::detect(Path::new("conf/.env")), Some(FileFormat::Env));
        assert_eq!(FileFormat::detect(Path::new("viewer.yaml")), None);
    }

    #[test]
    fn test_auto_rejects_unknown() {
        assert!(ConfigLoader::auto("viewer.ini").is_err());
        assert_eq!(ConfigLoader::auto("viewer.json").unwrap().format(), FileFormat::Json);
    }
}
