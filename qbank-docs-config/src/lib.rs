// Configuration for the QBank documentation viewer
//
// Settings are layered: built-in defaults, then an optional settings file
// (TOML, JSON or .env), then `QBANK_DOCS_*` environment variables.

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use env::{ENV_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat, parse_flag};
pub use settings::ViewerSettings;
pub use validation::{ConfigValidator, Validate};

use qbank_docs_log::debug;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Flat key/value store that settings sources are merged into
#[derive(Clone, Default)]
pub struct ConfigManager {
    values: Arc<RwLock<Map<String, Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            values: Arc::default(),
            env_prefix: Some(prefix.into()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Map<String, Value>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Map<String, Value>> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Overlay the prefixed process environment
    pub fn load_env(&self) -> Result<()> {
        let vars = EnvLoader::new(self.env_prefix.clone()).load()?;
        self.load_vars(vars);
        Ok(())
    }

    /// Overlay already collected variables as strings
    pub fn load_vars(&self, vars: impl IntoIterator<Item = (String, String)>) {
        let mut values = self.write();
        for (key, raw) in vars {
            debug!("Setting {} from environment", key);
            values.insert(key, Value::String(raw));
        }
    }

    /// Read a `.env` file into the process environment, then overlay it.
    ///
    /// Without a path a missing `.env` is not an error.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        self.load_env()
    }

    /// Overlay a settings file, detecting its format from the name
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = ConfigLoader::auto(path)?.load_file(path)?;
        debug!("Loaded settings file {}", path.display());
        self.merge_value(data);
        Ok(())
    }

    /// Overlay every top-level key of a JSON object
    pub fn merge_value(&self, data: Value) {
        if let Value::Object(map) = data {
            self.write().extend(map);
        }
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let value =
            serde_json::to_value(value).map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        self.write().insert(key.to_string(), value);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    /// A boolean, also accepting the textual forms environment values use
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.get::<Value>(key)? {
            Value::Bool(flag) => Ok(flag),
            Value::String(ref raw) => parse_flag(raw).ok_or_else(|| {
                ConfigError::DeserializationError(format!("'{}' is not a boolean", raw))
            }),
            other => Err(ConfigError::DeserializationError(format!(
                "{} is not a boolean",
                other
            ))),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Overlay every value held by `other`
    pub fn merge(&self, other: &ConfigManager) {
        if Arc::ptr_eq(&self.values, &other.values) {
            return;
        }
        let theirs = other.read().clone();
        self.write().extend(theirs);
    }

    /// Deserialize everything held into `T` and validate it
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let snapshot = Value::Object(self.read().clone());

        let settings: T = serde_json::from_value(snapshot)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
        settings.validate()?;

        Ok(settings)
    }
}

/// Assembles [`ViewerSettings`] from defaults, a file and the environment.
///
/// ```
/// use qbank_docs_config::SettingsLoader;
///
/// let settings = SettingsLoader::new().without_env().load().unwrap();
/// assert_eq!(settings.spec_url, "qbank-api.yaml");
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    dotenv: bool,
    env: bool,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self {
            file: None,
            dotenv: true,
            env: true,
        }
    }
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Skip both `.env` and the process environment
    pub fn without_env(mut self) -> Self {
        self.dotenv = false;
        self.env = false;
        self
    }

    pub fn load(&self) -> Result<ViewerSettings> {
        let manager = ConfigManager::with_prefix(ENV_PREFIX);
        manager.merge_value(
            serde_json::to_value(ViewerSettings::default())
                .map_err(|e| ConfigError::SerializationError(e.to_string()))?,
        );

        if let Some(ref file) = self.file {
            manager.load_file(file)?;
        }

        if self.dotenv {
            manager.load_dotenv(None)?;
        } else if self.env {
            manager.load_env()?;
        }

        manager.load_validated()
    }
}
