// Settings validation

use crate::{ConfigError, Result};

/// Settings that can check themselves after deserialization
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Field-level rules shared by settings types
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// An element id selector such as `#swagger-ui`
    pub fn is_id_selector(value: &str, field: &str) -> Result<()> {
        let id = value.strip_prefix('#').unwrap_or_default();
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "{} must look like '#element-id', got '{}'",
                field, value
            )));
        }
        Ok(())
    }

    pub fn at_least_one<T>(values: &[T], field: &str) -> Result<()> {
        if values.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} needs at least one entry",
                field
            )));
        }
        Ok(())
    }
}
