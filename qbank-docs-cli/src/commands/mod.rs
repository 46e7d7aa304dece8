//! Subcommand implementations.

pub mod check;
pub mod render;
pub mod show;

use crate::error::CliResult;
use qbank_docs_config::{SettingsLoader, ViewerSettings};
use std::path::Path;

/// Options shared by every subcommand that reads settings
#[derive(Debug, Clone, Default)]
pub struct SettingsSource<'a> {
    pub file: Option<&'a Path>,
    pub ignore_env: bool,
}

impl SettingsSource<'_> {
    pub fn load(&self) -> CliResult<ViewerSettings> {
        let mut loader = SettingsLoader::new();
        if let Some(file) = self.file {
            loader = loader.file(file);
        }
        if self.ignore_env {
            loader = loader.without_env();
        }
        Ok(loader.load()?)
    }
}
