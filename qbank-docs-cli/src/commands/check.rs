//! Check a viewer configuration before it reaches a browser.
//!
//! Swagger UI is the final judge; this catches the mistakes that would
//! otherwise only show up as an error panel in the page.

use super::SettingsSource;
use crate::error::{CliError, CliResult};
use colored::Colorize;
use qbank_docs_viewer::ViewerConfiguration;

/// With `quiet` only the exit status and the error report remain.
pub fn execute(source: &SettingsSource<'_>, quiet: bool) -> CliResult<()> {
    let configuration = source.load()?.into_configuration()?;
    if !quiet {
        print_summary(&configuration);
    }

    match configuration.validate() {
        Ok(()) => {
            if !quiet {
                println!("{} configuration looks usable", "✓".green().bold());
            }
            Ok(())
        }
        Err(e) => {
            if !quiet {
                println!("{} {}", "✗".red().bold(), e);
            }
            Err(CliError::Validation(e.to_string()))
        }
    }
}

fn print_summary(configuration: &ViewerConfiguration) {
    let names = |providers: &[qbank_docs_viewer::CapabilityProvider]| {
        providers
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!("  {:<13} {}", "document", configuration.spec_url.cyan());
    println!("  {:<13} {}", "mount point", configuration.dom_id.cyan());
    println!("  {:<13} {}", "deep linking", configuration.deep_linking);
    println!("  {:<13} {}", "presets", names(&configuration.presets));
    println!("  {:<13} {}", "plugins", names(&configuration.plugins));
    println!("  {:<13} {}", "layout", configuration.layout);
}
