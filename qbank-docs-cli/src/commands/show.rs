//! Print the resolved viewer configuration.

use super::SettingsSource;
use crate::error::CliResult;
use qbank_docs_viewer::render_initializer_script;

/// Print the configuration as Swagger UI options, or the initializer
/// script that would be written for it.
pub fn execute(source: &SettingsSource<'_>, script: bool) -> CliResult<()> {
    let configuration = source.load()?.into_configuration()?;

    if script {
        print!("{}", render_initializer_script(&configuration));
    } else {
        println!("{}", configuration.to_json()?);
    }

    Ok(())
}
