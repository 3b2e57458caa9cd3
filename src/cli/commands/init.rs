use std::fs;
use std::path::Path;

use docs_audit::Result;
use docs_audit::config::app_config::{AppConfig, CONFIG_FILE};

use crate::cli::output;

/// Execute the `docs-audit init` command.
///
/// Creates the data directory and writes a default `config.toml`. An
/// existing config is left untouched.
pub fn execute(data_dir: &Path) -> Result<()> {
    output::header("docs-audit init");

    let config_path = data_dir.join(CONFIG_FILE);
    if config_path.exists() {
        output::warning(&format!("Already initialized: {}", config_path.display()));
        return Ok(());
    }

    fs::create_dir_all(data_dir)?;
    fs::write(&config_path, AppConfig::default_toml())?;

    output::success(&format!("Created {}", config_path.display()));
    Ok(())
}
