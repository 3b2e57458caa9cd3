use serde::Deserialize;
use std::path::Path;

use crate::core::errors::{AuditError, Result};
use crate::core::models::paging::DEFAULT_PAGE_SIZE;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration read from `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub audit: AuditSection,
}

impl AppConfig {
    /// Load the configuration, falling back to defaults when the file
    /// does not exist.
    ///
    /// File names are validated so a config file cannot point the store
    /// outside of its data directory.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content).map_err(|e| AuditError::InvalidConfig {
            detail: format!("Failed to parse {CONFIG_FILE}: {e}"),
        })?;

        validate_simple_filename(&config.audit.log_file, "audit log file")?;
        validate_simple_filename(&config.audit.entities_file, "entities file")?;
        if config.audit.page_size == 0 {
            return Err(AuditError::InvalidConfig {
                detail: "page_size must be greater than 0".into(),
            });
        }

        Ok(config)
    }

    /// Contents written by `docs-audit init`.
    pub fn default_toml() -> String {
        let audit = AuditSection::default();
        format!(
            "[audit]\nlog_file = \"{}\"\nentities_file = \"{}\"\npage_size = {}\n",
            audit.log_file, audit.entities_file, audit.page_size
        )
    }
}

/// The `[audit]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditSection {
    pub log_file: String,
    pub entities_file: String,
    pub page_size: usize,
}

impl Default for AuditSection {
    fn default() -> Self {
        Self {
            log_file: "audit.log".into(),
            entities_file: "entities.json".into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Reject anything that is not a plain file name.
pub fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if invalid {
        return Err(AuditError::InvalidConfig {
            detail: format!("Invalid {what} name: '{name}'. Use a plain file name."),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig::load(tmp.path()).unwrap();
        assert_eq!(config.audit.log_file, "audit.log");
        assert_eq!(config.audit.entities_file, "entities.json");
        assert_eq!(config.audit.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn default_toml_round_trips() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), AppConfig::default_toml()).unwrap();
        let config = AppConfig::load(tmp.path()).unwrap();
        assert_eq!(config.audit.log_file, "audit.log");
    }

    #[test]
    fn partial_section_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "[audit]\npage_size = 25\n").unwrap();
        let config = AppConfig::load(tmp.path()).unwrap();
        assert_eq!(config.audit.page_size, 25);
        assert_eq!(config.audit.log_file, "audit.log");
    }

    #[test]
    fn rejects_path_traversal() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            "[audit]\nlog_file = \"../outside.log\"\n",
        )
        .unwrap();
        let err = AppConfig::load(tmp.path()).unwrap_err();
        assert!(matches!(err, AuditError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_zero_page_size() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "[audit]\npage_size = 0\n").unwrap();
        assert!(AppConfig::load(tmp.path()).is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "[audit\n").unwrap();
        let err = AppConfig::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
