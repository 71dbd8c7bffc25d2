//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Command-line flags override
//! whatever the file sets.
//!
//! ```yaml
//! validate_formats: true
//! report_dir: reports/
//! format: json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use csvschema::ValidationSettings;

use crate::output::ReportFormat;

/// Settings loaded from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Assert the `format` keyword. Defaults to the library default.
    pub validate_formats: Option<bool>,
    /// Directory that receives timestamped report files.
    pub report_dir: Option<PathBuf>,
    /// Report rendering.
    pub format: Option<ReportFormat>,
}

impl CliConfig {
    /// Library settings this config selects.
    pub fn settings(&self) -> ValidationSettings {
        let mut settings = ValidationSettings::default();
        if let Some(validate_formats) = self.validate_formats {
            settings.validate_formats = validate_formats;
        }
        settings
    }

    /// Load a config file, or defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_gives_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert!(config.settings().validate_formats);
        assert!(config.report_dir.is_none());
        assert!(config.format.is_none());
    }

    #[test]
    fn test_loads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("csvschema.yaml");
        std::fs::write(
            &path,
            "validate_formats: false\nreport_dir: out\nformat: json\n",
        )
        .unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();
        assert!(!config.settings().validate_formats);
        assert_eq!(config.report_dir, Some(PathBuf::from("out")));
        assert_eq!(config.format, Some(ReportFormat::Json));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/csvschema.yaml"))).unwrap_err();
        assert!(err.to_string().contains("cannot read config file"));
    }
}
