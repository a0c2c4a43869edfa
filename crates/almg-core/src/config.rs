use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tracker: TrackerConfig,
    pub plot: PlotConfig,
}

impl AppConfig {
    /// Load configuration from default path (~/.config/almg-tracker/config.toml),
    /// falling back to defaults if the file doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("almg-tracker")
            .join("config.toml")
    }

    /// Data directory for REPL history.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("almg-tracker")
    }
}

/// Interactive tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Model name recorded on new sessions. When unset the REPL asks for one.
    pub default_model: Option<String>,
    /// Directory that `export` writes into (default: current directory).
    pub export_dir: Option<PathBuf>,
    /// Color zone names with ANSI escapes.
    pub color: bool,
    /// Keep REPL line history between runs.
    pub history_file: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_model: None,
            export_dir: None,
            color: true,
            history_file: true,
        }
    }
}

impl TrackerConfig {
    /// Directory exports are written to.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// ASCII trajectory plot dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Columns spanning X = 0..1.
    pub width: usize,
    /// Rows spanning Z = 1..0.
    pub height: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[tracker]"));
        assert!(toml_str.contains("width = 40"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = AppConfig::default();
        config.tracker.default_model = Some("gpt-4".into());
        config.plot.height = 12;
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.tracker.default_model.as_deref(), Some("gpt-4"));
        assert_eq!(parsed.plot.height, 12);
        assert_eq!(parsed.plot.width, 40);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[tracker]\ncolor = false\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(!config.tracker.color);
        assert!(config.tracker.history_file);
        assert_eq!(config.plot.width, 40);
        assert_eq!(config.tracker.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[plot]\nwidth = \"wide\"\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
