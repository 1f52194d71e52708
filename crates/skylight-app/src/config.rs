//! TOML configuration for the skylight binary.
//!
//! Loaded from an explicit `--config` path or from
//! `<config dir>/skylight/config.toml`. Partial files keep defaults for
//! everything they omit; a file that fails to parse degrades to defaults
//! with a warning.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skylight_webview::SettingValue;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    /// URL opened when none is given on the command line.
    pub homepage: String,
    /// Engine settings forwarded verbatim to the browser surface.
    pub settings: BTreeMap<String, SettingValue>,
    /// Directory the engine loads extensions from. Applied before the
    /// first navigation.
    pub extension_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Skylight".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            homepage: "about:blank".to_string(),
            settings: BTreeMap::new(),
            extension_dir: None,
        }
    }
}

/// Load the config, falling back to defaults when there is no file or the
/// file does not parse.
pub fn load(path_override: Option<&Path>) -> AppConfig {
    let path = match path_override {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) => path,
            None => return AppConfig::default(),
        },
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match load_from_path(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!("config load failed, using defaults: {e}");
            AppConfig::default()
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|_| ConfigError::FileNotFound(path.to_path_buf()))?;
    toml::from_str(&raw).map_err(|e| ConfigError::ParseError(e.to_string()))
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("skylight").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_valid_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
homepage = "https://example.test"

[window]
title = "Docs"
"#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.homepage, "https://example.test");
        assert_eq!(config.window.title, "Docs");
        // Defaults preserved
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 768);
        assert!(config.settings.is_empty());
    }

    #[test]
    fn load_invalid_toml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_nonexistent_returns_file_not_found() {
        let err = load_from_path(Path::new("/tmp/nonexistent_skylight_config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn settings_table_parses_mixed_value_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[settings]
enable-developer-extras = true
default-font-size = 16
zoom-level = 1.25
user-agent = "Skylight/0.1"
"#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(
            config.settings["enable-developer-extras"],
            SettingValue::Bool(true)
        );
        assert_eq!(config.settings["default-font-size"], SettingValue::Int(16));
        assert_eq!(config.settings["zoom-level"], SettingValue::Float(1.25));
        assert_eq!(
            config.settings["user-agent"],
            SettingValue::Text("Skylight/0.1".into())
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load(Some(Path::new("/tmp/no_such_skylight_config.toml")));
        assert_eq!(config.homepage, "about:blank");
        assert_eq!(config.window.title, "Skylight");
    }
}
