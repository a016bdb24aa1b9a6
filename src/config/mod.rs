//! Configuration module for peekr
//!
//! Holds the settings the preview engine reads at startup: the API base used
//! for install manifests, the video autoplay flag, and the iframe viewers.
//! Configuration is stored in the user's config directory.

use std::fs;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::preview::{ConfiguredIframeTemplates, IframePreviewEntry};

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PeekrConfig {
    /// Base URL of the API that serves `.plist` install manifests
    #[serde(default)]
    pub api_base: String,

    /// Start video playback as soon as the player is mounted
    #[serde(default)]
    pub video_autoplay: bool,

    /// Third-party viewers offered through iframes, in display order
    #[serde(default)]
    pub iframe_previews: Vec<IframePreviewEntry>,
}

impl PeekrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("peekr").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config path cannot be determined or writing fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Read a scalar setting by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_base" => Some(self.api_base.clone()),
            "video_autoplay" => Some(self.video_autoplay.to_string()),
            _ => None,
        }
    }

    /// Update a scalar setting from its string form
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a value of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "api_base" => self.api_base = value.trim_end_matches('/').to_string(),
            "video_autoplay" => {
                self.video_autoplay = value
                    .parse()
                    .map_err(|_| ConfigError::Message(format!("Invalid boolean for video_autoplay: '{value}'")))?;
            }
            _ => return Err(ConfigError::NotFound(key.to_string())),
        }
        Ok(())
    }

    /// Iframe template source built from `iframe_previews`
    #[must_use]
    pub fn iframe_templates(&self) -> ConfiguredIframeTemplates {
        ConfiguredIframeTemplates::new(self.iframe_previews.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::IframeTemplateSource;

    const SAMPLE: &str = r#"
api_base = "https://files.example"
video_autoplay = true

[[iframe_previews]]
extensions = ["doc", "docx"]
name = "Microsoft"
url = "https://view.officeapps.live.com/op/view.aspx?src=$url"

[[iframe_previews]]
extensions = ["pdf"]
name = "Google"
url = "https://docs.google.com/gview?url=$url&embedded=true"
"#;

    #[test]
    fn test_default_config() {
        let config = PeekrConfig::default();
        assert!(config.api_base.is_empty());
        assert!(!config.video_autoplay);
        assert!(config.iframe_previews.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, SAMPLE).unwrap();

        let config = PeekrConfig::load_from(&path).unwrap();
        assert_eq!(config.api_base, "https://files.example");
        assert!(config.video_autoplay);
        assert_eq!(config.iframe_previews.len(), 2);
        assert_eq!(config.iframe_previews[0].extensions, ["doc", "docx"]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "video_autoplay = true\n").unwrap();

        let config = PeekrConfig::load_from(&path).unwrap();
        assert!(config.video_autoplay);
        assert!(config.iframe_previews.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = PeekrConfig::default();
        config.set("api_base", "https://api.example/").unwrap();
        config.iframe_previews.push(IframePreviewEntry {
            extensions: vec!["pdf".into()],
            name: "Viewer".into(),
            url: "https://v/?u=$url".into(),
        });

        config.save_to(&path).unwrap();
        assert_eq!(PeekrConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_get_and_set() {
        let mut config = PeekrConfig::default();
        config.set("video_autoplay", "true").unwrap();
        assert_eq!(config.get("video_autoplay").as_deref(), Some("true"));
        config.set("api_base", "https://api.example/").unwrap();
        assert_eq!(config.get("api_base").as_deref(), Some("https://api.example"));
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = PeekrConfig::default();
        assert!(config.set("video_autoplay", "maybe").is_err());
        assert!(matches!(config.set("unknown", "x"), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_iframe_templates_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, SAMPLE).unwrap();

        let source = PeekrConfig::load_from(&path).unwrap().iframe_templates();
        let keys: Vec<_> = source.templates_for("paper.pdf").into_iter().map(|t| t.key).collect();
        assert_eq!(keys, ["Google"]);
    }
}
