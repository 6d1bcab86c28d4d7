//! Configuration management for Breathe

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::content::{ContentProvider, DirectoryProvider, HttpProvider};

/// Where the quiz and tip pools come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentSource {
    /// Directory holding `quizzes.json` and `tips.json`
    Directory { path: PathBuf },
    /// Coaching backend exposing `/quizzes` and `/tips`
    Api { base_url: String },
}

impl ContentSource {
    /// Build the provider for this source
    pub fn provider(&self) -> Result<Box<dyn ContentProvider>> {
        Ok(match self {
            ContentSource::Directory { path } => Box::new(DirectoryProvider::new(path)),
            ContentSource::Api { base_url } => Box::new(
                HttpProvider::new(base_url)
                    .with_context(|| format!("Failed to create client for {base_url}"))?,
            ),
        })
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Content pool source
    pub content: ContentSource,

    /// Print engine notices (fresh round, missing content) in the session
    #[serde(default = "default_show_notices")]
    pub show_notices: bool,
}

fn default_show_notices() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content: ContentSource::Directory { path: PathBuf::from("content") },
            show_notices: true,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "breathe").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "breathe").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the stats store directory path
    pub fn store_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("store"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_reads_local_content() {
        let config = Config::default();
        assert_eq!(config.content, ContentSource::Directory { path: PathBuf::from("content") });
        assert!(config.show_notices);
    }

    #[test]
    fn config_serializes_tagged_source() {
        let config = Config {
            content: ContentSource::Api { base_url: "https://coach.example.com".into() },
            show_notices: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""kind":"api""#));
    }

    #[test]
    fn config_deserializes_from_json() {
        let json = r#"{"content":{"kind":"directory","path":"/srv/content"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.content, ContentSource::Directory { path: PathBuf::from("/srv/content") });
        assert!(config.show_notices);
    }

    #[test]
    fn api_source_builds_provider() {
        let source = ContentSource::Api { base_url: "http://localhost:8080".into() };
        assert!(source.provider().is_ok());
    }
}
