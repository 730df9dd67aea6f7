//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/axide/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::editable::indent::{IndentUnit, MAX_INDENT_WIDTH};

/// Overrides `backend_url` when set
pub const BACKEND_URL_ENV: &str = "AXIDE_BACKEND_URL";

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Base URL of the storage/execution service
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Spaces inserted per Tab press
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_indent_width() -> usize {
    IndentUnit::DEFAULT_WIDTH
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            indent_width: default_indent_width(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    ///
    /// A missing file is written out with the defaults so there is something
    /// to edit. The environment override is applied afterwards either way.
    pub fn load() -> Self {
        let config = match crate::config_paths::config_file() {
            Some(path) if !path.exists() => {
                let config = Self::default();
                if let Err(e) = config.save_to(&path) {
                    tracing::warn!("{}", e);
                }
                config
            }
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No config directory available, using defaults");
                Self::default()
            }
        };
        config.with_env_override(std::env::var(BACKEND_URL_ENV).ok())
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<EditorConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.normalized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to `path`
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Apply the backend URL override, ignoring blank values
    pub fn with_env_override(mut self, backend_url: Option<String>) -> Self {
        if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Backend URL overridden by {}: {}", BACKEND_URL_ENV, url);
            self.backend_url = url;
        }
        self
    }

    fn normalized(mut self) -> Self {
        self.indent_width = self.indent_width.clamp(1, MAX_INDENT_WIDTH);
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self
    }

    pub fn indent_unit(&self) -> IndentUnit {
        IndentUnit::spaces(self.indent_width)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: EditorConfig = serde_yaml::from_str("indent_width: 2\n").unwrap();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.backend_url, "http://127.0.0.1:5001");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_env_override() {
        let config = EditorConfig::default()
            .with_env_override(Some("http://10.0.0.2:5001".to_string()));
        assert_eq!(config.backend_url, "http://10.0.0.2:5001");

        let config = EditorConfig::default().with_env_override(Some("  ".to_string()));
        assert_eq!(config.backend_url, "http://127.0.0.1:5001");
    }

    #[test]
    fn test_indent_width_is_clamped() {
        let config = EditorConfig {
            indent_width: 0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.indent_width, 1);
        assert_eq!(config.indent_unit().width(), 1);
    }
}
