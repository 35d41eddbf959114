use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/admin-panel/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub theme: ThemeConfig,
    pub panel: PanelConfig,
}

/// Connection to the records service
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ServerConfig {
    /// Base URL of the admin API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Theme configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ThemeConfig {
    /// "dark" or "light"
    pub mode: String,
}

/// Panel layout configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PanelConfig {
    /// Width of the hierarchy tree pane (in pixels)
    pub tree_width: f32,
    /// Height of the action-log pane (in pixels)
    pub logs_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            theme: ThemeConfig {
                mode: "dark".to_string(),
            },
            panel: PanelConfig {
                tree_width: 260.0,
                logs_height: 220.0,
            },
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "dekanat") {
            let config_dir = proj_dirs.config_dir();
            return Some(config_dir.join("config.toml"));
        }
        None
    }

    /// Load configuration from file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<Config>(&contents) {
                        Ok(config) => return config,
                        Err(e) => {
                            log::warn!("failed to parse config file: {e}");
                            log::warn!("using default configuration");
                        }
                    },
                    Err(e) => {
                        log::warn!("failed to read config file: {e}");
                        log::warn!("using default configuration");
                    }
                }
            }
        }
        Config::default()
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            let contents = toml::to_string_pretty(self)?;
            fs::write(&path, contents)?;
            return Ok(());
        }

        Err("Could not determine config directory".into())
    }

    /// Create a default config file if it doesn't exist
    pub fn create_default() -> Result<(), Box<dyn std::error::Error>> {
        if let Some(path) = Self::config_path() {
            if !path.exists() {
                let config = Config::default();
                config.save()?;
            }
        }
        Ok(())
    }

    /// Parsed server base URL, normalized to end in a slash so that
    /// endpoint joins stay under the configured prefix. Falls back to
    /// the default on an unparsable value.
    pub fn server_url(&self) -> reqwest::Url {
        let mut base = self.server.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        match reqwest::Url::parse(&base) {
            Ok(url) => url,
            Err(e) => {
                log::error!("invalid server.base_url \"{base}\": {e}");
                reqwest::Url::parse(DEFAULT_BASE_URL).expect("default base url parses")
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.server.timeout_secs, 10);
        assert_eq!(config.theme.mode, "dark");
        assert_eq!(config.panel.tree_width, 260.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let deserialized: Config = toml::from_str(&toml_str).expect("Failed to deserialize");
        assert_eq!(config.server.base_url, deserialized.server.base_url);
        assert_eq!(config.theme.mode, deserialized.theme.mode);
    }

    #[test]
    fn test_server_url_gains_trailing_slash() {
        let mut config = Config::default();
        config.server.base_url = "http://example.edu/admin-panel".to_string();
        assert_eq!(
            config.server_url().as_str(),
            "http://example.edu/admin-panel/"
        );
    }

    #[test]
    fn test_bad_server_url_falls_back_to_default() {
        let mut config = Config::default();
        config.server.base_url = "not a url".to_string();
        assert_eq!(config.server_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_endpoint_join_stays_under_prefix() {
        let config = Config::default();
        let joined = config.server_url().join("api/folder-content/").unwrap();
        assert_eq!(
            joined.as_str(),
            "http://127.0.0.1:8000/admin-panel/api/folder-content/"
        );
    }
}
