use derivative::Derivative;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const CONFIG_FILE: &str = "config.json";

/// Configuration shared between the UI loop and the watcher thread.
pub type SharedConfig = Arc<Mutex<Config>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Derivative, Clone, Default, PartialEq, Serialize, Deserialize)]
#[derivative(Debug)]
#[serde(default)]
pub struct Config {
    #[derivative(Debug(format_with = "redact"))]
    pub remove_bg_api_key: String,
    pub remove_bg_enabled: bool,
    pub watch_directory: PathBuf,
    /// Keys this version does not know about, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn redact(key: &String, f: &mut fmt::Formatter) -> fmt::Result {
    if key.is_empty() {
        write!(f, "\"\"")
    } else {
        write!(f, "\"<redacted>\"")
    }
}

impl Config {
    pub fn watch_dir(&self) -> Option<&Path> {
        if self.watch_directory.as_os_str().is_empty() {
            None
        } else {
            Some(&self.watch_directory)
        }
    }

    pub fn into_shared(self) -> SharedConfig {
        Arc::new(Mutex::new(self))
    }
}

pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(CONFIG_FILE)
    }
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            log::info!("No configuration at {}, using defaults", self.path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        config.serialize(&mut serializer)?;
        buf.push(b'\n');

        fs::write(&self.path, buf)?;
        log::info!("Configuration saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join(CONFIG_FILE))
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = store_in(&dir).load().unwrap();
        assert_eq!(config, Config::default());
        assert!(config.watch_dir().is_none());
    }

    #[test]
    fn reads_flat_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"remove_bg_api_key": "abc", "remove_bg_enabled": true, "watch_directory": "/tmp/shots"}"#,
        )
        .unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.remove_bg_api_key, "abc");
        assert!(config.remove_bg_enabled);
        assert_eq!(config.watch_dir(), Some(Path::new("/tmp/shots")));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"watch_directory": "/tmp/shots"}"#).unwrap();

        let config = store.load().unwrap();
        assert!(config.remove_bg_api_key.is_empty());
        assert!(!config.remove_bg_enabled);
    }

    #[test]
    fn save_of_loaded_record_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"remove_bg_enabled": true, "theme": "shrek", "watch_directory": "/tmp/shots"}"#,
        )
        .unwrap();

        store.save(&store.load().unwrap()).unwrap();
        let first = fs::read(store.path()).unwrap();
        store.save(&store.load().unwrap()).unwrap();
        let second = fs::read(store.path()).unwrap();

        assert_eq!(first, second);
        let text = String::from_utf8(first).unwrap();
        assert!(text.contains("    \"theme\": \"shrek\""));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(ConfigError::Json(_))));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = Config {
            remove_bg_api_key: "super-secret".to_string(),
            ..Default::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
