use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Name of the optional settings file next to the executable
pub const CONFIG_FILE: &str = "modsort.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workshop record, relative to the base directory unless absolute
    pub workshop_file: String,
    pub cache_file: String,
    pub log_file: String,
    /// Catalog page queried with `?id=<mod id>`
    pub lookup_url: String,
    pub lookup_workers: usize,
    pub request_timeout_secs: u64,
    /// Titles longer than this are shortened when drawn
    pub max_title_len: usize,
    pub double_click_ms: u64,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workshop_file: "workshop.txt".to_string(),
            cache_file: "mod_cache.json".to_string(),
            log_file: "modsort.log".to_string(),
            lookup_url: "https://steamcommunity.com/sharedfiles/filedetails/".to_string(),
            lookup_workers: 8,
            request_timeout_secs: 10,
            max_title_len: 45,
            double_click_ms: 400,
            tick_rate_ms: 100,
        }
    }
}

impl Config {
    /// Directory holding the running executable, falling back to the cwd
    pub fn base_dir() -> PathBuf {
        env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .or_else(|| env::current_dir().ok())
            .unwrap_or_default()
    }

    /// Load `modsort.json` from `base_dir`. A missing file gives the defaults.
    pub fn load(base_dir: &Path) -> Result<Config, ConfigError> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn resolve(&self, base_dir: &Path, file: &str) -> PathBuf {
        base_dir.join(file)
    }

    pub fn workshop_path(&self, base_dir: &Path) -> PathBuf {
        self.resolve(base_dir, &self.workshop_file)
    }

    pub fn cache_path(&self, base_dir: &Path) -> PathBuf {
        self.resolve(base_dir, &self.cache_file)
    }

    pub fn log_path(&self, base_dir: &Path) -> PathBuf {
        self.resolve(base_dir, &self.log_file)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn double_click(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.workshop_file, "workshop.txt");
        assert_eq!(config.max_title_len, 45);
        assert_eq!(config.workshop_path(dir.path()), dir.path().join("workshop.txt"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "lookup_workers": 2, "max_title_len": 30 }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.lookup_workers, 2);
        assert_eq!(config.max_title_len, 30);
        assert_eq!(config.cache_file, "mod_cache.json");
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "lookup_workers = 2").unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = Config {
            workshop_file: "/srv/game/workshop.txt".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.workshop_path(Path::new("/opt/modsort")),
            PathBuf::from("/srv/game/workshop.txt")
        );
    }
}
