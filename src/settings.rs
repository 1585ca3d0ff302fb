//! Persisted viewer settings
//!
//! A small YAML file under the platform config dir. Settings are always
//! optional: a missing or unreadable file falls back to defaults with a
//! logged warning, never an error the user has to deal with.

use std::fs;
use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const CURRENT_VERSION: u32 = 1;
const SETTINGS_FILENAME: &str = "config.yaml";
const APP_NAME: &str = "folio";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_theme")]
    pub theme: String,

    /// Zoom factor applied when a document opens
    #[serde(default = "default_zoom")]
    pub initial_zoom: f32,

    /// Where save-a-copy writes; defaults to the platform download dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_dir: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_zoom() -> f32 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            theme: default_theme(),
            initial_zoom: default_zoom(),
            save_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        let Some(path) = settings_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    fn load_from(path: &std::path::Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => match serde_yaml::from_str::<Settings>(&raw) {
                Ok(settings) => {
                    info!("loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    warn!("settings at {} unreadable ({e}); using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = settings_path()
            .ok_or_else(|| anyhow::anyhow!("no config directory on this platform"))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// The directory save-a-copy writes into.
    pub fn resolved_save_dir(&self) -> PathBuf {
        if let Some(dir) = &self.save_dir {
            return dir.clone();
        }
        dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(SETTINGS_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.version, CURRENT_VERSION);
        assert_eq!(s.initial_zoom, 1.0);
        assert_eq!(s.log_level, "info");
    }

    #[test]
    fn test_roundtrip_yaml() {
        let mut s = Settings::default();
        s.theme = "light".to_string();
        s.initial_zoom = 1.5;

        let raw = serde_yaml::to_string(&s).unwrap();
        let back: Settings = serde_yaml::from_str(&raw).unwrap();
        assert_eq!(back.theme, "light");
        assert_eq!(back.initial_zoom, 1.5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let back: Settings = serde_yaml::from_str("theme: light\n").unwrap();
        assert_eq!(back.theme, "light");
        assert_eq!(back.initial_zoom, 1.0);
        assert_eq!(back.version, CURRENT_VERSION);
    }

    #[test]
    fn test_unreadable_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, ": not yaml : [").unwrap();

        let s = Settings::load_from(&path);
        assert_eq!(s.theme, default_theme());
    }
}
