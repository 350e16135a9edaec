use crate::errors::InstallError;
use crate::logger;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use which::which;

/// Name of the directory holding plugin subdirectories when no
/// extensions root is configured
const DEFAULT_EXT_DIR: &str = "ext";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pip_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheelhouse: Option<String>,
}

impl Config {
    pub fn path() -> PathBuf {
        // Honor explicit override via MFR_CONFIG for tests / isolated runs.
        // If set and non-empty, use that path immediately.
        if let Ok(env_path) = std::env::var("MFR_CONFIG") {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        // Default config file path (platform-appropriate).
        #[cfg(not(target_os = "windows"))]
        let default = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("mfr")
            .join("mfr.toml");

        #[cfg(target_os = "windows")]
        let default = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mfr")
            .join("mfr.toml");

        default
    }

    pub fn load() -> Result<Self, InstallError> {
        let path = Self::path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content).map_err(|e| InstallError::Config(e.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), InstallError> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| InstallError::Config(e.to_string()))?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Fold process environment overrides into the config. Called once at
    /// startup; everything downstream reads the config value, never the
    /// environment.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(ext_path) = std::env::var("MFR_EXT_PATH") {
            if !ext_path.trim().is_empty() {
                self.ext_path = Some(ext_path);
            }
        }
        if let Ok(wheelhouse) = std::env::var("WHEELHOUSE") {
            if !wheelhouse.trim().is_empty() {
                self.wheelhouse = Some(wheelhouse);
            }
        }
    }

    /// The extensions root: configured path, or `ext` under the current
    /// directory, matching the layout the renderer ships with.
    pub fn get_ext_path(&self) -> PathBuf {
        self.ext_path
            .as_ref()
            .map_or_else(|| PathBuf::from(DEFAULT_EXT_DIR), PathBuf::from)
    }

    /// Optional local package source passed to pip as `--find-links`
    pub fn wheelhouse_path(&self) -> Option<PathBuf> {
        self.wheelhouse.as_ref().map(PathBuf::from)
    }

    pub fn ensure_pip_path(&mut self) -> Result<String, InstallError> {
        // Check if the stored path exists
        if let Some(ref path) = self.pip_path {
            if std::path::Path::new(path).exists() {
                return Ok(path.clone());
            }
            // Path was in config but doesn't exist, clear it
            logger::warn(&format!("Stored pip path no longer exists: {}", path));
            self.pip_path = None;
        }

        for candidate in ["pip3", "pip"] {
            if let Ok(path) = which(candidate) {
                let path_str = path.to_string_lossy().trim().to_string();
                self.pip_path = Some(path_str.clone());
                self.save()?;
                return Ok(path_str);
            }
        }

        Err(InstallError::PipNotFound(
            "no pip or pip3 executable on PATH. Install pip or set pip_path in the config file"
                .to_string(),
        ))
    }
}
