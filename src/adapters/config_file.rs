//! JSON settings-file adapter.
//!
//! Implements [`ConfigPort`] on top of a single JSON document.
//!
//! - Missing file: defaults.
//! - Unparseable file: [`ConfigError::Corrupted`].
//! - Every load and save runs [`LimiterConfig::validate`].
//! - Saves write a sibling temp file and rename it over the target, so a
//!   crash mid-write never leaves a truncated document behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::LimiterConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut p = self.path.clone().into_os_string();
        p.push(".tmp");
        PathBuf::from(p)
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<LimiterConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No settings at {}, using defaults", self.path.display());
                return Ok(LimiterConfig::default());
            }
            Err(e) => {
                warn!("Settings read failed ({}): {}", self.path.display(), e);
                return Err(ConfigError::IoError);
            }
        };

        let config: LimiterConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("Settings parse failed ({}): {}", self.path.display(), e);
            ConfigError::Corrupted
        })?;
        config.validate()?;
        info!("Settings loaded from {}", self.path.display());
        Ok(config)
    }

    fn save(&self, config: &LimiterConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config).map_err(|_| ConfigError::Corrupted)?;

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|e| {
            warn!("Settings write failed ({}): {}", tmp.display(), e);
            ConfigError::IoError
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            warn!("Settings rename failed ({}): {}", self.path.display(), e);
            ConfigError::IoError
        })?;
        Ok(())
    }
}
