use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Configuration for the photo organization process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Whether to run without making changes
    pub dry_run: bool,

    /// Maximum directory depth for scanning
    pub max_depth: Option<usize>,

    /// Whether to follow symbolic links while scanning
    pub follow_links: bool,

    /// Path of the audit log; a timestamped name in the working
    /// directory is generated when unset
    pub audit_log: Option<PathBuf>,

    /// Directory for application log files
    pub log_dir: PathBuf,

    /// Whether to read capture metadata through exiftool
    pub use_exiftool: bool,

    /// Name or path of the exiftool executable
    pub exiftool_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dry_run: false,
            max_depth: None,
            follow_links: false,
            audit_log: None,
            log_dir: PathBuf::from("logs"),
            use_exiftool: true,
            exiftool_path: "exiftool".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::Configuration(format!("could not open {}: {}", path.display(), e))
        })?;
        serde_json::from_reader(file).map_err(|e| {
            Error::Configuration(format!("could not parse {}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| {
            Error::Configuration(format!("could not create {}: {}", path.display(), e))
        })?;
        serde_json::to_writer_pretty(file, self).map_err(|e| {
            Error::Configuration(format!("could not write {}: {}", path.display(), e))
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.use_exiftool && self.exiftool_path.trim().is_empty() {
            return Err(Error::Configuration(
                "exiftool_path must not be empty when use_exiftool is set".to_string(),
            ));
        }
        if self.max_depth == Some(0) {
            return Err(Error::Configuration(
                "max_depth of 0 would scan nothing".to_string(),
            ));
        }
        Ok(())
    }
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_empty_exiftool_path_rejected() {
        let config = Config {
            exiftool_path: "".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.dry_run = true;
        config.max_depth = Some(3);
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert!(loaded.dry_run);
        assert_eq!(loaded.max_depth, Some(3));
    }
}
