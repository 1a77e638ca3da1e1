use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::overlay::domain::filter_variant::FilterVariant;
use crate::printing::domain::print_quantity::PrintQuantity;
use crate::printing::print_preview::PrintSurface;
use crate::shared::constants::{DEFAULT_PRINT_DPI, DEFAULT_PRINT_SETTLE};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// User-adjustable booth configuration, persisted as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoothSettings {
    pub filter: FilterVariant,
    pub print_quantity: PrintQuantity,
    #[serde(default = "default_print_dpi")]
    pub print_dpi: u32,
    #[serde(default = "default_print_settle_ms")]
    pub print_settle_ms: u64,
}

fn default_print_dpi() -> u32 {
    DEFAULT_PRINT_DPI
}

fn default_print_settle_ms() -> u64 {
    DEFAULT_PRINT_SETTLE.as_millis() as u64
}

impl Default for BoothSettings {
    fn default() -> Self {
        Self {
            filter: FilterVariant::default(),
            print_quantity: PrintQuantity::default(),
            print_dpi: default_print_dpi(),
            print_settle_ms: default_print_settle_ms(),
        }
    }
}

impl BoothSettings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("PhotoBooth").join("settings.json"))
    }

    /// Loads from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring settings: {e}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(write_err)
    }

    pub fn print_surface(&self) -> PrintSurface {
        PrintSurface::with_dpi(self.print_dpi)
    }

    pub fn print_settle(&self) -> Duration {
        Duration::from_millis(self.print_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = BoothSettings::default();
        assert_eq!(s.filter, FilterVariant::PartyHat);
        assert_eq!(s.print_quantity.get(), 1);
        assert_eq!(s.print_surface().pixel_size(), (638, 1016));
        assert_eq!(s.print_settle(), Duration::from_secs(1));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = BoothSettings {
            filter: FilterVariant::Crown,
            print_quantity: PrintQuantity::new(4),
            print_dpi: 150,
            print_settle_ms: 250,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(BoothSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"filter":"mask","print_quantity":30}"#).unwrap();

        let s = BoothSettings::load_from(&path).unwrap();
        assert_eq!(s.filter, FilterVariant::Mask);
        assert_eq!(s.print_quantity.get(), 10);
        assert_eq!(s.print_dpi, DEFAULT_PRINT_DPI);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            BoothSettings::load_from(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        assert!(matches!(
            BoothSettings::load_from(Path::new("/nonexistent/settings.json")),
            Err(SettingsError::Read { .. })
        ));
    }
}
