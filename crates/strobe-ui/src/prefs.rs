use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::widgets::grid::CellGrid;
use crate::widgets::stepper::FrequencyStepper;

/// User preferences persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "Preferences::default_frequency_hz")]
    pub frequency_hz: u32,
    #[serde(default = "Preferences::default_playing")]
    pub playing: bool,
    #[serde(default = "Preferences::default_side")]
    pub rows: u16,
    #[serde(default = "Preferences::default_side")]
    pub columns: u16,
}

impl Preferences {
    fn default_frequency_hz() -> u32 {
        30
    }
    fn default_playing() -> bool {
        true
    }
    fn default_side() -> u16 {
        8
    }

    /// `<config dir>/strobe/preferences.toml`, or a file in the working
    /// directory when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("strobe").join("preferences.toml"),
            None => PathBuf::from("strobe-preferences.toml"),
        }
    }

    /// Forces every field into its valid range.
    pub fn sanitized(mut self) -> Self {
        self.frequency_hz = self.frequency_hz.min(FrequencyStepper::DEFAULT_MAX_HZ);
        self.rows = self.rows.clamp(1, CellGrid::MAX_SIDE);
        self.columns = self.columns.clamp(1, CellGrid::MAX_SIDE);
        self
    }

    /// Reads preferences from `path`.
    ///
    /// A missing file yields defaults. A malformed file is logged and also
    /// yields defaults; it is left on disk untouched until the next save.
    pub fn load_or_default(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no preferences at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("failed to read preferences {}: {err}", path.display());
                return Self::default();
            }
        };

        match toml::from_str::<Preferences>(&contents) {
            Ok(prefs) => prefs.sanitized(),
            Err(err) => {
                log::warn!("failed to parse preferences {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Writes preferences to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let text = toml::to_string_pretty(self).context("failed to serialize preferences")?;
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;

        log::debug!("saved preferences to {}", path.display());
        Ok(())
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            frequency_hz: Self::default_frequency_hz(),
            playing: Self::default_playing(),
            rows: Self::default_side(),
            columns: Self::default_side(),
        }
    }
}
