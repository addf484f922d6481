//! Inventory configuration: container routing ids and cursor size.

use crate::equipment::DEFAULT_CURSOR_SLOTS;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;
use tracing::warn;

/// Errors emitted while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Wrap IO errors when reading the file.
    #[error("failed to read inventory config: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap TOML parsing issues.
    #[error("failed to parse inventory config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The file parsed but describes an unusable layout.
    #[error("invalid inventory config: {0}")]
    Invalid(String),
}

/// Container ids the client uses to address each backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowIds {
    /// Hotbar + main inventory.
    pub main: u8,
    /// Off-hand slot.
    pub off_hand: u8,
    /// Armor slots, sub-indexed 0..=3.
    pub armor: u8,
    /// Reserved; always resolves to AIR.
    pub reserved: u8,
    /// Cursor inventory.
    pub cursor: u8,
}

impl Default for WindowIds {
    fn default() -> Self {
        Self {
            main: 0,
            off_hand: 119,
            armor: 120,
            reserved: 121,
            cursor: 124,
        }
    }
}

impl WindowIds {
    fn all(&self) -> [u8; 5] {
        [self.main, self.off_hand, self.armor, self.reserved, self.cursor]
    }
}

/// Tunables for a participant inventory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Routing ids for the fixed containers.
    pub window_ids: WindowIds,
    /// Slots behind the cursor container id.
    pub cursor_slots: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            window_ids: WindowIds::default(),
            cursor_slots: DEFAULT_CURSOR_SLOTS,
        }
    }
}

impl InventoryConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: InventoryConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(config) => config,
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Inventory config not found at {}. Using defaults",
                    path.display()
                );
                Self::default()
            }
            Err(err) => {
                warn!("Failed to load {}: {err}. Using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Check that every fixed container has its own id and the cursor has room.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ids = self.window_ids.all();
        for (i, id) in ids.iter().enumerate() {
            if ids[i + 1..].contains(id) {
                return Err(ConfigError::Invalid(format!(
                    "container id {id} is assigned more than once"
                )));
            }
        }
        if self.cursor_slots == 0 {
            return Err(ConfigError::Invalid(
                "cursor_slots must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
