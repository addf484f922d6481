//! Collaborator interfaces: the participant owning the inventory and any
//! foreign container it has open.

use crate::events::Position;
use invkeep_core::ItemStack;
use serde::{Deserialize, Serialize};

/// Play mode of the owning participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Normal play.
    #[default]
    Survival,
    /// Normal play with world-editing restrictions.
    Adventure,
    /// Unrestricted; items never wear.
    Creative,
    /// Observer only.
    Spectator,
}

impl GameMode {
    /// Whether held tools and worn armor take wear in this mode.
    pub fn takes_wear(self) -> bool {
        self != GameMode::Creative
    }

    /// Parse a mode name (`survival`, `creative`, ...) or its numeric id.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "survival" | "s" | "0" => Some(GameMode::Survival),
            "creative" | "c" | "1" => Some(GameMode::Creative),
            "adventure" | "a" | "2" => Some(GameMode::Adventure),
            "spectator" | "sp" | "3" => Some(GameMode::Spectator),
            _ => None,
        }
    }
}

/// What a foreign container lets callers do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Slots can be read by plain index.
    Indexed,
    /// Slots are not individually addressable (trade screens and the like).
    Opaque,
}

/// A container owned by someone else that the participant currently has open.
pub trait ExternalContainer {
    /// How this container may be addressed.
    fn capability(&self) -> Capability;

    /// Stack at `index`, if the index exists.
    fn slot(&self, index: usize) -> Option<&ItemStack>;
}

/// The participant as seen by its inventory.
pub trait Participant {
    /// Current play mode.
    fn game_mode(&self) -> GameMode;

    /// Where effects for this participant should be anchored.
    fn position(&self) -> Position;

    /// The foreign container the participant has open, if any.
    fn open_container(&self) -> Option<&dyn ExternalContainer>;
}

/// Plain indexed storage: chests, a mount's saddlebags and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageContainer {
    slots: Vec<ItemStack>,
}

impl StorageContainer {
    /// Create an all-AIR storage container.
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![ItemStack::air(); size],
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the container has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Replace a slot. Returns false if `index` is out of range.
    pub fn set(&mut self, index: usize, stack: ItemStack) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = if stack.is_air() { ItemStack::air() } else { stack };
                true
            }
            None => false,
        }
    }
}

impl ExternalContainer for StorageContainer {
    fn capability(&self) -> Capability {
        Capability::Indexed
    }

    fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index)
    }
}
