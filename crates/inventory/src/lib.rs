#![warn(missing_docs)]
//! Per-participant inventory: slot storage, wear, slot addressing and change
//! notification.

pub mod config;
pub mod container;
pub mod durability;
pub mod equipment;
pub mod events;
pub mod participant;
pub mod player;
pub mod router;
pub mod shared;

pub use config::{ConfigError, InventoryConfig, WindowIds};
pub use container::{
    Placement, Removal, SlotContainer, HOTBAR_SIZE, INVENTORY_SIZE, MAIN_REGION, MAIN_SIZE,
};
pub use durability::{apply_wear, negates_wear, DamageCause, DamageReason, WearOutcome};
pub use equipment::{ArmorSet, ArmorSlot, CursorInventory, DEFAULT_CURSOR_SLOTS};
pub use events::{Audience, EffectKind, InventoryEvent, InventorySink, Position};
pub use participant::{Capability, ExternalContainer, GameMode, Participant, StorageContainer};
pub use player::PlayerInventory;
pub use router::{ContainerTarget, SlotRouter};
pub use shared::SharedInventory;
