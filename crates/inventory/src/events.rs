//! Outbound notifications emitted after every inventory mutation.

use crate::equipment::ArmorSet;
use invkeep_core::ItemStack;
use serde::{Deserialize, Serialize};

/// World-space position used to anchor effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Position {
    /// Construct a position.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Who an equipment update is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// The owner and nearby observers.
    Everyone,
    /// Nearby observers only; the owner already knows.
    ObserversOnly,
}

/// Effects broadcast to observers near the participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// An item wore out and was destroyed.
    ItemBreak,
}

/// A change the transport or broadcast layer must hear about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InventoryEvent {
    /// One slot of the main container now holds `stack`.
    SlotChanged {
        /// Slot index in the main container.
        slot: usize,
        /// New occupant.
        stack: ItemStack,
    },
    /// Held item, hotbar selection, off-hand or armor changed.
    EquipmentChanged {
        /// Stack in the selected hotbar slot.
        held: ItemStack,
        /// Selected hotbar index.
        hotbar_index: u8,
        /// Off-hand stack.
        off_hand: ItemStack,
        /// Worn armor.
        armor: ArmorSet,
        /// Intended recipients.
        audience: Audience,
    },
    /// One cursor-inventory slot now holds `stack`.
    CursorChanged {
        /// Slot index in the cursor inventory.
        slot: usize,
        /// New occupant.
        stack: ItemStack,
    },
    /// A cue for nearby observers.
    Effect {
        /// What happened.
        kind: EffectKind,
        /// Where it happened.
        position: Position,
    },
    /// Every slot may have changed; resend the whole inventory.
    FullInventoryChanged,
}

impl InventoryEvent {
    /// Short label, used for log records.
    pub fn label(&self) -> &'static str {
        match self {
            InventoryEvent::SlotChanged { .. } => "slot_changed",
            InventoryEvent::EquipmentChanged { .. } => "equipment_changed",
            InventoryEvent::CursorChanged { .. } => "cursor_changed",
            InventoryEvent::Effect { .. } => "effect",
            InventoryEvent::FullInventoryChanged => "full_inventory_changed",
        }
    }
}

/// Receiver for inventory notifications.
pub trait InventorySink {
    /// Deliver one event.
    fn notify(&mut self, event: InventoryEvent);
}

impl InventorySink for Vec<InventoryEvent> {
    fn notify(&mut self, event: InventoryEvent) {
        self.push(event);
    }
}

impl<S: InventorySink + ?Sized> InventorySink for &mut S {
    fn notify(&mut self, event: InventoryEvent) {
        (**self).notify(event);
    }
}

impl<S: InventorySink + ?Sized> InventorySink for Box<S> {
    fn notify(&mut self, event: InventoryEvent) {
        (**self).notify(event);
    }
}
