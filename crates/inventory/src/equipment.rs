//! Single-stack equipment slots: worn armor and the cursor grid.

use invkeep_core::ItemStack;
use serde::{Deserialize, Serialize};

/// Armor slot types, in protocol sub-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorSlot {
    /// Sub-index 0.
    Helmet,
    /// Sub-index 1.
    Chest,
    /// Sub-index 2.
    Leggings,
    /// Sub-index 3.
    Boots,
}

impl ArmorSlot {
    /// All slots in wear order (helmet -> chest -> leggings -> boots).
    pub const ALL: [ArmorSlot; 4] = [
        ArmorSlot::Helmet,
        ArmorSlot::Chest,
        ArmorSlot::Leggings,
        ArmorSlot::Boots,
    ];

    /// Map a protocol sub-index to a slot.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Protocol sub-index of this slot.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Player's equipped armor. Empty slots hold AIR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmorSet {
    /// Head slot.
    pub helmet: ItemStack,
    /// Torso slot.
    pub chest: ItemStack,
    /// Legs slot.
    pub leggings: ItemStack,
    /// Feet slot.
    pub boots: ItemStack,
}

impl ArmorSet {
    /// Create empty armor slots
    pub fn new() -> Self {
        Self::default()
    }

    /// Get armor in a slot
    pub fn get(&self, slot: ArmorSlot) -> &ItemStack {
        match slot {
            ArmorSlot::Helmet => &self.helmet,
            ArmorSlot::Chest => &self.chest,
            ArmorSlot::Leggings => &self.leggings,
            ArmorSlot::Boots => &self.boots,
        }
    }

    /// Mutable access to a slot.
    pub fn get_mut(&mut self, slot: ArmorSlot) -> &mut ItemStack {
        match slot {
            ArmorSlot::Helmet => &mut self.helmet,
            ArmorSlot::Chest => &mut self.chest,
            ArmorSlot::Leggings => &mut self.leggings,
            ArmorSlot::Boots => &mut self.boots,
        }
    }

    /// Equip a stack, returning the previously worn one. Empty stacks store AIR.
    pub fn equip(&mut self, slot: ArmorSlot, stack: ItemStack) -> ItemStack {
        let stack = if stack.is_air() { ItemStack::air() } else { stack };
        std::mem::replace(self.get_mut(slot), stack)
    }

    /// Remove whatever is worn in `slot`.
    pub fn unequip(&mut self, slot: ArmorSlot) -> ItemStack {
        std::mem::take(self.get_mut(slot))
    }

    /// Snapshot in wear order.
    pub fn to_array(&self) -> [ItemStack; 4] {
        ArmorSlot::ALL.map(|slot| self.get(slot).clone())
    }

    /// True when nothing is worn.
    pub fn is_empty(&self) -> bool {
        ArmorSlot::ALL.iter().all(|slot| self.get(*slot).is_air())
    }
}

/// Default number of slots behind the cursor container id.
pub const DEFAULT_CURSOR_SLOTS: usize = 51;

/// Held cursor stack plus the scratch slots the client addresses through the
/// cursor container id.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorInventory {
    slots: Vec<ItemStack>,
}

impl CursorInventory {
    /// Create an all-AIR cursor inventory with `size` slots (at least one).
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![ItemStack::air(); size.max(1)],
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; a cursor inventory has at least the held slot.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Stack at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index)
    }

    /// The stack held on the cursor (slot 0).
    pub fn held(&self) -> &ItemStack {
        &self.slots[0]
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

    /// Reset every slot to AIR, returning whether anything was cleared.
    pub fn clear(&mut self) -> bool {
        let mut changed = false;
        for slot in &mut self.slots {
            if !slot.is_air() {
                *slot = ItemStack::air();
                changed = true;
            }
        }
        changed
    }
}

impl Default for CursorInventory {
    fn default() -> Self {
        Self::new(DEFAULT_CURSOR_SLOTS)
    }
}
