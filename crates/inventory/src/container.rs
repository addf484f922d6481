//! Fixed-size slot container backing the participant's hotbar and main
//! inventory.
//!
//! Both regions share one index space: the hotbar occupies `0..HOTBAR_SIZE`
//! and the main region follows it. Automatic placement, merging, removal and
//! counting only ever scan the main region; hotbar slots are touched solely
//! through explicit indices.

use invkeep_core::{ItemStack, KindId};
use std::ops::Range;

/// Number of hotbar slots.
pub const HOTBAR_SIZE: usize = 9;

/// Number of main-region slots.
pub const MAIN_SIZE: usize = 36;

/// Total slots in the container.
pub const INVENTORY_SIZE: usize = HOTBAR_SIZE + MAIN_SIZE;

/// Indices eligible for automatic stacking and placement.
pub const MAIN_REGION: Range<usize> = HOTBAR_SIZE..INVENTORY_SIZE;

/// Result of a placement attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    /// Whether the incoming stack was fully consumed.
    pub placed: bool,
    /// Slots that changed, in the order they were written.
    pub touched: Vec<usize>,
}

/// Result of a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removal {
    /// Units actually taken out.
    pub removed: u32,
    /// Slots that changed, in index order.
    pub touched: Vec<usize>,
}

/// Hotbar plus main inventory. Every slot always holds a valid stack; empty
/// slots hold AIR.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotContainer {
    slots: [ItemStack; INVENTORY_SIZE],
}

impl Default for SlotContainer {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_template(slot: &ItemStack, template: &ItemStack, match_extra: bool) -> bool {
    !slot.is_air()
        && slot.kind == template.kind
        && (!match_extra || slot.extra_data() == template.extra_data())
}

impl SlotContainer {
    /// Create an all-AIR container.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| ItemStack::air()),
        }
    }

    /// Number of slots.
    pub const fn len(&self) -> usize {
        INVENTORY_SIZE
    }

    /// Always false; the container has a fixed, non-zero size.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Get the stack at `index`. Panics when out of range.
    #[track_caller]
    pub fn get(&self, index: usize) -> &ItemStack {
        assert!(
            index < INVENTORY_SIZE,
            "slot index {index} out of range ({INVENTORY_SIZE} slots)"
        );
        &self.slots[index]
    }

    /// Get the stack at `index`, or `None` when out of range.
    pub fn try_get(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index)
    }

    /// Replace the slot at `index`. `None` or an empty stack stores AIR.
    #[track_caller]
    pub fn set(&mut self, index: usize, stack: Option<ItemStack>) {
        self.replace(index, stack);
    }

    /// Replace the slot at `index`, returning the previous occupant.
    #[track_caller]
    pub fn replace(&mut self, index: usize, stack: Option<ItemStack>) -> ItemStack {
        assert!(
            index < INVENTORY_SIZE,
            "slot index {index} out of range ({INVENTORY_SIZE} slots)"
        );
        let stack = match stack {
            Some(stack) if !stack.is_air() => stack,
            _ => ItemStack::air(),
        };
        std::mem::replace(&mut self.slots[index], stack)
    }

    /// Take up to `amount` units out of one slot. A slot left with nothing
    /// becomes AIR. Returns the units removed.
    #[track_caller]
    pub fn decrease(&mut self, index: usize, amount: u8) -> u8 {
        assert!(
            index < INVENTORY_SIZE,
            "slot index {index} out of range ({INVENTORY_SIZE} slots)"
        );
        let slot = &mut self.slots[index];
        let removed = slot.remove(amount);
        if slot.is_air() {
            *slot = ItemStack::air();
        }
        removed
    }

    /// Merge `stack` into matching main-region slots, then drop any remainder
    /// into the first empty slot.
    ///
    /// Matching ignores extra data. On return `stack.count` holds whatever
    /// could not be placed (0 on success).
    pub fn merge_or_place(&mut self, stack: &mut ItemStack) -> Placement {
        let mut touched = Vec::new();
        if stack.is_air() {
            return Placement {
                placed: true,
                touched,
            };
        }

        // First pass: top up existing stacks.
        for index in MAIN_REGION {
            let existing = &mut self.slots[index];
            if existing.stacks_with(stack, false) && !existing.is_full() {
                let take = stack.count.min(existing.remaining_space());
                existing.count += take;
                stack.count -= take;
                touched.push(index);

                if stack.count == 0 {
                    return Placement {
                        placed: true,
                        touched,
                    };
                }
            }
        }

        // Second pass: the remainder goes into the first empty slot.
        if let Some(index) = self.first_empty() {
            self.slots[index] = stack.clone();
            stack.count = 0;
            touched.push(index);
            return Placement {
                placed: true,
                touched,
            };
        }

        Placement {
            placed: false,
            touched,
        }
    }

    /// Put `stack` into the first empty main-region slot without merging.
    pub fn place_in_first_empty(&mut self, stack: ItemStack) -> Placement {
        if stack.is_air() {
            return Placement {
                placed: true,
                touched: Vec::new(),
            };
        }
        match self.first_empty() {
            Some(index) => {
                self.slots[index] = stack;
                Placement {
                    placed: true,
                    touched: vec![index],
                }
            }
            None => Placement::default(),
        }
    }

    /// Remove up to `count` units matching `template` from the main region.
    /// The template's own count is ignored.
    pub fn remove_matching(
        &mut self,
        template: &ItemStack,
        match_extra: bool,
        count: u32,
    ) -> Removal {
        self.drain(count, |slot| matches_template(slot, template, match_extra))
    }

    /// Remove up to `count` units of `kind` from the main region, ignoring extra data.
    pub fn remove_by_kind(&mut self, kind: KindId, count: u32) -> Removal {
        self.drain(count, |slot| !slot.is_air() && slot.kind == kind)
    }

    fn drain(&mut self, count: u32, mut matches: impl FnMut(&ItemStack) -> bool) -> Removal {
        let mut remaining = count;
        let mut touched = Vec::new();

        for index in MAIN_REGION {
            if remaining == 0 {
                break;
            }

            let slot = &mut self.slots[index];
            if !matches(slot) {
                continue;
            }

            let take = remaining.min(u32::from(slot.count)) as u8;
            slot.count -= take;
            remaining -= u32::from(take);
            if slot.count == 0 {
                *slot = ItemStack::air();
            }
            touched.push(index);
        }

        Removal {
            removed: count - remaining,
            touched,
        }
    }

    /// True if one matching slot holds at least `required` units, or if the
    /// matching slots hold that many between them.
    pub fn contains_at_least(
        &self,
        template: &ItemStack,
        match_extra: bool,
        required: u32,
    ) -> bool {
        let mut total = 0u32;
        for slot in self.main_region() {
            if !matches_template(slot, template, match_extra) {
                continue;
            }
            if u32::from(slot.count) >= required {
                return true;
            }
            total += u32::from(slot.count);
        }
        total >= required
    }

    /// True if any main-region slot matches `template`.
    pub fn contains_any(&self, template: &ItemStack, match_extra: bool) -> bool {
        self.main_region()
            .iter()
            .any(|slot| matches_template(slot, template, match_extra))
    }

    /// Total units matching `template` across the main region.
    pub fn count_matching(&self, template: &ItemStack, match_extra: bool) -> u32 {
        self.main_region()
            .iter()
            .filter(|slot| matches_template(slot, template, match_extra))
            .map(|slot| u32::from(slot.count))
            .sum()
    }

    /// First empty main-region slot.
    pub fn first_empty(&self) -> Option<usize> {
        MAIN_REGION.into_iter().find(|&index| self.slots[index].is_air())
    }

    /// Reset every slot (hotbar included) to AIR, returning the indices that
    /// were occupied.
    pub fn clear_all(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if !slot.is_air() {
                *slot = ItemStack::air();
                cleared.push(index);
            }
        }
        cleared
    }

    /// The hotbar slots.
    pub fn hotbar(&self) -> &[ItemStack] {
        &self.slots[..HOTBAR_SIZE]
    }

    /// The main-region slots.
    pub fn main_region(&self) -> &[ItemStack] {
        &self.slots[MAIN_REGION]
    }

    /// All slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter()
    }

    /// Count of empty main-region slots.
    pub fn empty_slots(&self) -> usize {
        self.main_region().iter().filter(|slot| slot.is_air()).count()
    }
}
