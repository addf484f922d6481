//! Wear on held tools and worn armor.
//!
//! Unbreaking is a per-use roll: with level `L > 0` a draw in `[0, L]` other
//! than zero cancels the wear, so roughly `1 / (L + 1)` of uses still count.

use crate::equipment::ArmorSlot;
use crate::events::{Audience, EffectKind, InventoryEvent, InventorySink};
use crate::participant::Participant;
use crate::player::PlayerInventory;
use invkeep_core::{EnchantmentType, ItemStack};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub use crate::participant::GameMode;

/// What the participant was doing when its tool took wear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageReason {
    /// Mined a block.
    BlockBreak,
    /// Used the tool on a block (tilling, stripping).
    BlockInteract,
    /// Hit an entity.
    EntityAttack,
    /// Used the tool on an entity (shearing).
    EntityInteract,
    /// Plain item use.
    ItemUse,
}

/// Context for a wear event. Only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageCause {
    /// Why the tool wore.
    pub reason: DamageReason,
    /// Entity that was hit or used on, if any.
    pub target: Option<u64>,
    /// Block coordinates involved, if any.
    pub block: Option<[i32; 3]>,
}

impl DamageCause {
    /// Cause with no target.
    pub const fn new(reason: DamageReason) -> Self {
        Self {
            reason,
            target: None,
            block: None,
        }
    }

    /// Wear from breaking the block at `pos`.
    pub const fn block_break(pos: [i32; 3]) -> Self {
        Self {
            reason: DamageReason::BlockBreak,
            target: None,
            block: Some(pos),
        }
    }

    /// Wear from attacking entity `target`.
    pub const fn entity_attack(target: u64) -> Self {
        Self {
            reason: DamageReason::EntityAttack,
            target: Some(target),
            block: None,
        }
    }
}

/// Result of applying wear to one stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WearOutcome {
    /// AIR or not damageable; nothing rolled.
    Unaffected,
    /// Unbreaking cancelled the wear.
    Negated,
    /// Wear applied, item still usable.
    Worn,
    /// Wear reached durability; the stack is now AIR.
    Destroyed,
}

/// Roll unbreaking at `level`. Level 0 never negates and draws nothing.
pub fn negates_wear<R: Rng + ?Sized>(level: u8, rng: &mut R) -> bool {
    level > 0 && rng.gen_range(0..=level) != 0
}

/// Apply `amount` wear to `stack`, replacing it with AIR when it breaks.
pub fn apply_wear<R: Rng + ?Sized>(stack: &mut ItemStack, amount: u32, rng: &mut R) -> WearOutcome {
    if stack.is_air() || !stack.is_damageable() {
        return WearOutcome::Unaffected;
    }
    let level = stack.enchantment_level(EnchantmentType::Unbreaking);
    if negates_wear(level, rng) {
        trace!(kind = stack.kind, level, "unbreaking negated wear");
        return WearOutcome::Negated;
    }
    if stack.reduce_durability(amount) {
        debug!(kind = stack.kind, "item worn out");
        *stack = ItemStack::air();
        WearOutcome::Destroyed
    } else {
        WearOutcome::Worn
    }
}

impl<S: InventorySink> PlayerInventory<S> {
    /// Wear the held tool by one point.
    ///
    /// Emits an item-break effect at the participant when the tool is
    /// destroyed, then the held slot's new contents.
    pub fn damage_held_tool<P, R>(
        &mut self,
        participant: &P,
        rng: &mut R,
        cause: DamageCause,
    ) -> WearOutcome
    where
        P: Participant + ?Sized,
        R: Rng + ?Sized,
    {
        if !participant.game_mode().takes_wear() {
            return WearOutcome::Unaffected;
        }
        let slot = self.held_index as usize;
        let mut held = self.slots.replace(slot, None);
        let outcome = apply_wear(&mut held, 1, rng);
        self.slots.set(slot, Some(held));
        debug!(
            slot,
            ?outcome,
            reason = ?cause.reason,
            target = ?cause.target,
            block = ?cause.block,
            "held tool wear"
        );

        if outcome == WearOutcome::Destroyed {
            self.sink.notify(InventoryEvent::Effect {
                kind: EffectKind::ItemBreak,
                position: participant.position(),
            });
        }
        self.notify_slot(slot);
        outcome
    }

    /// Wear every armor piece by one point, each with its own roll.
    ///
    /// Each destroyed piece gets its own item-break effect; one equipment
    /// update follows.
    pub fn damage_armor_set<P, R>(&mut self, participant: &P, rng: &mut R) -> [WearOutcome; 4]
    where
        P: Participant + ?Sized,
        R: Rng + ?Sized,
    {
        let mut outcomes = [WearOutcome::Unaffected; 4];
        if !participant.game_mode().takes_wear() {
            return outcomes;
        }
        for slot in ArmorSlot::ALL {
            let outcome = apply_wear(self.armor.get_mut(slot), 1, rng);
            if outcome == WearOutcome::Destroyed {
                debug!(?slot, "armor piece destroyed");
                self.sink.notify(InventoryEvent::Effect {
                    kind: EffectKind::ItemBreak,
                    position: participant.position(),
                });
            }
            outcomes[slot.index()] = outcome;
        }
        self.notify_equipment(Audience::Everyone);
        outcomes
    }
}
