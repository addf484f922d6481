#![warn(missing_docs)]
//! Core item primitives shared across the workspace.

pub mod enchantment;
pub mod item;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use enchantment::{Enchantment, EnchantmentType};
pub use item::{ExtraData, ItemProperties, ItemStack, KindId, AIR_KIND, AIR_SENTINEL};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Helper to derive a reproducible RNG seeded by session + participant + tick domains.
pub fn scoped_rng(session_seed: u64, participant: u64, tick: SimTick) -> StdRng {
    let seed = session_seed ^ participant.rotate_left(32) ^ tick.0;
    StdRng::seed_from_u64(seed)
}
