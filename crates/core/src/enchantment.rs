//! Enchantment identifiers as read from an item's extra data.

use serde::{Deserialize, Serialize};

/// Enchantments the inventory core knows how to read.
///
/// Each variant carries the numeric id used on the wire, so extra data
/// decoded by the transport layer can be mapped back with [`EnchantmentType::from_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnchantmentType {
    // Armor enchantments
    /// Reduces damage from all sources
    Protection,
    /// Reduces fire damage
    FireProtection,
    /// Reduces fall damage (boots)
    FeatherFalling,
    /// Reduces explosion damage
    BlastProtection,
    /// Reduces projectile damage
    ProjectileProtection,
    /// Damages attackers
    Thorns,
    /// Extends underwater breathing (helmet)
    Respiration,

    // Weapon enchantments
    /// Increases attack damage
    Sharpness,
    /// Increases knockback
    Knockback,
    /// Sets targets on fire
    FireAspect,

    // Tool enchantments
    /// Increases mining speed
    Efficiency,
    /// Allows silk touch harvesting of blocks
    SilkTouch,
    /// Increases block drop amounts
    Fortune,

    // Universal enchantments
    /// Reduces durability loss
    Unbreaking,
    /// Repairs item using XP
    Mending,
}

impl EnchantmentType {
    /// Every known enchantment, in id order.
    pub const ALL: [EnchantmentType; 15] = [
        EnchantmentType::Protection,
        EnchantmentType::FireProtection,
        EnchantmentType::FeatherFalling,
        EnchantmentType::BlastProtection,
        EnchantmentType::ProjectileProtection,
        EnchantmentType::Thorns,
        EnchantmentType::Respiration,
        EnchantmentType::Sharpness,
        EnchantmentType::Knockback,
        EnchantmentType::FireAspect,
        EnchantmentType::Efficiency,
        EnchantmentType::SilkTouch,
        EnchantmentType::Unbreaking,
        EnchantmentType::Fortune,
        EnchantmentType::Mending,
    ];

    /// Numeric protocol id.
    pub fn id(self) -> u16 {
        match self {
            EnchantmentType::Protection => 0,
            EnchantmentType::FireProtection => 1,
            EnchantmentType::FeatherFalling => 2,
            EnchantmentType::BlastProtection => 3,
            EnchantmentType::ProjectileProtection => 4,
            EnchantmentType::Thorns => 5,
            EnchantmentType::Respiration => 6,
            EnchantmentType::Sharpness => 9,
            EnchantmentType::Knockback => 12,
            EnchantmentType::FireAspect => 13,
            EnchantmentType::Efficiency => 15,
            EnchantmentType::SilkTouch => 16,
            EnchantmentType::Unbreaking => 17,
            EnchantmentType::Fortune => 18,
            EnchantmentType::Mending => 26,
        }
    }

    /// Map a protocol id back to a known enchantment.
    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.id() == id)
    }

    /// Get the maximum level for this enchantment
    pub fn max_level(self) -> u8 {
        match self {
            EnchantmentType::Protection
            | EnchantmentType::FireProtection
            | EnchantmentType::FeatherFalling
            | EnchantmentType::BlastProtection
            | EnchantmentType::ProjectileProtection => 4,
            EnchantmentType::Thorns | EnchantmentType::Respiration => 3,
            EnchantmentType::Sharpness | EnchantmentType::Efficiency => 5,
            EnchantmentType::Knockback | EnchantmentType::FireAspect => 2,
            EnchantmentType::SilkTouch | EnchantmentType::Mending => 1,
            EnchantmentType::Fortune | EnchantmentType::Unbreaking => 3,
        }
    }
}

/// An enchantment with a specific level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enchantment {
    /// The type of enchantment
    pub enchantment_type: EnchantmentType,
    /// The level of the enchantment (1 to max_level)
    pub level: u8,
}

impl Enchantment {
    /// Create a new enchantment, clamping the level to the type's maximum.
    pub fn new(enchantment_type: EnchantmentType, level: u8) -> Self {
        Self {
            enchantment_type,
            level: level.min(enchantment_type.max_level()),
        }
    }

    /// Decode a `(id, level)` pair. Unknown ids yield `None`.
    pub fn from_raw(id: u16, level: u8) -> Option<Self> {
        EnchantmentType::from_id(id).map(|ty| Self::new(ty, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for ty in EnchantmentType::ALL {
            assert_eq!(EnchantmentType::from_id(ty.id()), Some(ty));
        }
        assert_eq!(EnchantmentType::from_id(17), Some(EnchantmentType::Unbreaking));
        assert_eq!(EnchantmentType::from_id(999), None);
    }

    #[test]
    fn test_enchantment_level_clamping() {
        let ench = Enchantment::new(EnchantmentType::SilkTouch, 10);
        assert_eq!(ench.level, 1);

        let ench = Enchantment::new(EnchantmentType::Unbreaking, 2);
        assert_eq!(ench.level, 2);
    }

    #[test]
    fn unknown_raw_enchantment_is_dropped() {
        assert!(Enchantment::from_raw(250, 1).is_none());
        assert_eq!(
            Enchantment::from_raw(17, 9),
            Some(Enchantment::new(EnchantmentType::Unbreaking, 3))
        );
    }
}
