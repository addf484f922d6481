//! Item stacks - the unit stored in every inventory slot

use crate::enchantment::{Enchantment, EnchantmentType};
use serde::{Deserialize, Serialize};

/// Item kind identifier as assigned by the item catalog.
pub type KindId = i16;

/// Kind id of the empty slot occupant.
pub const AIR_KIND: KindId = 0;

/// Legacy kind id that also denotes "no item".
pub const AIR_SENTINEL: KindId = -1;

/// Maximum stack size for most items.
pub const DEFAULT_STACK_SIZE: u8 = 64;

/// Returns true if `kind` is one of the ids reserved for the empty slot.
pub fn is_air_kind(kind: KindId) -> bool {
    kind == AIR_KIND || kind == AIR_SENTINEL
}

/// Catalog facts about an item kind, stamped onto each stack by whoever
/// created it. The inventory core never changes these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemProperties {
    /// Largest count a single slot may hold.
    pub max_stack_size: u8,
    /// Wear at which the item breaks; 0 means the kind takes no wear.
    pub durability: u32,
}

impl ItemProperties {
    /// Properties of an ordinary stackable item.
    pub const fn stackable(max_stack_size: u8) -> Self {
        Self {
            max_stack_size,
            durability: 0,
        }
    }

    /// Properties of a tool or armor piece: unstackable, with durability.
    pub const fn damageable(durability: u32) -> Self {
        Self {
            max_stack_size: 1,
            durability,
        }
    }

    /// Whether stacks of this kind take wear.
    pub fn is_damageable(&self) -> bool {
        self.durability > 0
    }
}

impl Default for ItemProperties {
    fn default() -> Self {
        Self::stackable(DEFAULT_STACK_SIZE)
    }
}

/// Opaque per-stack data (enchantments, naming, raw tag bytes).
///
/// Copied verbatim whenever a stack is split or merged. Only the
/// enchantment list is ever interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraData {
    /// Enchantments applied to this stack.
    #[serde(default)]
    pub enchantments: Vec<Enchantment>,
    /// Custom display name.
    #[serde(default)]
    pub custom_name: Option<String>,
    /// Undecoded tag payload carried for the transport layer.
    #[serde(default)]
    pub tag: Option<Vec<u8>>,
}

impl ExtraData {
    /// True when there is nothing worth carrying.
    pub fn is_empty(&self) -> bool {
        self.enchantments.is_empty() && self.custom_name.is_none() && self.tag.is_none()
    }
}

/// An item stack in an inventory slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Kind of item
    pub kind: KindId,
    /// Quantity in stack
    pub count: u8,
    /// Accumulated wear (0 for fresh or non-damageable items)
    pub wear: u32,
    /// Enchantments and other extra data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<ExtraData>,
    properties: ItemProperties,
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::air()
    }
}

impl ItemStack {
    /// The empty slot occupant.
    pub fn air() -> Self {
        Self {
            kind: AIR_KIND,
            count: 0,
            wear: 0,
            extra: None,
            properties: ItemProperties::default(),
        }
    }

    /// Create a new stack with default stackable properties.
    pub fn new(kind: KindId, count: u8) -> Self {
        Self::with_properties(kind, count, ItemProperties::default())
    }

    /// Create a new stack with explicit catalog properties.
    pub fn with_properties(kind: KindId, count: u8, properties: ItemProperties) -> Self {
        Self {
            kind,
            count,
            wear: 0,
            extra: None,
            properties,
        }
    }

    /// Create a single unworn damageable item (tool or armor).
    pub fn damageable(kind: KindId, durability: u32) -> Self {
        Self::with_properties(kind, 1, ItemProperties::damageable(durability))
    }

    /// Builder: replace the count.
    pub fn with_count(mut self, count: u8) -> Self {
        self.count = count;
        self
    }

    /// Builder: attach extra data.
    pub fn with_extra(mut self, extra: ExtraData) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Builder: attach an enchantment, ignoring the enchantable check.
    pub fn with_enchantment(mut self, enchantment: Enchantment) -> Self {
        self.extra
            .get_or_insert_with(ExtraData::default)
            .enchantments
            .push(enchantment);
        self
    }

    /// Catalog properties this stack was created with.
    pub fn properties(&self) -> ItemProperties {
        self.properties
    }

    /// Maximum stack size for this item kind
    pub fn max_stack_size(&self) -> u8 {
        self.properties.max_stack_size
    }

    /// Wear at which this item breaks (0 for non-damageable kinds).
    pub fn durability(&self) -> u32 {
        self.properties.durability
    }

    /// Whether this stack takes wear.
    pub fn is_damageable(&self) -> bool {
        self.properties.is_damageable()
    }

    /// A stack is AIR when its kind is reserved or its count reached zero.
    pub fn is_air(&self) -> bool {
        is_air_kind(self.kind) || self.count == 0
    }

    /// Extra data, treating an empty payload the same as none.
    pub fn extra_data(&self) -> Option<&ExtraData> {
        self.extra.as_ref().filter(|extra| !extra.is_empty())
    }

    /// Check whether two stacks may share a slot, ignoring count and wear.
    ///
    /// With `match_extra` set, extra data must also be identical.
    pub fn stacks_with(&self, other: &ItemStack, match_extra: bool) -> bool {
        if self.is_air() || other.is_air() || self.kind != other.kind {
            return false;
        }
        !match_extra || self.extra_data() == other.extra_data()
    }

    /// Check if this stack is at max capacity.
    pub fn is_full(&self) -> bool {
        self.count >= self.max_stack_size()
    }

    /// Get remaining space in this stack.
    pub fn remaining_space(&self) -> u8 {
        self.max_stack_size().saturating_sub(self.count)
    }

    /// Try to add items to this stack, returning the amount that didn't fit.
    pub fn add(&mut self, amount: u8) -> u8 {
        let added = amount.min(self.remaining_space());
        self.count += added;
        amount - added
    }

    /// Try to remove items from this stack, returning the amount actually removed.
    pub fn remove(&mut self, amount: u8) -> u8 {
        let removed = amount.min(self.count);
        self.count -= removed;
        removed
    }

    /// Split this stack, taking the specified amount into a new stack.
    pub fn split(&mut self, amount: u8) -> Option<ItemStack> {
        if amount == 0 || amount > self.count {
            return None;
        }

        self.count -= amount;
        Some(self.clone().with_count(amount))
    }

    /// Add wear, returning true once the item is used up.
    ///
    /// Non-damageable stacks are left alone and never report destruction.
    pub fn reduce_durability(&mut self, amount: u32) -> bool {
        if !self.is_damageable() {
            return false;
        }
        self.wear = self.wear.saturating_add(amount);
        self.wear >= self.durability()
    }

    /// Wear left before the item breaks.
    pub fn remaining_durability(&self) -> u32 {
        self.durability().saturating_sub(self.wear)
    }

    /// Check if this item can be enchanted
    pub fn is_enchantable(&self) -> bool {
        !self.is_air() && self.is_damageable()
    }

    /// Add an enchantment, upgrading an existing one of the same type.
    /// Returns false if the item cannot carry enchantments.
    pub fn add_enchantment(&mut self, enchantment: Enchantment) -> bool {
        if !self.is_enchantable() {
            return false;
        }

        let enchants = &mut self
            .extra
            .get_or_insert_with(ExtraData::default)
            .enchantments;
        match enchants
            .iter_mut()
            .find(|e| e.enchantment_type == enchantment.enchantment_type)
        {
            Some(existing) => existing.level = existing.level.max(enchantment.level),
            None => enchants.push(enchantment),
        }
        true
    }

    /// Get all enchantments on this item
    pub fn enchantments(&self) -> &[Enchantment] {
        self.extra
            .as_ref()
            .map(|extra| extra.enchantments.as_slice())
            .unwrap_or(&[])
    }

    /// Get the level of a specific enchantment, or 0 if not present
    pub fn enchantment_level(&self, enchant_type: EnchantmentType) -> u8 {
        self.enchantments()
            .iter()
            .filter(|e| e.enchantment_type == enchant_type)
            .map(|e| e.level)
            .max()
            .unwrap_or(0)
    }
}
