//! The participant-facing inventory.
//!
//! Every mutating call changes state first and then reports the change to
//! the sink before returning, so a sink always observes the post-mutation
//! state.

use crate::config::{InventoryConfig, WindowIds};
use crate::container::{Placement, Removal, SlotContainer, HOTBAR_SIZE};
use crate::equipment::{ArmorSet, ArmorSlot, CursorInventory};
use crate::events::{Audience, InventoryEvent, InventorySink};
use crate::participant::Participant;
use crate::router::SlotRouter;
use invkeep_core::{ItemStack, KindId};
use tracing::debug;

/// Everything a single participant carries, plus the sink its changes are
/// reported to.
///
/// Owned and mutated by one participant at a time. Use
/// [`SharedInventory`](crate::SharedInventory) when more than one thread
/// needs access.
#[derive(Debug)]
pub struct PlayerInventory<S: InventorySink> {
    pub(crate) slots: SlotContainer,
    pub(crate) held_index: u8,
    pub(crate) off_hand: ItemStack,
    pub(crate) cursor: CursorInventory,
    pub(crate) armor: ArmorSet,
    ids: WindowIds,
    pub(crate) sink: S,
}

impl<S: InventorySink> PlayerInventory<S> {
    /// Create an empty inventory with default configuration.
    pub fn new(sink: S) -> Self {
        Self::with_config(&InventoryConfig::default(), sink)
    }

    /// Create an empty inventory.
    pub fn with_config(config: &InventoryConfig, sink: S) -> Self {
        Self {
            slots: SlotContainer::new(),
            held_index: 0,
            off_hand: ItemStack::air(),
            cursor: CursorInventory::new(config.cursor_slots),
            armor: ArmorSet::new(),
            ids: config.window_ids,
            sink,
        }
    }

    /// Hotbar + main inventory.
    pub fn slots(&self) -> &SlotContainer {
        &self.slots
    }

    /// Stack in a main-container slot. Panics when out of range.
    #[track_caller]
    pub fn get(&self, slot: usize) -> &ItemStack {
        self.slots.get(slot)
    }

    /// Selected hotbar index (0..HOTBAR_SIZE).
    pub fn held_index(&self) -> u8 {
        self.held_index
    }

    /// The stack in the selected hotbar slot.
    pub fn held_item(&self) -> &ItemStack {
        self.slots.get(self.held_index as usize)
    }

    /// Off-hand stack.
    pub fn off_hand(&self) -> &ItemStack {
        &self.off_hand
    }

    /// Worn armor.
    pub fn armor(&self) -> &ArmorSet {
        &self.armor
    }

    /// Worn armor in helmet -> boots order.
    pub fn armor_stacks(&self) -> [ItemStack; 4] {
        self.armor.to_array()
    }

    /// Cursor inventory.
    pub fn cursor(&self) -> &CursorInventory {
        &self.cursor
    }

    /// The main region (everything but the hotbar).
    pub fn main_region(&self) -> &[ItemStack] {
        self.slots.main_region()
    }

    /// Routing ids in use.
    pub fn window_ids(&self) -> WindowIds {
        self.ids
    }

    /// The notification sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the notification sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the inventory, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Borrowed router over every addressable store.
    pub fn router(&self) -> SlotRouter<'_> {
        SlotRouter {
            slots: &self.slots,
            off_hand: &self.off_hand,
            armor: &self.armor,
            cursor: &self.cursor,
            ids: self.ids,
        }
    }

    /// Resolve a client-supplied `(slot, container id)` pair. Never fails;
    /// unresolvable pairs yield AIR.
    pub fn resolve_slot<P: Participant + ?Sized>(
        &self,
        slot: usize,
        container_id: u8,
        participant: &P,
    ) -> ItemStack {
        self.router()
            .resolve(slot, container_id, participant.open_container())
    }

    /// Replace a main-container slot. `None` or an empty stack clears it.
    #[track_caller]
    pub fn set_slot(&mut self, slot: usize, stack: Option<ItemStack>) {
        self.slots.set(slot, stack);
        self.notify_slot(slot);
    }

    /// Take up to `amount` units from a slot, clearing it at zero.
    #[track_caller]
    pub fn decrease_slot(&mut self, slot: usize, amount: u8) {
        let removed = self.slots.decrease(slot, amount);
        debug!(slot, amount, removed, "decreased slot");
        self.notify_slot(slot);
    }

    /// Empty a slot.
    #[track_caller]
    pub fn clear_slot(&mut self, slot: usize) {
        self.set_slot(slot, None);
    }

    /// Select a hotbar slot.
    ///
    /// Observers always hear about the new held item; the owner only when
    /// `notify_owner` is set (it usually initiated the change).
    #[track_caller]
    pub fn set_held_hotbar_index(&mut self, index: u8, notify_owner: bool) {
        assert!(
            (index as usize) < HOTBAR_SIZE,
            "hotbar index {index} out of range ({HOTBAR_SIZE} slots)"
        );
        self.held_index = index;
        let audience = if notify_owner {
            Audience::Everyone
        } else {
            Audience::ObserversOnly
        };
        self.notify_equipment(audience);
    }

    /// Empty every slot, the off-hand, the cursor and all armor, then send a
    /// single whole-inventory notification.
    pub fn clear_all(&mut self) {
        let cleared = self.slots.clear_all();
        if !self.off_hand.is_air() {
            self.off_hand = ItemStack::air();
        }
        self.cursor.clear();
        for slot in ArmorSlot::ALL {
            if !self.armor.get(slot).is_air() {
                self.armor.unequip(slot);
            }
        }
        debug!(slots = cleared.len(), "cleared inventory");
        self.sink.notify(InventoryEvent::FullInventoryChanged);
    }

    /// Stack `stack` into the main region, merging first. On return
    /// `stack.count` holds what did not fit. Returns true when all of it was
    /// placed.
    pub fn give(&mut self, stack: &mut ItemStack, notify: bool) -> bool {
        let placement = self.slots.merge_or_place(stack);
        self.finish_placement(placement, notify)
    }

    /// Drop `stack` into the first empty main-region slot without merging.
    pub fn grant(&mut self, stack: ItemStack, notify: bool) -> bool {
        let placement = self.slots.place_in_first_empty(stack);
        self.finish_placement(placement, notify)
    }

    fn finish_placement(&mut self, placement: Placement, notify: bool) -> bool {
        if notify {
            self.notify_slots(&placement.touched);
        }
        placement.placed
    }

    /// Remove `template.count` units matching `template` from the main region.
    pub fn remove_items(&mut self, template: &ItemStack, match_extra: bool, notify: bool) -> u32 {
        self.remove_matching(template, match_extra, u32::from(template.count), notify)
    }

    /// Remove up to `count` units matching `template` from the main region.
    pub fn remove_matching(
        &mut self,
        template: &ItemStack,
        match_extra: bool,
        count: u32,
        notify: bool,
    ) -> u32 {
        let removal = self.slots.remove_matching(template, match_extra, count);
        self.finish_removal(removal, notify)
    }

    /// Remove up to `count` units of `kind` from the main region.
    pub fn remove_kind(&mut self, kind: KindId, count: u32) -> u32 {
        let removal = self.slots.remove_by_kind(kind, count);
        self.finish_removal(removal, true)
    }

    fn finish_removal(&mut self, removal: Removal, notify: bool) -> u32 {
        if notify {
            self.notify_slots(&removal.touched);
        }
        removal.removed
    }

    /// Look for `template` in the main region.
    ///
    /// Without `count_search` any matching slot is enough; with it the
    /// matching stock must cover `template.count`.
    pub fn has_item(&self, template: &ItemStack, count_search: bool, match_extra: bool) -> bool {
        if count_search {
            self.contains_at_least(template, match_extra, u32::from(template.count))
        } else {
            self.slots.contains_any(template, match_extra)
        }
    }

    /// True if a single slot, or the main region as a whole, holds `required`
    /// matching units.
    pub fn contains_at_least(
        &self,
        template: &ItemStack,
        match_extra: bool,
        required: u32,
    ) -> bool {
        self.slots.contains_at_least(template, match_extra, required)
    }

    /// Wear `stack` in `slot`, returning what was worn before.
    pub fn equip_armor(&mut self, slot: ArmorSlot, stack: ItemStack) -> ItemStack {
        let previous = self.armor.equip(slot, stack);
        self.notify_equipment(Audience::Everyone);
        previous
    }

    /// Replace the off-hand stack, returning the previous one.
    pub fn set_off_hand(&mut self, stack: ItemStack) -> ItemStack {
        let stack = if stack.is_air() { ItemStack::air() } else { stack };
        let previous = std::mem::replace(&mut self.off_hand, stack);
        self.notify_equipment(Audience::Everyone);
        previous
    }

    /// Replace a cursor-inventory slot. Out-of-range slots are ignored and
    /// report false.
    pub fn set_cursor_slot(&mut self, slot: usize, stack: ItemStack) -> bool {
        if !self.cursor.set(slot, stack) {
            return false;
        }
        let stack = self.cursor.get(slot).cloned().unwrap_or_default();
        self.sink.notify(InventoryEvent::CursorChanged { slot, stack });
        true
    }

    pub(crate) fn notify_slot(&mut self, slot: usize) {
        let stack = self.slots.get(slot).clone();
        self.sink.notify(InventoryEvent::SlotChanged { slot, stack });
    }

    fn notify_slots(&mut self, slots: &[usize]) {
        for &slot in slots {
            self.notify_slot(slot);
        }
    }

    pub(crate) fn notify_equipment(&mut self, audience: Audience) {
        let event = InventoryEvent::EquipmentChanged {
            held: self.held_item().clone(),
            hotbar_index: self.held_index,
            off_hand: self.off_hand.clone(),
            armor: self.armor.clone(),
            audience,
        };
        self.sink.notify(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::InventoryEvent::*;

    fn inventory() -> PlayerInventory<Vec<InventoryEvent>> {
        PlayerInventory::new(Vec::new())
    }

    #[test]
    fn set_slot_notifies_with_new_state() {
        let mut inv = inventory();
        inv.set_slot(12, Some(ItemStack::new(1, 5)));
        assert_eq!(
            inv.sink(),
            &vec![SlotChanged {
                slot: 12,
                stack: ItemStack::new(1, 5)
            }]
        );
    }

    #[test]
    fn decrease_below_zero_clears() {
        let mut inv = inventory();
        inv.set_slot(2, Some(ItemStack::new(1, 2)));
        inv.decrease_slot(2, 1);
        assert_eq!(inv.get(2).count, 1);
        inv.decrease_slot(2, 5);
        assert!(inv.get(2).is_air());
        assert_eq!(inv.sink().len(), 3);
        assert_eq!(
            inv.sink().last(),
            Some(&SlotChanged {
                slot: 2,
                stack: ItemStack::air()
            })
        );
    }

    #[test]
    fn clear_slot_sends_air() {
        let mut inv = inventory();
        inv.set_slot(40, Some(ItemStack::new(9, 9)));
        inv.clear_slot(40);
        assert!(inv.get(40).is_air());
        assert!(matches!(
            inv.sink().last(),
            Some(SlotChanged { slot: 40, stack }) if stack.is_air()
        ));
    }

    #[test]
    fn held_item_follows_hotbar_selection() {
        let mut inv = inventory();
        inv.set_slot(4, Some(ItemStack::damageable(278, 1561)));
        inv.set_held_hotbar_index(4, false);
        assert_eq!(inv.held_item().kind, 278);

        match inv.sink().last() {
            Some(EquipmentChanged {
                held,
                hotbar_index,
                audience,
                ..
            }) => {
                assert_eq!(held.kind, 278);
                assert_eq!(*hotbar_index, 4);
                assert_eq!(*audience, Audience::ObserversOnly);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "hotbar index")]
    fn hotbar_index_out_of_range_panics() {
        inventory().set_held_hotbar_index(9, true);
    }

    #[test]
    fn clear_all_sends_one_event() {
        let mut inv = inventory();
        for slot in 0..45 {
            inv.slots.set(slot, Some(ItemStack::new(3, 1)));
        }
        inv.off_hand = ItemStack::new(262, 3);
        inv.cursor.set(0, ItemStack::new(4, 4));
        inv.armor.equip(ArmorSlot::Chest, ItemStack::damageable(299, 80));

        inv.clear_all();

        assert!(inv.slots().iter().all(ItemStack::is_air));
        assert!(inv.off_hand().is_air());
        assert!(inv.cursor().held().is_air());
        assert!(inv.armor().is_empty());
        assert_eq!(inv.sink(), &vec![FullInventoryChanged]);
    }

    #[test]
    fn give_notifies_each_touched_slot() {
        let mut inv = inventory();
        inv.slots.set(20, Some(ItemStack::new(7, 60)));
        let mut incoming = ItemStack::new(7, 10);
        assert!(inv.give(&mut incoming, true));
        let slots: Vec<usize> = inv
            .sink()
            .iter()
            .filter_map(|e| match e {
                SlotChanged { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec![20, 9]);
    }

    #[test]
    fn silent_give_emits_nothing() {
        let mut inv = inventory();
        assert!(inv.grant(ItemStack::new(1, 1), false));
        assert!(inv.sink().is_empty());
        assert_eq!(inv.get(9).kind, 1);
    }

    #[test]
    fn has_item_modes() {
        let mut inv = inventory();
        inv.slots.set(9, Some(ItemStack::new(5, 3)));
        inv.slots.set(10, Some(ItemStack::new(5, 3)));
        assert!(inv.has_item(&ItemStack::new(5, 50), false, false));
        assert!(inv.has_item(&ItemStack::new(5, 6), true, false));
        assert!(!inv.has_item(&ItemStack::new(5, 7), true, false));
        assert!(!inv.has_item(&ItemStack::new(6, 1), false, false));
    }

    #[test]
    fn remove_items_uses_template_count() {
        let mut inv = inventory();
        inv.slots.set(9, Some(ItemStack::new(5, 3)));
        inv.slots.set(10, Some(ItemStack::new(5, 3)));
        assert_eq!(inv.remove_items(&ItemStack::new(5, 4), true, true), 4);
        assert!(inv.get(9).is_air());
        assert_eq!(inv.get(10).count, 2);
        assert_eq!(inv.sink().len(), 2);
    }

    #[test]
    fn cursor_updates() {
        let mut inv = inventory();
        assert!(inv.set_cursor_slot(0, ItemStack::new(2, 2)));
        assert!(!inv.set_cursor_slot(10_000, ItemStack::new(2, 2)));
        assert_eq!(inv.sink().len(), 1);
        assert_eq!(inv.sink()[0].label(), "cursor_changed");
    }

    #[test]
    fn equip_and_off_hand_report_equipment() {
        let mut inv = inventory();
        inv.equip_armor(ArmorSlot::Helmet, ItemStack::damageable(310, 363));
        let previous = inv.set_off_hand(ItemStack::new(442, 1));
        assert!(previous.is_air());
        assert_eq!(inv.sink().len(), 2);
        assert!(inv
            .sink()
            .iter()
            .all(|e| matches!(e, EquipmentChanged { audience: Audience::Everyone, .. })));
        assert_eq!(inv.armor_stacks()[0].kind, 310);
    }
}
