//! Resolution of externally supplied `(slot, container id)` pairs.
//!
//! Requests come straight off the wire, so nothing here fails: any pair that
//! does not name a real slot resolves to AIR.

use crate::config::WindowIds;
use crate::container::SlotContainer;
use crate::equipment::{ArmorSet, ArmorSlot, CursorInventory};
use crate::participant::{Capability, ExternalContainer};
use invkeep_core::ItemStack;
use tracing::trace;

/// Backing store a container id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerTarget {
    /// Hotbar + main inventory.
    Main,
    /// Off-hand slot.
    OffHand,
    /// Armor slots.
    Armor,
    /// Reserved id with no backing store.
    Reserved,
    /// Cursor inventory.
    Cursor,
    /// Whatever foreign container the participant has open.
    External(u8),
}

impl ContainerTarget {
    /// Classify a container id.
    pub fn from_id(id: u8, ids: &WindowIds) -> Self {
        match id {
            id if id == ids.main => ContainerTarget::Main,
            id if id == ids.off_hand => ContainerTarget::OffHand,
            id if id == ids.armor => ContainerTarget::Armor,
            id if id == ids.reserved => ContainerTarget::Reserved,
            id if id == ids.cursor => ContainerTarget::Cursor,
            other => ContainerTarget::External(other),
        }
    }
}

/// Borrowed view over every store a participant can address.
#[derive(Debug, Clone, Copy)]
pub struct SlotRouter<'a> {
    /// Hotbar + main inventory.
    pub slots: &'a SlotContainer,
    /// Off-hand slot.
    pub off_hand: &'a ItemStack,
    /// Worn armor.
    pub armor: &'a ArmorSet,
    /// Cursor inventory.
    pub cursor: &'a CursorInventory,
    /// Routing ids.
    pub ids: WindowIds,
}

impl SlotRouter<'_> {
    /// Look up the stack at `slot` in the container named by `container_id`.
    ///
    /// Returns a copy; unresolvable pairs yield AIR.
    pub fn resolve(
        &self,
        slot: usize,
        container_id: u8,
        open: Option<&dyn ExternalContainer>,
    ) -> ItemStack {
        let target = ContainerTarget::from_id(container_id, &self.ids);
        let found = match target {
            ContainerTarget::Main => self.slots.try_get(slot),
            ContainerTarget::OffHand => Some(self.off_hand),
            ContainerTarget::Armor => ArmorSlot::from_index(slot).map(|s| self.armor.get(s)),
            ContainerTarget::Reserved => None,
            ContainerTarget::Cursor => self.cursor.get(slot),
            ContainerTarget::External(_) => match open {
                Some(container) if container.capability() == Capability::Indexed => {
                    container.slot(slot)
                }
                _ => None,
            },
        };

        match found {
            Some(stack) => stack.clone(),
            None => {
                trace!(slot, container_id, ?target, "slot did not resolve; using air");
                ItemStack::air()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::StorageContainer;

    struct Counter;

    impl ExternalContainer for Counter {
        fn capability(&self) -> Capability {
            Capability::Opaque
        }

        fn slot(&self, _index: usize) -> Option<&ItemStack> {
            panic!("opaque containers must not be indexed");
        }
    }

    struct Fixture {
        slots: SlotContainer,
        off_hand: ItemStack,
        armor: ArmorSet,
        cursor: CursorInventory,
    }

    impl Fixture {
        fn new() -> Self {
            let mut slots = SlotContainer::new();
            slots.set(3, Some(ItemStack::new(50, 2)));
            let mut armor = ArmorSet::new();
            armor.equip(ArmorSlot::Helmet, ItemStack::damageable(298, 55));
            armor.equip(ArmorSlot::Leggings, ItemStack::damageable(300, 75));
            let mut cursor = CursorInventory::new(4);
            cursor.set(0, ItemStack::new(60, 9));
            Self {
                slots,
                off_hand: ItemStack::new(262, 16),
                armor,
                cursor,
            }
        }

        fn router(&self) -> SlotRouter<'_> {
            SlotRouter {
                slots: &self.slots,
                off_hand: &self.off_hand,
                armor: &self.armor,
                cursor: &self.cursor,
                ids: WindowIds::default(),
            }
        }
    }

    #[test]
    fn classify_ids() {
        let ids = WindowIds::default();
        assert_eq!(ContainerTarget::from_id(0, &ids), ContainerTarget::Main);
        assert_eq!(ContainerTarget::from_id(119, &ids), ContainerTarget::OffHand);
        assert_eq!(ContainerTarget::from_id(120, &ids), ContainerTarget::Armor);
        assert_eq!(ContainerTarget::from_id(121, &ids), ContainerTarget::Reserved);
        assert_eq!(ContainerTarget::from_id(124, &ids), ContainerTarget::Cursor);
        assert_eq!(ContainerTarget::from_id(2, &ids), ContainerTarget::External(2));
    }

    #[test]
    fn fixed_containers() {
        let f = Fixture::new();
        let router = f.router();
        assert_eq!(router.resolve(3, 0, None).kind, 50);
        assert_eq!(router.resolve(77, 119, None).kind, 262);
        assert_eq!(router.resolve(0, 120, None).kind, 298);
        assert_eq!(router.resolve(2, 120, None).kind, 300);
        assert!(router.resolve(1, 120, None).is_air());
        assert!(router.resolve(4, 120, None).is_air());
        assert!(router.resolve(0, 121, None).is_air());
        assert_eq!(router.resolve(0, 124, None).kind, 60);
    }

    #[test]
    fn out_of_range_degrades_to_air() {
        let f = Fixture::new();
        let router = f.router();
        assert!(router.resolve(45, 0, None).is_air());
        assert!(router.resolve(4, 124, None).is_air());
    }

    #[test]
    fn external_containers() {
        let f = Fixture::new();
        let router = f.router();
        assert!(router.resolve(0, 7, None).is_air());

        let mut saddlebags = StorageContainer::new(15);
        saddlebags.set(1, ItemStack::new(329, 1));
        assert_eq!(router.resolve(1, 7, Some(&saddlebags)).kind, 329);
        assert!(router.resolve(15, 7, Some(&saddlebags)).is_air());

        assert!(router.resolve(1, 7, Some(&Counter)).is_air());
    }
}
