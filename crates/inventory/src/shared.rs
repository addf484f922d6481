//! Thread-safe wrapper around [`PlayerInventory`].
//!
//! Operations run under the inventory lock. Their events are appended to a
//! per-handle queue before that lock is released, so the queue holds events in
//! mutation order. One caller at a time drains the queue into the downstream
//! sink without holding the inventory lock. A sink may block or call back into
//! [`SharedInventory::with`]; nested calls only enqueue and their events are
//! delivered by the running dispatcher after the current one.
//!
//! Because delivery is done by whichever caller is dispatching, `with` can
//! return before its own events have reached the sink. A sink must not call
//! [`SharedInventory::with_sink`] on its own handle.

use crate::events::{InventoryEvent, InventorySink};
use crate::player::PlayerInventory;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

#[derive(Debug, Default)]
struct DispatchState {
    queue: VecDeque<InventoryEvent>,
    dispatching: bool,
}

/// Releases the dispatcher role if a sink panics mid-delivery.
struct DispatchGuard<'a> {
    state: &'a Mutex<DispatchState>,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.dispatching = false;
        }
    }
}

/// Cloneable handle to one participant's inventory.
#[derive(Debug)]
pub struct SharedInventory<S: InventorySink> {
    inner: Arc<Mutex<PlayerInventory<Vec<InventoryEvent>>>>,
    dispatch: Arc<Mutex<DispatchState>>,
    sink: Arc<Mutex<S>>,
}

impl<S: InventorySink> Clone for SharedInventory<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatch: Arc::clone(&self.dispatch),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<S: InventorySink> SharedInventory<S> {
    /// Wrap `inventory`. Events already buffered in it are discarded.
    pub fn new(mut inventory: PlayerInventory<Vec<InventoryEvent>>, sink: S) -> Self {
        inventory.sink_mut().clear();
        Self {
            inner: Arc::new(Mutex::new(inventory)),
            dispatch: Arc::new(Mutex::new(DispatchState::default())),
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    /// Run `op` with exclusive access, then deliver whatever it emitted.
    pub fn with<T>(&self, op: impl FnOnce(&mut PlayerInventory<Vec<InventoryEvent>>) -> T) -> T {
        let (result, claimed) = {
            let mut inventory = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            let result = op(&mut inventory);
            let events = std::mem::take(inventory.sink_mut());
            // Lock order: inventory, then dispatch state.
            let mut state = self.dispatch.lock().unwrap_or_else(PoisonError::into_inner);
            state.queue.extend(events);
            let claimed = !state.dispatching && !state.queue.is_empty();
            if claimed {
                state.dispatching = true;
            }
            (result, claimed)
        };
        if claimed {
            self.drain();
        }
        result
    }

    /// Deliver queued events until the queue stays empty.
    fn drain(&self) {
        let _guard = DispatchGuard {
            state: &self.dispatch,
        };
        loop {
            let batch = {
                let mut state = self.dispatch.lock().unwrap_or_else(PoisonError::into_inner);
                if state.queue.is_empty() {
                    state.dispatching = false;
                    return;
                }
                std::mem::take(&mut state.queue)
            };
            trace!(count = batch.len(), "dispatching inventory events");
            let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
            for event in batch {
                sink.notify(event);
            }
        }
    }

    /// Read-only access under the lock.
    pub fn read<T>(&self, op: impl FnOnce(&PlayerInventory<Vec<InventoryEvent>>) -> T) -> T {
        let inventory = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        op(&inventory)
    }

    /// Run `op` against the downstream sink.
    pub fn with_sink<T>(&self, op: impl FnOnce(&mut S) -> T) -> T {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        op(&mut sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invkeep_core::ItemStack;
    use std::sync::{mpsc, OnceLock};
    use std::thread;
    use std::time::Duration;

    type BoxedShared = SharedInventory<Box<dyn InventorySink + Send>>;

    /// Records every event and writes slot 10 the first time slot 9 changes.
    struct CallbackSink {
        handle: Arc<OnceLock<BoxedShared>>,
        seen: Arc<Mutex<Vec<InventoryEvent>>>,
    }

    impl InventorySink for CallbackSink {
        fn notify(&mut self, event: InventoryEvent) {
            let trigger = matches!(event, InventoryEvent::SlotChanged { slot: 9, .. });
            self.seen.lock().unwrap().push(event);
            if trigger {
                if let Some(shared) = self.handle.get() {
                    shared.with(|inv| inv.set_slot(10, Some(ItemStack::new(2, 1))));
                }
            }
        }
    }

    #[test]
    fn events_reach_downstream_sink() {
        let shared = SharedInventory::new(PlayerInventory::new(Vec::new()), Vec::new());
        shared.with(|inv| inv.set_slot(9, Some(ItemStack::new(1, 1))));
        assert_eq!(shared.with_sink(|sink| sink.len()), 1);
        assert!(shared.read(|inv| inv.sink().is_empty()));
    }

    #[test]
    fn sink_may_mutate_inventory_while_notified() {
        let handle = Arc::new(OnceLock::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink: Box<dyn InventorySink + Send> = Box::new(CallbackSink {
            handle: Arc::clone(&handle),
            seen: Arc::clone(&seen),
        });
        let shared: BoxedShared = SharedInventory::new(PlayerInventory::new(Vec::new()), sink);
        assert!(handle.set(shared.clone()).is_ok());

        let (done_tx, done_rx) = mpsc::channel();
        thread::spawn(move || {
            shared.with(|inv| inv.set_slot(9, Some(ItemStack::new(1, 1))));
            let kinds = shared.read(|inv| (inv.get(9).kind, inv.get(10).kind));
            let _ = done_tx.send(kinds);
        });

        let kinds = done_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("nested call from the sink must not block");
        assert_eq!(kinds, (1, 2));

        let slots: Vec<usize> = seen
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                InventoryEvent::SlotChanged { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec![9, 10]);
    }

    #[test]
    fn concurrent_writes_reach_sink_in_mutation_order() {
        let shared = SharedInventory::new(PlayerInventory::new(Vec::new()), Vec::new());
        let handles: Vec<_> = (0..4u8)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for round in 1..=32u8 {
                        let stack = ItemStack::new(i16::from(worker) + 1, round);
                        shared.with(|inv| inv.set_slot(9, Some(stack)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }

        let last = shared.with_sink(|sink| match sink.last() {
            Some(InventoryEvent::SlotChanged { stack, .. }) => stack.clone(),
            other => panic!("unexpected final event {other:?}"),
        });
        let current = shared.read(|inv| inv.get(9).clone());
        assert_eq!(last, current);
        assert_eq!(shared.with_sink(|sink| sink.len()), 128);
    }

    #[test]
    fn concurrent_gives_conserve_units() {
        let shared = SharedInventory::new(PlayerInventory::new(Vec::new()), Vec::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..16 {
                        shared.with(|inv| inv.give(&mut ItemStack::new(4, 1), true));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }
        let total = shared.read(|inv| inv.slots().count_matching(&ItemStack::new(4, 1), false));
        assert_eq!(total, 64);
        assert_eq!(shared.with_sink(|sink| sink.len()), 64);
    }
}
