#![warn(missing_docs)]
//! Deterministic testing surfaces: event logs, a scripted participant and
//! seeded randomness.

use anyhow::Result;
use invkeep_core::{ItemStack, SimTick};
use invkeep_inventory::{
    ExternalContainer, GameMode, InventoryEvent, Participant, Position, StorageContainer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Primary event record captured by headless runs.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Short kind label.
    pub kind: &'a str,
    /// The event itself.
    pub payload: &'a InventoryEvent,
}

impl<'a> EventRecord<'a> {
    /// Record `event` at `tick`, labelled by its kind.
    pub fn new(tick: SimTick, event: &'a InventoryEvent) -> Self {
        Self {
            tick,
            kind: event.label(),
            payload: event,
        }
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
    written: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self { file, written: 0 })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Append every event in `events` at `tick`.
    pub fn write_all(&mut self, tick: SimTick, events: &[InventoryEvent]) -> Result<()> {
        for event in events {
            self.write(&EventRecord::new(tick, event))?;
        }
        Ok(())
    }

    /// Records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered output.
    pub fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }
}

/// Participant double driven entirely by the test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedParticipant {
    /// Current play mode.
    pub mode: GameMode,
    /// Effect anchor.
    pub position: Position,
    /// Foreign container currently open.
    pub open: Option<StorageContainer>,
}

impl ScriptedParticipant {
    /// Survival participant at the origin with nothing open.
    pub fn survival() -> Self {
        Self::default()
    }

    /// Participant in `mode` at the origin.
    pub fn in_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Open an all-AIR storage container of `size` slots, replacing any
    /// container already open.
    pub fn open_storage(&mut self, size: usize) -> &mut StorageContainer {
        debug!(size, "opening storage container");
        self.open.insert(StorageContainer::new(size))
    }

    /// Put `stack` into the open container. Returns false when nothing is
    /// open or the slot does not exist.
    pub fn stock(&mut self, slot: usize, stack: ItemStack) -> bool {
        self.open
            .as_mut()
            .is_some_and(|container| container.set(slot, stack))
    }

    /// Close whatever container is open.
    pub fn close(&mut self) {
        self.open = None;
    }
}

impl Participant for ScriptedParticipant {
    fn game_mode(&self) -> GameMode {
        self.mode
    }

    fn position(&self) -> Position {
        self.position
    }

    fn open_container(&self) -> Option<&dyn ExternalContainer> {
        self.open
            .as_ref()
            .map(|container| container as &dyn ExternalContainer)
    }
}

/// Deterministic RNG for a test.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
