//! Headless inventory session driven by a command script.

use crate::command_script::CommandScript;
use crate::commands::{self, CommandOutput, InventoryCommand, WearableItem};
use anyhow::Result;
use invkeep_core::{scoped_rng, Enchantment, EnchantmentType, ItemProperties, ItemStack};
use invkeep_inventory::{
    DamageCause, DamageReason, InventoryConfig, InventoryEvent, PlayerInventory, WearOutcome,
};
use invkeep_testkit::{JsonlSink, ScriptedParticipant};
use rand::Rng;
use tracing::{debug, warn};

/// Participant id used to scope per-tick randomness.
const PARTICIPANT_ID: u64 = 1;

fn build_piece(item: WearableItem) -> ItemStack {
    let stack = ItemStack::damageable(item.kind, item.durability);
    if item.unbreaking == 0 {
        stack
    } else {
        stack.with_enchantment(Enchantment::new(EnchantmentType::Unbreaking, item.unbreaking))
    }
}

pub struct Session {
    inventory: PlayerInventory<Vec<InventoryEvent>>,
    participant: ScriptedParticipant,
    seed: u64,
}

impl Session {
    pub fn new(config: &InventoryConfig, seed: u64) -> Self {
        Self {
            inventory: PlayerInventory::with_config(config, Vec::new()),
            participant: ScriptedParticipant::survival(),
            seed,
        }
    }

    pub fn inventory(&self) -> &PlayerInventory<Vec<InventoryEvent>> {
        &self.inventory
    }

    /// Events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<InventoryEvent> {
        std::mem::take(self.inventory.sink_mut())
    }

    pub fn execute<R: Rng + ?Sized>(
        &mut self,
        cmd: InventoryCommand,
        rng: &mut R,
    ) -> CommandOutput {
        let inv = &mut self.inventory;
        match cmd {
            InventoryCommand::Help => CommandOutput {
                lines: commands::help_lines(),
            },
            InventoryCommand::Give {
                kind,
                count,
                max_stack,
            } => {
                let properties = ItemProperties::stackable(max_stack);
                let mut stack = ItemStack::with_properties(kind, count.min(max_stack), properties);
                let offered = stack.count;
                inv.give(&mut stack, true);
                let mut out = CommandOutput::default();
                let given = offered - stack.count;
                if given > 0 {
                    out.lines.push(format!("Gave {given}x {kind}"));
                }
                if stack.count > 0 {
                    out.lines
                        .push(format!("Inventory full; {}x not given", stack.count));
                }
                out
            }
            InventoryCommand::Tool(item) => {
                let slot = usize::from(inv.held_index());
                inv.set_slot(slot, Some(build_piece(item)));
                CommandOutput::line(format!("Holding tool {} in slot {slot}", item.kind))
            }
            InventoryCommand::Set { slot, kind, count } => {
                inv.set_slot(slot, Some(ItemStack::new(kind, count)));
                CommandOutput::line(format!("Slot {slot} set to {count}x {kind}"))
            }
            InventoryCommand::Clear { slot } => {
                inv.clear_slot(slot);
                CommandOutput::line(format!("Slot {slot} cleared"))
            }
            InventoryCommand::Decrease { slot, amount } => {
                inv.decrease_slot(slot, amount);
                CommandOutput::line(format!("Slot {slot} now holds {}", inv.get(slot).count))
            }
            InventoryCommand::Select { index } => {
                inv.set_held_hotbar_index(index, true);
                CommandOutput::line(format!("Selected hotbar slot {index}"))
            }
            InventoryCommand::Remove { kind, count } => {
                let removed = inv.remove_kind(kind, count);
                CommandOutput::line(format!("Removed {removed}x {kind}"))
            }
            InventoryCommand::Swing => {
                let cause = DamageCause::new(DamageReason::BlockBreak);
                match inv.damage_held_tool(&self.participant, rng, cause) {
                    WearOutcome::Destroyed => CommandOutput::line("Held tool broke"),
                    outcome => CommandOutput::line(format!("Held tool: {outcome:?}")),
                }
            }
            InventoryCommand::Hurt => {
                let outcomes = inv.damage_armor_set(&self.participant, rng);
                CommandOutput::line(format!("Armor: {outcomes:?}"))
            }
            InventoryCommand::Equip { slot, piece } => {
                inv.equip_armor(slot, build_piece(piece));
                CommandOutput::line(format!("Equipped {} as {slot:?}", piece.kind))
            }
            InventoryCommand::Gamemode { mode } => {
                self.participant.mode = mode;
                CommandOutput::line(format!("Gamemode set to {mode:?}"))
            }
            InventoryCommand::Open { size } => {
                self.participant.open_storage(size);
                CommandOutput::line(format!("Opened container with {size} slots"))
            }
            InventoryCommand::Close => {
                self.participant.close();
                CommandOutput::line("Closed container")
            }
            InventoryCommand::Peek { slot, container_id } => {
                let stack = inv.resolve_slot(slot, container_id, &self.participant);
                if stack.is_air() {
                    CommandOutput::line(format!("{container_id}:{slot} is empty"))
                } else {
                    CommandOutput::line(format!(
                        "{container_id}:{slot} holds {}x {} (wear {})",
                        stack.count, stack.kind, stack.wear
                    ))
                }
            }
            InventoryCommand::ClearAll => {
                inv.clear_all();
                CommandOutput::line("Inventory cleared")
            }
        }
    }
}

/// Totals from a completed script run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub commands: usize,
    pub rejected: usize,
    pub events: usize,
    pub transcript: Vec<String>,
}

/// Replay `script` tick by tick, logging every emitted event to `events_out`.
pub fn run_script(
    session: &mut Session,
    mut script: CommandScript,
    mut events_out: Option<&mut JsonlSink>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    while let Some(tick) = script.next_tick() {
        let mut rng = scoped_rng(session.seed, PARTICIPANT_ID, tick);
        for line in script.take_due(tick) {
            summary.commands += 1;
            match commands::parse_command(&line) {
                Ok(cmd) => {
                    debug!(tick = tick.0, command = %line, "executing");
                    let out = session.execute(cmd, &mut rng);
                    summary.transcript.extend(out.lines);
                }
                Err(err) => {
                    warn!(tick = tick.0, command = %line, %err, "rejected command");
                    summary.rejected += 1;
                    summary.transcript.push(format!("Error: {err}"));
                }
            }
        }

        let events = session.drain_events();
        summary.events += events.len();
        if let Some(sink) = events_out.as_deref_mut() {
            sink.write_all(tick, &events)?;
        }
    }
    if let Some(sink) = events_out {
        sink.flush()?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(json: &str) -> (Session, RunSummary) {
        let mut session = Session::new(&InventoryConfig::default(), 42);
        let script = CommandScript::parse(json).expect("script parses");
        let summary = run_script(&mut session, script, None).expect("run succeeds");
        (session, summary)
    }

    #[test]
    fn golden_session_transcript_is_stable() {
        let (session, summary) = run(r#"{
            "steps": [
                {"tick": 0, "command": "give 1 60"},
                {"tick": 0, "command": "give 1 10"},
                {"tick": 1, "command": "tool 268 2"},
                {"tick": 2, "command": "set 0 268 1"},
                {"tick": 2, "command": "peek 9 0"},
                {"tick": 3, "command": "teleport 0 0 0"},
                {"tick": 4, "command": "clear_all"}
            ]
        }"#);

        assert_eq!(
            summary.transcript,
            vec![
                "Gave 60x 1",
                "Gave 10x 1",
                "Holding tool 268 in slot 0",
                "Slot 0 set to 1x 268",
                "0:9 holds 64x 1 (wear 0)",
                "Error: Unknown command: teleport. Try help",
                "Inventory cleared",
            ]
        );
        assert_eq!(summary.commands, 7);
        assert_eq!(summary.rejected, 1);
        // 1 + 2 + 1 + 1 + 1 (clear_all)
        assert_eq!(summary.events, 6);
        assert!(session.inventory().slots().iter().all(ItemStack::is_air));
    }

    #[test]
    fn swinging_wears_the_selected_tool() {
        let (session, summary) = run(r#"{
            "steps": [
                {"tick": 0, "command": "select 3"},
                {"tick": 0, "command": "tool 268 2"},
                {"tick": 1, "command": "swing"},
                {"tick": 2, "command": "gamemode creative"},
                {"tick": 3, "command": "swing"},
                {"tick": 4, "command": "gamemode survival"},
                {"tick": 5, "command": "swing"}
            ]
        }"#);
        assert_eq!(summary.rejected, 0);
        assert_eq!(
            summary.transcript[1..],
            [
                "Holding tool 268 in slot 3",
                "Held tool: Worn",
                "Gamemode set to Creative",
                "Held tool: Unaffected",
                "Gamemode set to Survival",
                "Held tool broke",
            ]
        );
        assert_eq!(session.inventory().held_index(), 3);
        assert!(session.inventory().held_item().is_air());
    }

    #[test]
    fn peek_reads_open_container_and_armor() {
        let (_, summary) = run(r#"{
            "steps": [
                {"tick": 0, "command": "equip leggings 300 75"},
                {"tick": 0, "command": "peek 2 120"},
                {"tick": 1, "command": "open 5"},
                {"tick": 1, "command": "peek 0 7"},
                {"tick": 2, "command": "close"},
                {"tick": 2, "command": "peek 0 7"}
            ]
        }"#);
        assert_eq!(summary.transcript[1], "120:2 holds 1x 300 (wear 0)");
        assert_eq!(summary.transcript[3], "7:0 is empty");
        assert_eq!(summary.transcript[5], "7:0 is empty");
    }
}
