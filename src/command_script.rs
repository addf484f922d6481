use anyhow::{Context, Result};
use invkeep_core::SimTick;
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptFile {
    steps: Vec<StepDef>,
}

#[derive(Debug, Deserialize)]
struct StepDef {
    tick: u64,
    command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduledCommand {
    tick: SimTick,
    line: String,
}

/// Inventory command script.
///
/// A JSON document of `{tick, command}` steps, sorted by tick and replayed in
/// file order.
#[derive(Debug)]
pub struct CommandScript {
    pending: VecDeque<ScheduledCommand>,
}

impl CommandScript {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read command script {}", path.display()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let file: ScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("command script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        let mut previous = SimTick::ZERO;
        for (index, step) in file.steps.into_iter().enumerate() {
            let line = step.command.trim();
            if line.is_empty() {
                anyhow::bail!("step {index} has an empty command");
            }
            let tick = SimTick(step.tick);
            if tick < previous {
                anyhow::bail!("command script steps must be sorted by tick (step {index})");
            }
            previous = tick;
            pending.push_back(ScheduledCommand {
                tick,
                line: line.to_string(),
            });
        }

        Ok(Self { pending })
    }

    /// Tick of the next pending command.
    pub fn next_tick(&self) -> Option<SimTick> {
        self.pending.front().map(|step| step.tick)
    }

    /// Remove and return every command due at or before `tick`.
    pub fn take_due(&mut self, tick: SimTick) -> Vec<String> {
        let mut due = Vec::new();
        while self.next_tick().is_some_and(|next| next <= tick) {
            if let Some(step) = self.pending.pop_front() {
                due.push(step.line);
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsorted_ticks() {
        let json = r#"{
            "steps": [
                {"tick": 2, "command": "select 1"},
                {"tick": 1, "command": "select 2"}
            ]
        }"#;
        let err = CommandScript::parse(json).unwrap_err();
        assert!(err.to_string().contains("sorted by tick"), "unexpected error: {err:#}");
    }

    #[test]
    fn rejects_blank_commands() {
        let json = r#"{"steps": [{"tick": 0, "command": "   "}]}"#;
        assert!(CommandScript::parse(json).is_err());
        assert!(CommandScript::parse(r#"{"steps": []}"#).is_err());
    }

    #[test]
    fn drains_in_order() {
        let json = r#"{
            "steps": [
                {"tick": 1, "command": "give 1 10"},
                {"tick": 1, "command": "swing"},
                {"tick": 3, "command": "clear_all"}
            ]
        }"#;
        let mut script = CommandScript::parse(json).expect("script should parse");

        assert!(script.take_due(SimTick(0)).is_empty());
        assert_eq!(script.next_tick(), Some(SimTick(1)));
        assert_eq!(script.take_due(SimTick(1)), vec!["give 1 10", "swing"]);
        assert!(script.take_due(SimTick(2)).is_empty());
        assert_eq!(script.take_due(SimTick(3)), vec!["clear_all"]);
        assert_eq!(script.next_tick(), None);
    }
}
