use std::fmt;

use invkeep_core::KindId;
use invkeep_inventory::{ArmorSlot, GameMode, HOTBAR_SIZE, INVENTORY_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

/// A wearable item described on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WearableItem {
    pub kind: KindId,
    pub durability: u32,
    pub unbreaking: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryCommand {
    Help,
    Give {
        kind: KindId,
        count: u8,
        max_stack: u8,
    },
    Tool(WearableItem),
    Set {
        slot: usize,
        kind: KindId,
        count: u8,
    },
    Clear {
        slot: usize,
    },
    Decrease {
        slot: usize,
        amount: u8,
    },
    Select {
        index: u8,
    },
    Remove {
        kind: KindId,
        count: u32,
    },
    Swing,
    Hurt,
    Equip {
        slot: ArmorSlot,
        piece: WearableItem,
    },
    Gamemode {
        mode: GameMode,
    },
    Open {
        size: usize,
    },
    Close,
    Peek {
        slot: usize,
        container_id: u8,
    },
    ClearAll,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
}

impl CommandOutput {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
        }
    }
}

pub fn parse_command(input: &str) -> Result<InventoryCommand, CommandError> {
    let input = input.trim();
    let input = input.strip_prefix('/').unwrap_or(input).trim();
    if input.is_empty() {
        return Ok(InventoryCommand::Help);
    }

    let mut parts = input.split_whitespace();
    let cmd = parts
        .next()
        .ok_or_else(|| CommandError::new("Missing command"))?
        .to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "help" | "?" => Ok(InventoryCommand::Help),
        "give" => {
            if !(2..=3).contains(&args.len()) {
                return Err(CommandError::new("Usage: give <kind> <count> [max_stack]"));
            }
            let max_stack = match args.get(2) {
                Some(raw) => parse_positive_u8(raw, "max stack size")?,
                None => 64,
            };
            Ok(InventoryCommand::Give {
                kind: parse_kind(args[0])?,
                count: parse_positive_u8(args[1], "give count")?,
                max_stack,
            })
        }
        "tool" => {
            if !(2..=3).contains(&args.len()) {
                return Err(CommandError::new(
                    "Usage: tool <kind> <durability> [unbreaking]",
                ));
            }
            Ok(InventoryCommand::Tool(parse_wearable(&args)?))
        }
        "set" => {
            if args.len() != 3 {
                return Err(CommandError::new("Usage: set <slot> <kind> <count>"));
            }
            Ok(InventoryCommand::Set {
                slot: parse_slot(args[0])?,
                kind: parse_kind(args[1])?,
                count: parse_u8(args[2], "count")?,
            })
        }
        "clear" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: clear <slot>"));
            }
            Ok(InventoryCommand::Clear {
                slot: parse_slot(args[0])?,
            })
        }
        "decrease" => {
            if args.len() != 2 {
                return Err(CommandError::new("Usage: decrease <slot> <amount>"));
            }
            Ok(InventoryCommand::Decrease {
                slot: parse_slot(args[0])?,
                amount: parse_u8(args[1], "amount")?,
            })
        }
        "select" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: select <hotbar index>"));
            }
            let index = parse_u8(args[0], "hotbar index")?;
            if usize::from(index) >= HOTBAR_SIZE {
                return Err(CommandError::new(format!(
                    "Hotbar index must be below {HOTBAR_SIZE}"
                )));
            }
            Ok(InventoryCommand::Select { index })
        }
        "remove" => {
            if args.len() != 2 {
                return Err(CommandError::new("Usage: remove <kind> <count>"));
            }
            let count = args[1]
                .parse::<u32>()
                .map_err(|_| CommandError::new("Invalid remove count"))?;
            Ok(InventoryCommand::Remove {
                kind: parse_kind(args[0])?,
                count,
            })
        }
        "swing" => no_args(&args, InventoryCommand::Swing, "swing"),
        "hurt" => no_args(&args, InventoryCommand::Hurt, "hurt"),
        "equip" => {
            if !(3..=4).contains(&args.len()) {
                return Err(CommandError::new(
                    "Usage: equip <helmet|chest|leggings|boots> <kind> <durability> [unbreaking]",
                ));
            }
            Ok(InventoryCommand::Equip {
                slot: parse_armor_slot(args[0])?,
                piece: parse_wearable(&args[1..])?,
            })
        }
        "gamemode" | "gm" => {
            if args.len() != 1 {
                return Err(CommandError::new(
                    "Usage: gamemode <survival|creative|adventure|spectator>",
                ));
            }
            let mode = GameMode::parse(args[0])
                .ok_or_else(|| CommandError::new(format!("Unknown game mode: {}", args[0])))?;
            Ok(InventoryCommand::Gamemode { mode })
        }
        "open" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: open <size>"));
            }
            let size = args[0]
                .parse::<usize>()
                .map_err(|_| CommandError::new("Invalid container size"))?;
            Ok(InventoryCommand::Open { size })
        }
        "close" => no_args(&args, InventoryCommand::Close, "close"),
        "peek" => {
            if args.len() != 2 {
                return Err(CommandError::new("Usage: peek <slot> <container id>"));
            }
            let slot = args[0]
                .parse::<usize>()
                .map_err(|_| CommandError::new("Invalid slot"))?;
            Ok(InventoryCommand::Peek {
                slot,
                container_id: parse_u8(args[1], "container id")?,
            })
        }
        "clear_all" | "clearall" => no_args(&args, InventoryCommand::ClearAll, "clear_all"),
        _ => Err(CommandError::new(format!("Unknown command: {cmd}. Try help"))),
    }
}

fn no_args(
    args: &[&str],
    cmd: InventoryCommand,
    name: &str,
) -> Result<InventoryCommand, CommandError> {
    if args.is_empty() {
        Ok(cmd)
    } else {
        Err(CommandError::new(format!("Usage: {name}")))
    }
}

fn parse_u8(s: &str, what: &str) -> Result<u8, CommandError> {
    s.parse::<u8>()
        .map_err(|_| CommandError::new(format!("Invalid {what}: {s}")))
}

fn parse_positive_u8(s: &str, what: &str) -> Result<u8, CommandError> {
    match parse_u8(s, what)? {
        0 => Err(CommandError::new(format!("{what} must be > 0"))),
        value => Ok(value),
    }
}

fn parse_kind(s: &str) -> Result<KindId, CommandError> {
    let kind = s
        .parse::<KindId>()
        .map_err(|_| CommandError::new(format!("Invalid item kind: {s}")))?;
    if kind <= 0 {
        return Err(CommandError::new("Item kind must be positive"));
    }
    Ok(kind)
}

fn parse_slot(s: &str) -> Result<usize, CommandError> {
    let slot = s
        .parse::<usize>()
        .map_err(|_| CommandError::new(format!("Invalid slot: {s}")))?;
    if slot >= INVENTORY_SIZE {
        return Err(CommandError::new(format!(
            "Slot must be below {INVENTORY_SIZE}"
        )));
    }
    Ok(slot)
}

fn parse_wearable(args: &[&str]) -> Result<WearableItem, CommandError> {
    let kind = parse_kind(args[0])?;
    let durability = args[1]
        .parse::<u32>()
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| CommandError::new("Durability must be a positive integer"))?;
    let unbreaking = match args.get(2) {
        Some(raw) => parse_u8(raw, "unbreaking level")?,
        None => 0,
    };
    Ok(WearableItem {
        kind,
        durability,
        unbreaking,
    })
}

fn parse_armor_slot(s: &str) -> Result<ArmorSlot, CommandError> {
    match s.to_ascii_lowercase().as_str() {
        "helmet" | "head" => Ok(ArmorSlot::Helmet),
        "chest" | "chestplate" => Ok(ArmorSlot::Chest),
        "leggings" | "legs" => Ok(ArmorSlot::Leggings),
        "boots" | "feet" => Ok(ArmorSlot::Boots),
        _ => Err(CommandError::new(format!("Unknown armor slot: {s}"))),
    }
}

pub fn help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  give <kind> <count> [max_stack]".to_string(),
        "  tool <kind> <durability> [unbreaking]".to_string(),
        "  set <slot> <kind> <count> | clear <slot> | decrease <slot> <n>".to_string(),
        "  select <hotbar index>".to_string(),
        "  remove <kind> <count>".to_string(),
        "  swing | hurt".to_string(),
        "  equip <helmet|chest|leggings|boots> <kind> <durability> [unbreaking]".to_string(),
        "  gamemode <mode> | open <size> | close".to_string(),
        "  peek <slot> <container id>".to_string(),
        "  clear_all".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_give_with_default_stack() {
        assert_eq!(
            parse_command("give 1 10").unwrap(),
            InventoryCommand::Give {
                kind: 1,
                count: 10,
                max_stack: 64
            }
        );
        assert_eq!(
            parse_command("/give 368 4 16").unwrap(),
            InventoryCommand::Give {
                kind: 368,
                count: 4,
                max_stack: 16
            }
        );
    }

    #[test]
    fn rejects_zero_and_air() {
        assert!(parse_command("give 1 0").is_err());
        assert!(parse_command("give 0 5").is_err());
        assert!(parse_command("tool 268 0").is_err());
    }

    #[test]
    fn slot_bounds_are_checked_before_execution() {
        assert!(parse_command("set 45 1 1").is_err());
        assert!(parse_command("select 9").is_err());
        assert_eq!(
            parse_command("select 8").unwrap(),
            InventoryCommand::Select { index: 8 }
        );
    }

    #[test]
    fn peek_accepts_any_slot() {
        assert_eq!(
            parse_command("peek 500 3").unwrap(),
            InventoryCommand::Peek {
                slot: 500,
                container_id: 3
            }
        );
    }

    #[test]
    fn parses_equip_with_unbreaking() {
        assert_eq!(
            parse_command("equip chest 311 528 3").unwrap(),
            InventoryCommand::Equip {
                slot: ArmorSlot::Chest,
                piece: WearableItem {
                    kind: 311,
                    durability: 528,
                    unbreaking: 3
                }
            }
        );
        assert!(parse_command("equip gloves 1 1").is_err());
    }

    #[test]
    fn bare_words_and_unknowns() {
        assert_eq!(parse_command("").unwrap(), InventoryCommand::Help);
        assert_eq!(parse_command("SWING").unwrap(), InventoryCommand::Swing);
        assert!(parse_command("swing hard").is_err());
        assert_eq!(
            parse_command("gm creative").unwrap(),
            InventoryCommand::Gamemode {
                mode: GameMode::Creative
            }
        );
        let err = parse_command("fly").unwrap_err();
        assert!(err.to_string().contains("Unknown command"));
    }
}
