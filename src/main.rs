//! invkeep - participant inventory core
//!
//! Headless driver that replays an inventory command script

mod command_script;
mod commands;
mod session;

use anyhow::{Context, Result};
use command_script::CommandScript;
use invkeep_inventory::InventoryConfig;
use invkeep_testkit::JsonlSink;
use session::{run_script, Session};
use std::{env, path::PathBuf};
use tracing::info;

const DEFAULT_SEED: u64 = 0x1a7e_5eed;

fn main() -> Result<()> {
    // WARN by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting invkeep v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    if cli.help {
        print_usage();
        return Ok(());
    }
    let Some(script_path) = cli.script else {
        print_usage();
        anyhow::bail!("--script is required");
    };

    let config = match &cli.config {
        Some(path) => InventoryConfig::load_from_path(path),
        None => InventoryConfig::default(),
    };
    let script = CommandScript::from_path(&script_path)?;

    let mut events_out = match &cli.events_out {
        Some(path) => Some(
            JsonlSink::create(path)
                .with_context(|| format!("failed to create event log {}", path.display()))?,
        ),
        None => None,
    };

    let mut session = Session::new(&config, cli.seed.unwrap_or(DEFAULT_SEED));
    let summary = run_script(&mut session, script, events_out.as_mut())?;

    for line in &summary.transcript {
        println!("{line}");
    }
    info!(
        commands = summary.commands,
        rejected = summary.rejected,
        events = summary.events,
        empty_slots = session.inventory().slots().empty_slots(),
        "script finished"
    );
    if summary.rejected > 0 {
        tracing::warn!(rejected = summary.rejected, "some commands were rejected");
    }
    Ok(())
}

fn print_usage() {
    println!("Usage: invkeep --script <steps.json> [--config <inventory.toml>]");
    println!("               [--events-out <events.jsonl>] [--seed <u64>]");
}

#[derive(Debug, Default)]
struct CliOptions {
    help: bool,
    script: Option<PathBuf>,
    config: Option<PathBuf>,
    events_out: Option<PathBuf>,
    seed: Option<u64>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--script" => {
                    if let Some(path) = args.next() {
                        opts.script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--script requires a file path");
                    }
                }
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--events-out" => {
                    if let Some(path) = args.next() {
                        opts.events_out = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--events-out requires a file path");
                    }
                }
                "--seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.seed = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--seed must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--seed requires an integer");
                    }
                }
                other => {
                    tracing::warn!(arg = other, "ignoring unknown argument");
                }
            }
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_all_flags() {
        let opts = parse(&[
            "--script",
            "steps.json",
            "--config",
            "inv.toml",
            "--events-out",
            "out/events.jsonl",
            "--seed",
            "7",
        ]);
        assert_eq!(opts.script, Some(PathBuf::from("steps.json")));
        assert_eq!(opts.config, Some(PathBuf::from("inv.toml")));
        assert_eq!(opts.events_out, Some(PathBuf::from("out/events.jsonl")));
        assert_eq!(opts.seed, Some(7));
        assert!(!opts.help);
    }

    #[test]
    fn bad_seed_is_ignored() {
        let opts = parse(&["--seed", "lots", "--help"]);
        assert_eq!(opts.seed, None);
        assert!(opts.help);
    }
}
