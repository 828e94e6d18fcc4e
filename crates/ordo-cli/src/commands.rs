use std::collections::HashSet;

use colored::Colorize;
use serde_json::json;
use tracing::debug;

use ordo_diff::{diff_keys, KeyDiff};
use ordo_merge::{Departure, Merger};

use crate::cli::*;
use crate::input::{self, Item, Snapshots};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Merge(args) => cmd_merge(args, cli.format),
        Command::Diff(args) => cmd_diff(args, cli.format),
    }
}

/// Result of a merge plus the departure decisions made along the way.
#[derive(Debug, Default, PartialEq)]
pub struct MergeReport {
    pub merged: Vec<Item>,
    pub retained: Vec<String>,
    pub omitted: Vec<String>,
}

impl MergeReport {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "merged": self.merged,
            "retained": self.retained,
            "omitted": self.omitted,
        })
    }
}

pub fn run_merge(args: &MergeArgs, snapshots: &Snapshots) -> anyhow::Result<MergeReport> {
    let file_config = input::load_config(args.config.as_deref())?;
    let config = input::resolve_config(args, file_config);
    debug!(?config, "resolved merge configuration");

    let keep: HashSet<&str> = args.retain.iter().map(String::as_str).collect();
    let mut retained = Vec::new();
    let mut omitted = Vec::new();

    let merged = Merger::new(config).merge(
        &snapshots.previous,
        &snapshots.next,
        |_: usize, item: &Item| -> Departure<Item> {
            let decision = if args.retain_all || keep.contains(item.key.as_str()) {
                Departure::Retain(item.clone())
            } else {
                Departure::Omit
            };
            if decision.is_retained() {
                retained.push(item.key.clone());
            } else {
                omitted.push(item.key.clone());
            }
            decision
        },
    )?;

    Ok(MergeReport {
        merged,
        retained,
        omitted,
    })
}

fn cmd_merge(args: MergeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let snapshots = input::load_snapshots(&args.snapshots)?;
    let report = run_merge(&args, &snapshots)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.to_json())?);
        }
        OutputFormat::Text => {
            let line: Vec<String> = report
                .merged
                .iter()
                .map(|item| {
                    if report.retained.contains(&item.key) {
                        item.key.dimmed().to_string()
                    } else {
                        item.key.clone()
                    }
                })
                .collect();
            println!("{} {}", "✓".green().bold(), line.join(" "));
            for key in &report.retained {
                println!("  {} {}", "leaving:".yellow(), key);
            }
            for key in &report.omitted {
                println!("  {} {}", "removed:".red(), key);
            }
        }
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let snapshots = input::load_snapshots(&args.snapshots)?;
    let diff = diff_keys(&snapshots.previous, &snapshots.next);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => print_diff(&diff),
    }
    Ok(())
}

fn print_diff(diff: &KeyDiff<String>) {
    if diff.is_unchanged() {
        println!("No changes.");
        return;
    }
    for key in &diff.entering {
        println!("  {} {}", "+".green().bold(), key);
    }
    for key in &diff.leaving {
        println!("  {} {}", "-".red().bold(), key);
    }
    for key in &diff.persisting {
        println!("  {} {}", "=".dimmed(), key);
    }
    if diff.reordered {
        println!("{}", "Persisting keys were reordered.".yellow());
    }
}
