//! Loading snapshots and merge configuration.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ordo_merge::{DuplicateKeys, MergeConfig};
use ordo_types::KeyedItem;

use crate::cli::{MergeArgs, SnapshotArgs};

pub type Item = KeyedItem<Value>;

/// The two snapshots handed to a command.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshots {
    #[serde(default)]
    pub previous: Vec<Item>,
    #[serde(default)]
    pub next: Vec<Item>,
}

impl Snapshots {
    /// Blank entries (`--previous ""`, `a,,b`) are dropped, so an empty flag
    /// value is an empty snapshot.
    pub fn from_keys(previous: &[String], next: &[String]) -> Self {
        Self {
            previous: bare_items(previous),
            next: bare_items(next),
        }
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("snapshot input is not valid JSON")
    }
}

fn bare_items(keys: &[String]) -> Vec<Item> {
    keys.iter()
        .map(|key| key.trim())
        .filter(|key| !key.is_empty())
        .map(Item::bare)
        .collect()
}

pub fn load_snapshots(args: &SnapshotArgs) -> anyhow::Result<Snapshots> {
    match &args.input {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Snapshots::from_json(&text)
        }
        None => Ok(Snapshots::from_keys(&args.previous, &args.next)),
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<MergeConfig> {
    let Some(path) = path else {
        return Ok(MergeConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Command-line flags override the file configuration.
pub fn resolve_config(args: &MergeArgs, base: MergeConfig) -> MergeConfig {
    let mut config = base;
    if let Some(tie_break) = args.tie_break {
        config.tie_break = tie_break.into();
    }
    if args.reject_duplicates {
        config.duplicate_keys = DuplicateKeys::Reject;
    }
    config
}
