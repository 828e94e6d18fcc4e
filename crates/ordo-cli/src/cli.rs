use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ordo_merge::TieBreak;

#[derive(Parser)]
#[command(
    name = "ordo",
    about = "Ordo: merge keyed list snapshots across frame transitions",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge the previous and next snapshots into one order
    Merge(MergeArgs),
    /// Show entering, leaving, and persisting keys
    Diff(DiffArgs),
}

/// Where the two snapshots come from.
#[derive(Args, Debug, Default)]
pub struct SnapshotArgs {
    /// Keys rendered on the last frame, comma separated; blank entries are
    /// ignored and an omitted flag means an empty snapshot
    #[arg(long, value_delimiter = ',')]
    pub previous: Vec<String>,
    /// Keys desired for the next frame, comma separated; blank entries are
    /// ignored and an omitted flag means an empty snapshot
    #[arg(long, value_delimiter = ',')]
    pub next: Vec<String>,
    /// JSON file with `previous` and `next` arrays of `{ "key", "data" }` items
    #[arg(long, conflicts_with_all = ["previous", "next"])]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct MergeArgs {
    #[command(flatten)]
    pub snapshots: SnapshotArgs,
    /// Departing keys to keep in the merged order
    #[arg(long, value_delimiter = ',')]
    pub retain: Vec<String>,
    /// Keep every departing key
    #[arg(long, conflicts_with = "retain")]
    pub retain_all: bool,
    /// Convention for pairs no anchor orders
    #[arg(long)]
    pub tie_break: Option<TieBreakArg>,
    /// Fail on repeated keys instead of keeping the last occurrence
    #[arg(long)]
    pub reject_duplicates: bool,
    /// TOML merge configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct DiffArgs {
    #[command(flatten)]
    pub snapshots: SnapshotArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum TieBreakArg {
    DepartingFirst,
    ArrivingFirst,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::DepartingFirst => TieBreak::DepartingFirst,
            TieBreakArg::ArrivingFirst => TieBreak::ArrivingFirst,
        }
    }
}
