//! CLI argument definitions for LitNet.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use litnet_cli::filter_args::FilterArg;
use litnet_model::RuleSortKey;

#[derive(Parser)]
#[command(
    name = "litnet",
    version,
    about = "LitNet - co-occurrence networks for labelled literature",
    long_about = "Explore how labels co-occur across screened title/abstract records.\n\n\
                  Builds node/edge networks and association rule tables (support,\n\
                  lift, leverage, PMI) from a labelled records CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Analysis configuration (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show how each column of a records file is classified.
    Columns(ColumnsArgs),

    /// Build the co-occurrence network for a selection.
    Network(NetworkArgs),

    /// Print the canonical association rule table.
    Rules(RulesArgs),
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Labelled records CSV (Refid, Title, Abstract, label columns).
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,
}

#[derive(Args)]
pub struct NetworkArgs {
    /// Labelled records CSV (Refid, Title, Abstract, label columns).
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// Columns drawn as nodes (CSV with `columns_in_network`).
    #[arg(long = "network-config", value_name = "CSV")]
    pub network_config: PathBuf,

    /// Edge colors and labels (CSV with `entity_1,entity_2,edge_color,edge_label`).
    #[arg(long = "edge-options", value_name = "CSV")]
    pub edge_options: Option<PathBuf>,

    /// Named filter groups (CSV with `filter_group_name,columns_in_group`).
    #[arg(long = "filter-groups", value_name = "CSV")]
    pub filter_groups: Option<PathBuf>,

    /// Row filter: `COL1,COL2` or `GROUP=COL1,COL2`. Repeat to combine with AND.
    #[arg(long = "filter", value_name = "SPEC")]
    pub filters: Vec<FilterArg>,

    /// First node of a selected pair.
    #[arg(long = "node1", value_name = "COLUMN", requires = "node2")]
    pub node1: Option<String>,

    /// Second node of a selected pair.
    #[arg(long = "node2", value_name = "COLUMN", requires = "node1")]
    pub node2: Option<String>,

    /// Minimum co-occurring records for an edge.
    #[arg(long = "min-edge-count", value_name = "N")]
    pub min_edge_count: Option<usize>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ViewFormatArg,

    /// Export the selected papers as CSV (`-` for a timestamped name).
    #[arg(long = "export-csv", value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Export the selected papers as RIS (`-` for a timestamped name).
    #[arg(long = "export-ris", value_name = "PATH")]
    pub export_ris: Option<PathBuf>,
}

#[derive(Args)]
pub struct RulesArgs {
    /// Labelled records CSV (Refid, Title, Abstract, label columns).
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// Columns to mine (default: every presence flag column).
    #[arg(long = "columns", value_name = "A,B,...", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Minimum itemset support in [0, 1].
    #[arg(long = "min-support", value_name = "FRACTION")]
    pub min_support: Option<f64>,

    /// Largest itemset size.
    #[arg(long = "max-len", value_name = "N")]
    pub max_len: Option<usize>,

    /// Sort key (all keys sort descending).
    #[arg(long = "sort-by", value_enum)]
    pub sort_by: Option<SortKeyArg>,

    /// Write the rule table to a CSV file instead of printing it.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortKeyArg {
    CooccurrenceCount,
    Support,
    Lift,
    Leverage,
    Pmi,
    Entity1Count,
    Entity2Count,
}

impl From<SortKeyArg> for RuleSortKey {
    fn from(arg: SortKeyArg) -> Self {
        match arg {
            SortKeyArg::CooccurrenceCount => Self::CooccurrenceCount,
            SortKeyArg::Support => Self::Support,
            SortKeyArg::Lift => Self::Lift,
            SortKeyArg::Leverage => Self::Leverage,
            SortKeyArg::Pmi => Self::Pmi,
            SortKeyArg::Entity1Count => Self::Entity1Count,
            SortKeyArg::Entity2Count => Self::Entity2Count,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
