//! CLI argument definitions for the lexicon builder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rxlex",
    version,
    about = "Build a drug-name normalization lexicon from UMLS RRF tables",
    long_about = "Build a drug-name normalization lexicon from UMLS RRF tables.\n\n\
                  Reads generic/brand pairs from MRREL.RRF and their names from\n\
                  MRCONSO.RRF, then writes the lexicon, its no-repeats variant,\n\
                  the removed ambiguous terms, an audit table and a manifest."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the lexicon and write its artifacts.
    Build(BuildArgs),

    /// Print the default settings file.
    Defaults,
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Path to the MRREL.RRF relation table.
    #[arg(long = "mrrel", value_name = "PATH")]
    pub mrrel: PathBuf,

    /// Path to the MRCONSO.RRF concept-name table.
    #[arg(long = "mrconso", value_name = "PATH")]
    pub mrconso: PathBuf,

    /// Output directory for the artifacts (default: from settings, else ./output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Settings file (default: ./rxlex.toml when present).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep only rows from this source vocabulary, e.g. RXNORM.
    #[arg(long = "sab", value_name = "SAB")]
    pub sab: Option<String>,

    /// Keep only concept names in this language, e.g. ENG.
    #[arg(long = "language", value_name = "LAT")]
    pub language: Option<String>,

    /// Relation pairing generic and brand concepts.
    #[arg(long = "relation", value_name = "NAME")]
    pub relation: Option<String>,

    /// Fail the run when more generic concepts than this have no name.
    #[arg(long = "max-unresolved", value_name = "N")]
    pub max_unresolved: Option<usize>,

    /// Build and report without writing any files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
