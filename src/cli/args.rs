//! CLI argument definitions.

use super::validators::{parse_subject_id, parse_window_hours};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Merge validated seizure annotations into iEEG sessions and localize clip
/// windows in clinical time.
#[derive(Debug, Parser)]
#[command(name = "ieeg-clips")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "IEEG_CLIPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the upstream CSV exports (overrides config).
    #[arg(short, long, global = true, env = "IEEG_CLIPS_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Base directory for validated output (overrides config).
    #[arg(short, long, global = true, env = "IEEG_CLIPS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Disable the progress bar.
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Suppress informational output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge manual annotations, derive and localize clips, and write
    /// validated metadata for each subject.
    Process(ProcessArgs),
    /// Select interictal clips from previously processed subjects.
    Interictal(InterictalArgs),
    /// Report subjects missing start times or seizure times.
    Audit {
        /// Subject ids to check.
        #[arg(required = true, value_parser = parse_subject_id)]
        subjects: Vec<String>,
    },
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the process command.
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Subject ids to process.
    #[arg(required = true, value_parser = parse_subject_id)]
    pub subjects: Vec<String>,

    /// Clip length in seconds (overrides config).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub clip_secs: Option<u32>,

    /// Hours around an event counted as close to it (overrides config).
    #[arg(long, value_parser = parse_window_hours)]
    pub window_hours: Option<f64>,

    /// Pass malformed seizure events through instead of failing the subject.
    #[arg(long)]
    pub lenient: bool,
}

/// Arguments for the interictal command.
#[derive(Debug, Args)]
pub struct InterictalArgs {
    /// Subject ids to process.
    #[arg(required = true, value_parser = parse_subject_id)]
    pub subjects: Vec<String>,

    /// Largest gap between clips within one segment, in seconds.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_gap_secs: Option<u32>,

    /// Segments spanning this many seconds or less are not marked.
    #[arg(long)]
    pub min_segment_secs: Option<u32>,
}
