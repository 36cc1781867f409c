//! ieeg-clips - validated seizure annotations and clinical-time clip windows
//! for intracranial EEG sessions.
//!
//! Manually validated seizure timing is merged into every recording session
//! of a subject, fixed-length clips are derived and localized against the
//! recording's clinical start time, and the result is written per session.

#![warn(missing_docs)]

pub mod annotation;
pub mod cli;
pub mod clips;
pub mod config;
pub mod constants;
pub mod error;
pub mod interictal;
pub mod output;
pub mod pipeline;
pub mod sources;
pub mod utils;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, GlobalArgs, InterictalArgs, ProcessArgs};
use clips::MinuteClipDeriver;
use config::{
    Config, config_file_path, load_config_file, load_default_config, save_config, validate_config,
};
use interictal::{InterictalExtractor, InterictalOptions};
use output::ValidatedMetadataWriter;
use pipeline::{
    AuditEntry, Collaborators, OrchestratorOptions, SessionOrchestrator, audit_subject,
    process_batch,
};
use sources::LocalExportSource;
use std::path::Path;
use tracing::{debug, info};

pub use error::{Error, Result};

/// Main entry point for the ieeg-clips CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet);

    let progress_enabled = !cli.global.quiet && !cli.global.no_progress;
    let config_path = cli.global.config.as_deref();

    match cli.command {
        Command::Config { action } => handle_config_command(action, config_path),
        Command::Process(args) => {
            let config = resolve_config(config_path, &cli.global)?;
            handle_process(&args, config, progress_enabled)
        }
        Command::Interictal(args) => {
            let config = resolve_config(config_path, &cli.global)?;
            handle_interictal(&args, config, progress_enabled)
        }
        Command::Audit { subjects } => {
            let config = resolve_config(config_path, &cli.global)?;
            handle_audit(&subjects, &config)
        }
    }
}

/// Load the config file and apply command-line overrides.
///
/// Without `--config`, the platform config file is used when present.
fn resolve_config(path: Option<&Path>, global: &GlobalArgs) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            load_config_file(path)?
        }
        None => load_default_config()?,
    };

    if let Some(dir) = &global.input_dir {
        config.paths.input_dir.clone_from(dir);
    }
    if let Some(dir) = &global.output_dir {
        config.paths.output_dir.clone_from(dir);
    }

    Ok(config)
}

fn handle_process(args: &ProcessArgs, mut config: Config, progress_enabled: bool) -> Result<()> {
    if let Some(secs) = args.clip_secs {
        config.clips.duration_secs = secs;
    }
    if let Some(hours) = args.window_hours {
        config.clips.event_window_hours = hours;
    }
    if args.lenient {
        config.annotations.strict = false;
    }
    validate_config(&config)?;

    info!(
        "Processing {} subject(s) from {} into {}",
        args.subjects.len(),
        config.paths.input_dir.display(),
        config.paths.output_dir.display()
    );

    let source = LocalExportSource::new(&config.paths.input_dir);
    let deriver =
        MinuteClipDeriver::new(config.clips.duration_secs, config.clips.event_window_hours);
    let sources = Collaborators {
        sessions: &source,
        start_times: &source,
        seizures: &source,
        base_metadata: &source,
        clip_deriver: &deriver,
    };
    let orchestrator = SessionOrchestrator::new(
        sources,
        ValidatedMetadataWriter::new(&config.paths.output_dir),
        OrchestratorOptions {
            strict_annotations: config.annotations.strict,
        },
    );

    process_batch(&args.subjects, progress_enabled, |subject| {
        orchestrator.process_subject(subject)
    })
    .into_result()
}

fn handle_interictal(
    args: &InterictalArgs,
    mut config: Config,
    progress_enabled: bool,
) -> Result<()> {
    if let Some(secs) = args.max_gap_secs {
        config.interictal.max_gap_secs = secs;
    }
    if let Some(secs) = args.min_segment_secs {
        config.interictal.min_segment_secs = secs;
    }
    validate_config(&config)?;

    let extractor = InterictalExtractor::new(
        &config.paths.output_dir,
        InterictalOptions {
            max_gap_secs: config.interictal.max_gap_secs,
            min_segment_secs: config.interictal.min_segment_secs,
            event_window_hours: config.clips.event_window_hours,
        },
    );

    process_batch(&args.subjects, progress_enabled, |subject| {
        extractor.process_subject(subject)
    })
    .into_result()
}

#[allow(clippy::print_stdout)]
fn handle_audit(subjects: &[String], config: &Config) -> Result<()> {
    validate_config(config)?;
    let source = LocalExportSource::new(&config.paths.input_dir);

    let mut entries: Vec<AuditEntry> = Vec::new();
    let summary = process_batch(subjects, false, |subject| {
        let entry = audit_subject(&source, &source, &source, subject)?;
        entries.push(entry);
        Ok(())
    });

    let missing_start: Vec<&str> = entries
        .iter()
        .filter(|e| e.missing_start_times())
        .map(|e| e.subject_id.as_str())
        .collect();
    let missing_seizures: Vec<&str> = entries
        .iter()
        .filter(|e| e.missing_seizure_times())
        .map(|e| e.subject_id.as_str())
        .collect();

    println!();
    println!("Missing start times ({}):", missing_start.len());
    for subject in &missing_start {
        println!("  {subject}");
    }
    println!("Missing seizure times ({}):", missing_seizures.len());
    for subject in &missing_seizures {
        println!("  {subject}");
    }

    summary.into_result()
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
                println!("\nNext steps:");
                println!("  Set [paths] input_dir to the directory holding sessions.csv");
                println!("  ieeg-clips process <subject>...");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config_file(&path)?;
            let rendered =
                toml::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("# {}", path.display());
            println!("{rendered}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
