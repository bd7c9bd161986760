//! Mediaprep CLI - Command-line interface for media document preparation.

use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod config;
mod output;

use commands::{
    clean, field_settings, flatten_schema, map, prepare, reconcile, validate, FlattenArgs,
};

#[derive(Parser)]
#[command(name = "mediaprep")]
#[command(about = "Media document preparation and search schema field settings CLI")]
struct Cli {
    /// Configuration file (default: ./mediaprep.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Also append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Repair documents against the types declared in a schema
    Clean {
        /// Input JSON, JSON array or JSON Lines file (or stdin if not provided)
        input: Option<PathBuf>,
        /// Schema file declaring field types
        #[arg(long)]
        schema: PathBuf,
        /// Write output here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Flatten a schema document
    FlattenSchema {
        /// Schema file (or stdin if not provided)
        schema: Option<PathBuf>,
        /// Write output here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        flatten: FlattenArgs,
    },
    /// Clean documents, then flatten them
    Prepare {
        /// Input JSON, JSON array or JSON Lines file (or stdin if not provided)
        input: Option<PathBuf>,
        /// Schema file declaring field types
        #[arg(long)]
        schema: PathBuf,
        /// Write output here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        flatten: FlattenArgs,
    },
    /// Map source records to canonical documents
    Map {
        /// Input JSON, JSON array or JSON Lines file (or stdin if not provided)
        input: Option<PathBuf>,
        /// Write documents here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write one document per line
        #[arg(long)]
        jsonl: bool,
        /// Write per-record errors and warnings to this file
        #[arg(long)]
        report: Option<PathBuf>,
        /// Exit with error code if any record fails
        #[arg(long)]
        strict: bool,
    },
    /// Validate canonical documents
    Validate {
        /// Input JSON, JSON array or JSON Lines file (or stdin if not provided)
        input: Option<PathBuf>,
        /// Write reports here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Exit with error code if any document is invalid
        #[arg(long)]
        strict: bool,
    },
    /// Generate field settings for documents shaped like a sample
    FieldSettings {
        /// Sample document; the first of an array or JSON Lines input is used
        input: Option<PathBuf>,
        /// Write the settings here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Reconcile a schema file with the configured field settings
    Reconcile {
        /// Schema file holding the current schema
        schema: PathBuf,
        /// Field settings JSON file (overrides the [capabilities] section)
        #[arg(long)]
        fields: Option<PathBuf>,
        /// Write the update back to the schema file
        #[arg(long)]
        apply: bool,
        /// Write the summary here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(level: &str, log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(std::io::stderr.and(Mutex::new(file)))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&cli.log_level, cli.log_file.as_deref())?;
    let config = config::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Clean {
            input,
            schema,
            output,
        } => clean::run(input, schema, output, &config),
        Commands::FlattenSchema {
            schema,
            output,
            flatten,
        } => flatten_schema::run(schema, output, flatten, &config),
        Commands::Prepare {
            input,
            schema,
            output,
            flatten,
        } => prepare::run(input, schema, output, flatten, &config),
        Commands::Map {
            input,
            output,
            jsonl,
            report,
            strict,
        } => map::run(input, output, jsonl, report, strict, &config),
        Commands::Validate {
            input,
            output,
            strict,
        } => validate::run(input, output, strict, &config),
        Commands::FieldSettings { input, output } => field_settings::run(input, output, &config),
        Commands::Reconcile {
            schema,
            fields,
            apply,
            output,
        } => reconcile::run(schema, fields, apply, output, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
