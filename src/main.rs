//! allnotes - Merge dated journal entries from many note files.
//!
//! Usage:
//!   allnotes                 Discover notes under the home directory
//!   allnotes FILE...         Merge the given files only
//!   allnotes formats         List recognised timestamp formats
//!   allnotes --help          Show help

mod render;
mod settings;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use allnotes_core::{DiscoveryConfig, DiscoveryError, HomeDir};
use allnotes_merge::EntryAggregator;
use allnotes_parse::NoteParser;
use allnotes_scan::{NoteFinder, NoteLoader};

use crate::render::Presenter;
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "allnotes",
    version,
    about = "Merge dated journal entries from many note files",
    long_about = "allnotes finds notes.txt and log.txt files under your home directory, \
                  splits them at every timestamp line and prints all entries in \
                  chronological order. Entries copied between files are shown once."
)]
struct Cli {
    /// Note files to merge (skips discovery)
    files: Vec<PathBuf>,

    /// Home directory (defaults to the current user's)
    #[arg(long)]
    home: Option<PathBuf>,

    /// Directory to search (repeatable, defaults to home)
    #[arg(long = "root")]
    roots: Vec<PathBuf>,

    /// Fallback index of note paths, relative to home
    #[arg(long)]
    index: Option<PathBuf>,

    /// Accepted note file name (repeatable)
    #[arg(long = "name")]
    names: Vec<String>,

    /// Glob of paths to skip (repeatable, added to the defaults)
    #[arg(long)]
    exclude: Vec<String>,

    /// Descend into hidden directories
    #[arg(long)]
    hidden: bool,

    /// Maximum directory depth to search
    #[arg(long)]
    max_depth: Option<u32>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Parse files in parallel
    #[arg(short, long)]
    jobs: bool,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the recognised timestamp formats
    Formats,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let parser = NoteParser::standard().context("Invalid timestamp formats")?;

    match cli.command {
        Some(Command::Formats) => run_formats(&parser),
        None => run_merge(&cli, parser),
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Print every registered format with its rendered example.
fn run_formats(parser: &NoteParser) -> Result<()> {
    let registry = parser.registry();
    let width = registry
        .formats()
        .iter()
        .map(|f| f.name().len())
        .max()
        .unwrap_or(0);

    let mut out = io::stdout().lock();
    for (i, format) in registry.formats().iter().enumerate() {
        let example = registry.example(i).unwrap_or_default();
        writeln!(out, "{:<width$}  {}", format.name(), example)?;
    }
    Ok(())
}

/// Discover, load, merge and print.
fn run_merge(cli: &Cli, parser: NoteParser) -> Result<()> {
    let home = resolve_home(cli)?;

    let paths = if cli.files.is_empty() {
        let config = discovery_config(cli, &home, &Settings::load())?;
        NoteFinder::new()
            .find(&config)
            .context("Failed to discover note files")?
    } else {
        cli.files.clone()
    };
    tracing::info!("Reading {} note files", paths.len());

    let notes = NoteLoader::new(parser)
        .parallel(cli.jobs)
        .load_all(&paths)
        .context("Failed to load notes")?;

    let bytes_read: usize = notes.iter().map(|n| n.text().len()).sum();
    let warnings: usize = notes.iter().map(|n| n.warnings().len()).sum();

    let report = EntryAggregator::new().report(notes);

    tracing::info!(
        "{} entries from {} files ({}), {} duplicates merged, {} warnings",
        report.entries.len(),
        report.notes,
        format_size(bytes_read as u64),
        report.duplicates_merged,
        warnings
    );

    let presenter = Presenter::new(&home);
    let mut out = BufWriter::new(io::stdout().lock());
    match cli.format {
        OutputFormat::Text => presenter.write_text(&mut out, &report.entries)?,
        OutputFormat::Json => presenter.write_json(&mut out, &report.entries)?,
    }
    out.flush()?;

    Ok(())
}

fn resolve_home(cli: &Cli) -> Result<HomeDir> {
    let home = match cli.home {
        Some(ref path) => HomeDir::new(path),
        None => HomeDir::from_env().ok_or_else(|| eyre!("Could not determine home directory"))?,
    };
    canonical_home(&home)
}

/// Discovery compares against canonical paths, so home must be canonical too.
fn canonical_home(home: &HomeDir) -> Result<HomeDir> {
    let path = home
        .path()
        .canonicalize()
        .with_context(|| format!("Invalid home directory {}", home.path().display()))?;
    Ok(HomeDir::new(path))
}

/// Settings file first, then command line flags on top.
fn discovery_config(cli: &Cli, home: &HomeDir, settings: &Settings) -> Result<DiscoveryConfig> {
    let mut builder = DiscoveryConfig::builder();
    builder.home(home.path().to_path_buf());
    settings.apply(&mut builder, home);

    if !cli.roots.is_empty() {
        builder.roots(cli.roots.clone());
    }
    if !cli.names.is_empty() {
        builder.file_names(cli.names.clone());
    }
    if let Some(ref index) = cli.index {
        builder.index_file(Some(index.clone()));
    }
    if cli.hidden {
        builder.include_hidden(true);
    }
    if let Some(depth) = cli.max_depth {
        builder.max_depth(Some(depth));
    }

    let mut config = builder.build().map_err(DiscoveryError::from)?;
    config.exclude.extend(cli.exclude.iter().cloned());

    Ok(config)
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("allnotes").chain(args.iter().copied())).unwrap()
    }

    fn settings() -> Settings {
        Settings {
            roots: vec![PathBuf::from("Documents")],
            file_names: Some(vec!["journal.txt".to_string()]),
            exclude: Some(vec!["**/old/**".to_string()]),
            ..Settings::default()
        }
    }

    #[test]
    fn test_settings_apply_without_flags() {
        let home = HomeDir::new("/home/u");
        let config = discovery_config(&cli(&[]), &home, &settings()).unwrap();

        assert_eq!(config.roots, vec![PathBuf::from("/home/u/Documents")]);
        assert_eq!(config.file_names, vec!["journal.txt".to_string()]);
        assert_eq!(config.exclude, vec!["**/old/**".to_string()]);
    }

    #[test]
    fn test_flags_replace_roots_and_names_but_extend_excludes() {
        let home = HomeDir::new("/home/u");
        let args = cli(&[
            "--root",
            "/srv/a",
            "--name",
            "diary.txt",
            "--exclude",
            "**/tmp/**",
            "--max-depth",
            "3",
        ]);

        let config = discovery_config(&args, &home, &settings()).unwrap();

        assert_eq!(config.roots, vec![PathBuf::from("/srv/a")]);
        assert_eq!(config.file_names, vec!["diary.txt".to_string()]);
        assert_eq!(
            config.exclude,
            vec!["**/old/**".to_string(), "**/tmp/**".to_string()]
        );
        assert_eq!(config.max_depth, Some(3));
    }

    #[test]
    fn test_invalid_name_flag_is_rejected() {
        let home = HomeDir::new("/home/u");
        let args = cli(&["--name", "a/notes.txt"]);

        assert!(discovery_config(&args, &home, &Settings::default()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_home_through_symlink_is_canonical() {
        let temp = tempfile::TempDir::new().unwrap();
        let real = temp.path().join("real");
        std::fs::create_dir(&real).unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let home = canonical_home(&HomeDir::new(&link)).unwrap();

        assert_eq!(home.path(), real.canonicalize().unwrap());
        let note = real.canonicalize().unwrap().join("notes.txt");
        assert_eq!(home.shorten(&note), "~/notes.txt");
    }
}
