//! # subfuse CLI
//!
//! The `subfuse` binary fetches the configured subscription lists, merges
//! their lines, and republishes them as size-bounded base64 files.
//!
//! ## Usage
//!
//! ```bash
//! subfuse --config ./subfuse.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `subfuse run` | Fetch all sources and write the output files |
//! | `subfuse run --dry-run` | Show line and chunk counts without writing |
//! | `subfuse sources` | List configured sources and their kinds |
//!
//! When the config file does not exist, the embedded default configuration
//! is used, so `subfuse run` works with no setup at all.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use subfuse::config::{self, Config};
use subfuse::{chunk, fetch, output};

/// subfuse — fetches remote subscription lists and republishes them as
/// size-bounded base64 files.
#[derive(Parser)]
#[command(
    name = "subfuse",
    about = "Aggregates remote subscription lists into size-bounded base64 files",
    version,
    long_about = "subfuse fetches a configured set of plain-text and base64-encoded \
    subscription lists, merges their lines in declared order, packs them into chunks \
    that respect a per-file size budget, and writes each chunk to disk as a \
    base64-encoded file, replacing the output of the previous run."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When the file does not exist, the embedded default configuration
    /// (published source lists, 1 MiB files in the current directory) is
    /// used instead.
    #[arg(long, global = true, default_value = "./subfuse.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch all sources, merge their lines, and write base64 output files.
    ///
    /// Output files from previous runs are removed first. A failing source
    /// or a failing file write is logged and skipped; neither aborts the
    /// run.
    Run {
        /// Show line and chunk counts without touching the filesystem.
        #[arg(long)]
        dry_run: bool,
    },

    /// List configured sources and their kinds.
    ///
    /// Plain-text sources are listed first, then base64 sources, in the
    /// order they will be fetched.
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Run { dry_run } => run(&cfg, dry_run).await?,
        Commands::Sources => list_sources(&cfg),
    }

    Ok(())
}

async fn run(cfg: &Config, dry_run: bool) -> anyhow::Result<()> {
    let client = fetch::build_client(Duration::from_secs(cfg.fetch.timeout_secs))?;
    let sources = cfg.declared_sources();

    let (lines, fetch_report) = fetch::fetch_all(&client, &sources).await;
    let chunks = chunk::pack_lines(&lines, cfg.output.raw_threshold(), chrono::Utc::now());

    if dry_run {
        println!("run (dry-run)");
        println!("  sources ok: {}", fetch_report.sources_ok);
        println!("  sources skipped: {}", fetch_report.sources_skipped);
        println!("  lines gathered: {}", lines.len());
        println!("  chunks planned: {}", chunks.len());
        for chunk in &chunks {
            println!("  would write {}", output::file_name(&cfg.output, chunk.index));
        }
        return Ok(());
    }

    std::fs::create_dir_all(&cfg.output.dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            cfg.output.dir.display()
        )
    })?;
    let removed = output::clean_stale_files(&cfg.output)?;

    if chunks.is_empty() {
        println!("run");
        println!("  sources ok: {}", fetch_report.sources_ok);
        println!("  sources skipped: {}", fetch_report.sources_skipped);
        println!("  stale files removed: {}", removed);
        println!("  no content to process");
        return Ok(());
    }

    let write_report = output::write_chunks(&cfg.output, &chunks);

    println!("run");
    println!("  sources ok: {}", fetch_report.sources_ok);
    println!("  sources skipped: {}", fetch_report.sources_skipped);
    println!("  lines gathered: {}", lines.len());
    println!("  stale files removed: {}", removed);
    println!("  files written: {}", write_report.files_written);
    if write_report.files_failed > 0 {
        println!("  files failed: {}", write_report.files_failed);
    }
    println!("  encoded bytes: {}", write_report.bytes_written);
    println!("ok");

    Ok(())
}

fn list_sources(cfg: &Config) {
    println!("{:<8} URL", "KIND");
    for source in cfg.declared_sources() {
        println!("{:<8} {}", source.kind.label(), source.url);
    }
}
