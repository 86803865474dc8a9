//! Distsweep CLI - removes orphaned TypeScript build outputs
//!
//! Reads `rootDir` and `outDir` from a tsconfig-style file, walks the output
//! tree, deletes generated files whose source is gone, and prunes emptied
//! directories. `--watch` keeps doing so on filesystem changes.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use distsweep::config::ProjectConfig;
use distsweep::fs::LocalFs;
use distsweep::reconcile::{reconcile, ReconcileEvent};
use distsweep::watcher::{watch, WatchEvent, WatchOptions, DEFAULT_DEBOUNCE_MS};

/// Distsweep - removes orphaned TypeScript build outputs
#[derive(Parser, Debug)]
#[command(name = "distsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to tsconfig.json
    #[arg(short, long, default_value = "./tsconfig.json")]
    project: PathBuf,

    /// Keep watching both trees and reconcile on changes
    #[arg(short, long)]
    watch: bool,

    /// Debounce window for watch mode, in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce: u64,

    /// Show per-directory and per-file diagnostics
    #[arg(short, long)]
    verbose: bool,

    /// Suppress REMOVED notices
    #[arg(short, long)]
    silent: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        println!(
            "Reading \"rootDir\" and \"outDir\" from \"{}\".",
            cli.project.display()
        );
    }

    let config = ProjectConfig::load(&cli.project)?;

    if cli.verbose {
        let resolved = serde_json::json!({
            "src": config.source_root.display().to_string(),
            "dist": config.output_root.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    }

    if cli.watch {
        cmd_watch(config, &cli)
    } else {
        cmd_run(config, &cli)
    }
}

fn cmd_run(config: ProjectConfig, cli: &Cli) -> Result<()> {
    if cli.verbose {
        println!("Starting single pass.");
    }

    reconcile(&config, &LocalFs::new(), |event| {
        render_reconcile(&event, &config, cli);
    })?;

    Ok(())
}

fn cmd_watch(config: ProjectConfig, cli: &Cli) -> Result<()> {
    if cli.verbose {
        println!("Starting watch mode.");
    }

    let running = Arc::new(AtomicBool::new(true));
    let running_in_handler = running.clone();
    ctrlc::set_handler(move || {
        running_in_handler.store(false, Ordering::SeqCst);
    })?;

    let options = WatchOptions {
        config: config.clone(),
        debounce: Duration::from_millis(cli.debounce),
    };

    watch(&options, running, |event| match event {
        WatchEvent::Started {
            output_root,
            source_root,
        } => {
            if cli.verbose {
                println!(
                    "Watching for changes in \"{}\" and removals in \"{}\".",
                    output_root.display(),
                    source_root.display()
                );
            }
        }
        WatchEvent::Reconcile(inner) => render_reconcile(&inner, &config, cli),
        WatchEvent::PassComplete => {
            if cli.verbose {
                println!();
                println!(
                    "Watching for changes in \"{}\" and removals in \"{}\".",
                    config.output_root.display(),
                    config.source_root.display()
                );
            }
        }
        WatchEvent::PassFailed { message } => {
            eprintln!("reconciliation failed: {message}");
        }
        WatchEvent::Shutdown => {
            if cli.verbose {
                println!("Shutting down.");
            }
        }
    })?;

    Ok(())
}

fn render_reconcile(event: &ReconcileEvent, config: &ProjectConfig, cli: &Cli) {
    match event {
        ReconcileEvent::EnterDir { path } => {
            if cli.verbose {
                println!("{}:", path.display());
            }
        }
        ReconcileEvent::Kept { output, source } => {
            if cli.verbose {
                println!("OK: \"{}\" => \"{}\"", output.display(), source.display());
            }
        }
        ReconcileEvent::Removed { path } => {
            if cli.verbose {
                println!(
                    "No match for \"{}\" in \"{}\".",
                    path.display(),
                    config.source_root.display()
                );
            }
            if !cli.silent {
                println!("REMOVED: \"{}\"", path.display());
            }
        }
        ReconcileEvent::PrunedDir { path } => {
            if cli.verbose {
                println!("Removed empty directory \"{}\".", path.display());
            }
        }
    }
}
