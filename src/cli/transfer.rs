//! `resman export` and `resman import` commands
//!
//! # Usage
//! ```bash
//! resman export                   # writes resources.json
//! resman export -o backup.json --force
//! resman export --stdout > backup.json
//!
//! resman import backup.json       # replaces every resource
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::Confirm;

use super::utils::{open_manager, report_durability};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file (default: export.file_name from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Overwrite an existing file without asking
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file containing an array of resources
    pub file: PathBuf,
}

pub fn run_export(args: ExportArgs, config: &Config) -> Result<()> {
    let manager = open_manager(config)?;
    let document = manager.export_collection()?;

    if args.stdout {
        println!("{}", document);
        return Ok(());
    }

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.export.file_name));

    if path.exists() && !args.force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Cancelled");
            return Ok(());
        }
    }

    fs::write(&path, document)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!(
        "✅ Exported {} resource(s) to {}",
        manager.items().len(),
        path.display()
    );

    Ok(())
}

pub fn run_import(args: ImportArgs, config: &Config) -> Result<()> {
    // Read the whole file before touching the collection
    let document = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let mut manager = open_manager(config)?;
    let applied = manager
        .import_collection(&document)
        .with_context(|| format!("Failed to import {}", args.file.display()))?;
    report_durability(&applied.durability);

    println!("✅ Imported {} resource(s) from {}", applied.value, args.file.display());
    Ok(())
}
