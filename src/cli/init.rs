//! `resman init` command
//!
//! Initializes a new resman repository.
//!
//! # Usage
//! ```bash
//! resman init                    # Initialize in current directory
//! resman init /path/to/project   # Initialize in specific path
//! resman init --global           # Initialize global ~/.resman
//! ```

use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::config::{Config, RESMAN_DIR};
use crate::core::manager::ResourceManager;
use crate::core::storage::SqliteBackend;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to initialize (default: current directory)
    pub path: Option<PathBuf>,

    /// Initialize global repository (~/.resman)
    #[arg(long)]
    pub global: bool,

    /// Force re-initialization
    #[arg(short, long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    // 1. Determine target directory
    let resman_dir = if args.global {
        Config::global_dir().context("Could not determine home directory")?
    } else {
        args.path
            .unwrap_or_else(|| PathBuf::from("."))
            .join(RESMAN_DIR)
    };

    // 2. Check if already initialized
    if resman_dir.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to reinitialize.",
            resman_dir.display()
        );
    }

    println!("🚀 Initializing resman in: {}", resman_dir.display());

    // 3. Create directory and config file
    fs::create_dir_all(&resman_dir)?;
    let config_path = resman_dir.join("config.toml");
    Config::default().save_to(&config_path)?;

    // 4. Create database (an existing one is kept as is)
    let db_path = resman_dir.join("data.db");
    let backend = SqliteBackend::open(&db_path)
        .with_context(|| format!("Failed to create database {}", db_path.display()))?;
    let manager = ResourceManager::open(backend);

    println!("\n✅ Initialized resman repository");
    println!("   Config: {}", config_path.display());
    println!("   Database: {}", db_path.display());
    println!("   Types: {}", manager.types().join(", "));
    println!("\nNext steps:");
    println!("  resman add \"Rust book\" --link doc.rust-lang.org/book --types Article");
    println!("  resman ls");

    Ok(())
}
