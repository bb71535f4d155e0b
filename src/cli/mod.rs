//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod add;
pub mod browse;
pub mod config;
pub mod edit;
pub mod init;
pub mod rm;
pub mod show;
pub mod transfer;
pub mod types;
pub mod utils;

/// resman - personal resource manager
///
/// Keep a catalog of tagged links, export it and restore it.
#[derive(Parser, Debug)]
#[command(name = "resman")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "RESMAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new resman repository
    Init(init::InitArgs),

    /// Add a new resource
    Add(add::AddArgs),

    /// Edit a resource
    Edit(edit::EditArgs),

    /// Delete a resource
    Rm(rm::RmArgs),

    /// List resources, newest first
    Ls(browse::LsArgs),

    /// Show a resource by ID
    Show(show::ShowArgs),

    /// List, add or remove types
    Types(types::TypesArgs),

    /// Export all resources as JSON
    Export(transfer::ExportArgs),

    /// Replace all resources from a JSON file
    Import(transfer::ImportArgs),

    /// Get or set configuration
    Config(config::ConfigArgs),
}
