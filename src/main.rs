//! resman CLI - Entry point
//!
//! Usage: resman <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resman::cli::{Cli, Commands};
use resman::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise warnings only, debug with --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "resman=debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.as_deref();
    let load_config = || Config::load_with(config_path);

    match cli.command {
        Commands::Init(args) => resman::cli::init::run(args),
        Commands::Config(args) => resman::cli::config::run(args, config_path),
        Commands::Add(args) => resman::cli::add::run(args, &load_config()?),
        Commands::Edit(args) => resman::cli::edit::run(args, &load_config()?),
        Commands::Rm(args) => resman::cli::rm::run(args, &load_config()?),
        Commands::Ls(args) => resman::cli::browse::run_ls(args, &load_config()?),
        Commands::Show(args) => resman::cli::show::run(args, &load_config()?),
        Commands::Types(args) => resman::cli::types::execute(args, &load_config()?),
        Commands::Export(args) => resman::cli::transfer::run_export(args, &load_config()?),
        Commands::Import(args) => resman::cli::transfer::run_import(args, &load_config()?),
    }
}
