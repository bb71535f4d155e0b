//! `resman show` command
//!
//! Shows one resource as a card.
//!
//! # Usage
//! ```bash
//! resman show k3j9x0a
//! resman show k3j9x0a --format json
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;

use super::utils::{find_item, open_manager};
use crate::config::Config;
use crate::core::item::Item;

#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ShowFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// ID of the resource
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: ShowFormat,
}

pub fn run(args: ShowArgs, config: &Config) -> Result<()> {
    let manager = open_manager(config)?;
    let item = find_item(&manager, &args.id)?;

    match args.format {
        ShowFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
        ShowFormat::Pretty => print_card(item, config),
    }

    Ok(())
}

fn print_card(item: &Item, config: &Config) {
    let rule = "─".repeat(41);
    println!("\n{}", rule);
    print!("{}", item.name.bold());
    for tag in &item.types {
        print!("  {}", format!("[{}]", tag).cyan());
    }
    println!();
    println!("{}", rule);
    if !item.description.is_empty() {
        println!("{}", item.description);
    }
    if !item.link.is_empty() {
        println!("{}", item.link.underline());
    }
    if let Some(created) = item.created_at_utc() {
        println!("Created: {}", config.display.format_date(created));
    }
    println!("{}", format!("ID: {}", item.id).dimmed());
    println!("{}", rule);
}
