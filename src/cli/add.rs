//! `resman add` command
//!
//! Adds a new resource.
//!
//! # Usage
//! ```bash
//! resman add "Rust book"
//! resman add "Rust book" --link doc.rust-lang.org/book
//! resman add "Rust book" --types Article,Tool -d "The official book"
//! ```

use anyhow::Result;
use clap::Args;

use super::utils::{open_manager, report_durability, warn_unregistered};
use crate::config::Config;
use crate::core::item::ItemInput;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Name of the resource
    pub name: String,

    /// Description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Link (https:// is added when no scheme is given)
    #[arg(short, long, default_value = "")]
    pub link: String,

    /// Types (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub types: Vec<String>,
}

pub fn run(args: AddArgs, config: &Config) -> Result<()> {
    let mut manager = open_manager(config)?;

    let input = ItemInput::new(args.name)
        .with_description(args.description)
        .with_link(args.link)
        .with_types(args.types);

    let applied = manager.create_or_update(input, None)?;
    warn_unregistered(&manager, &applied.value.types);
    report_durability(&applied.durability);

    let item = &applied.value;
    println!("✅ Resource added: {}", item.id);
    println!("   Name: {}", item.name);
    if !item.link.is_empty() {
        println!("   Link: {}", item.link);
    }
    if !item.types.is_empty() {
        println!("   Types: {}", item.types.join(", "));
    }

    Ok(())
}
