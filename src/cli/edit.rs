//! `resman edit` command
//!
//! Replaces the fields of an existing resource. Fields not given on the
//! command line keep their current value.
//!
//! # Usage
//! ```bash
//! resman edit k3j9x0a --name "Rust book (2nd ed.)"
//! resman edit k3j9x0a --types Article      # replaces all types
//! resman edit k3j9x0a --types ""           # clears types
//! ```

use anyhow::Result;
use clap::Args;

use super::utils::{find_item, open_manager, report_durability, warn_unregistered};
use crate::config::Config;
use crate::core::item::ItemInput;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// ID of the resource
    pub id: String,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New link
    #[arg(short, long)]
    pub link: Option<String>,

    /// New types (comma-separated, replaces the current ones)
    #[arg(short, long, value_delimiter = ',')]
    pub types: Option<Vec<String>>,
}

pub fn run(args: EditArgs, config: &Config) -> Result<()> {
    let mut manager = open_manager(config)?;

    let mut input = ItemInput::from_item(find_item(&manager, &args.id)?);
    if let Some(name) = args.name {
        input.name = name;
    }
    if let Some(description) = args.description {
        input.description = description;
    }
    if let Some(link) = args.link {
        input.link = link;
    }
    if let Some(types) = args.types {
        input.types = types;
    }

    let applied = manager.create_or_update(input, Some(&args.id))?;
    warn_unregistered(&manager, &applied.value.types);
    report_durability(&applied.durability);

    println!("✅ Resource updated: {}", applied.value);
    Ok(())
}
