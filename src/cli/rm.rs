//! `resman rm` command
//!
//! Deletes a resource after confirmation.
//!
//! # Usage
//! ```bash
//! resman rm k3j9x0a
//! resman rm k3j9x0a --yes
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::Confirm;

use super::utils::{open_manager, report_durability};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// ID of the resource
    pub id: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

pub fn run(args: RmArgs, config: &Config) -> Result<()> {
    let mut manager = open_manager(config)?;

    let Some(item) = manager.item(&args.id) else {
        println!("{} no resource with id {}", "ℹ".blue(), args.id);
        return Ok(());
    };

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete this resource? {}", item))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    let applied = manager.delete(&args.id);
    report_durability(&applied.durability);
    if let Some(removed) = applied.value {
        println!("🗑  Deleted {}", removed);
    }

    Ok(())
}
