//! `resman types` command
//!
//! Manages the type registry. Removing a type leaves resources tagged with
//! it untouched.
//!
//! # Usage
//! ```bash
//! resman types                # list with usage counts
//! resman types list --json
//! resman types add Book
//! resman types rm Book
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::utils::{open_manager, report_durability};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct TypesArgs {
    #[command(subcommand)]
    pub action: Option<TypesAction>,
}

#[derive(Subcommand, Debug)]
pub enum TypesAction {
    /// List registered types
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a type
    Add {
        /// Type name
        name: String,
    },

    /// Unregister a type
    Rm {
        /// Type name
        name: String,
    },
}

pub fn execute(args: TypesArgs, config: &Config) -> Result<()> {
    let mut manager = open_manager(config)?;

    match args.action.unwrap_or(TypesAction::List { json: false }) {
        TypesAction::List { json } => {
            let usage = manager.registry().usage(manager.items());

            if json {
                let counts = |tags: &[(String, usize)]| {
                    tags.iter()
                        .map(|(t, n)| serde_json::json!({"name": t, "count": n}))
                        .collect::<Vec<_>>()
                };
                let json = serde_json::json!({
                    "registered": counts(&usage.registered),
                    "unregistered": counts(&usage.unregistered),
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
                return Ok(());
            }

            println!("🏷  Types\n");
            if usage.registered.is_empty() {
                println!("  (none)");
            }
            for (tag, count) in &usage.registered {
                println!("  {} ({} resources)", tag, count);
            }
            if !usage.unregistered.is_empty() {
                println!("\n{} In use but not registered:", "⚠".yellow());
                for (tag, count) in &usage.unregistered {
                    println!("  {} ({} resources)", tag.dimmed(), count);
                }
            }
        }
        TypesAction::Add { name } => {
            let before = manager.types().len();
            let applied = manager.add_type(&name);
            report_durability(&applied.durability);
            if applied.value.len() > before {
                println!("✅ Added type: {}", name.trim());
            } else {
                println!(
                    "{} nothing to add ('{}' is empty or already registered)",
                    "ℹ".blue(),
                    name.trim()
                );
            }
        }
        TypesAction::Rm { name } => {
            let existed = manager.registry().contains(&name);
            let applied = manager.remove_type(&name);
            report_durability(&applied.durability);
            if existed {
                println!("🗑  Removed type: {}", name);
            } else {
                println!("{} type '{}' was not registered", "ℹ".blue(), name);
            }
        }
    }

    Ok(())
}
