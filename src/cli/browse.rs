//! `resman ls` command
//!
//! Lists resources, newest first.
//!
//! # Usage
//! ```bash
//! resman ls
//! resman ls --type Video
//! resman ls --format json
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::utils::open_manager;
use crate::config::Config;
use crate::core::item::Item;

#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct LsArgs {
    /// Only resources with this type
    #[arg(short = 't', long = "type")]
    pub tag: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ListFormat,
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Types")]
    types: String,
    #[tabled(rename = "Link")]
    link: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl Row {
    fn new(item: &Item, config: &Config) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            types: item.types.join(", "),
            link: item.link.clone(),
            description: truncate(&item.description, config.display.description_width),
            created: item
                .created_at_utc()
                .map(|dt| config.display.format_date(dt))
                .unwrap_or_default(),
        }
    }
}

pub fn run_ls(args: LsArgs, config: &Config) -> Result<()> {
    let manager = open_manager(config)?;

    let items: Vec<&Item> = match &args.tag {
        Some(tag) => manager.items_tagged(tag).collect(),
        None => manager.items_newest_first().collect(),
    };

    if let ListFormat::Json = args.format {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No resources yet. Add one with: resman add <name>");
        return Ok(());
    }

    let rows: Vec<Row> = items.iter().map(|it| Row::new(it, config)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    println!("{} resource(s)", items.len());

    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", cut)
}
