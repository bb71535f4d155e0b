//! CLI utility functions
//!
//! Common helper functions shared across CLI commands:
//! - Opening the manager on the configured database
//! - Reporting durability of a mutation
//! - Reading comma-separated tag lists

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Config;
use crate::core::durability::Durability;
use crate::core::item::Item;
use crate::core::manager::ResourceManager;
use crate::core::storage::SqliteBackend;

/// Open the manager on the database chosen by [`Config::database_path`]
pub fn open_manager(config: &Config) -> Result<ResourceManager<SqliteBackend>> {
    let db_path = config.database_path();
    let backend = SqliteBackend::open(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    Ok(ResourceManager::open(backend))
}

/// Look an item up by id or fail with a readable message
pub fn find_item<'a>(
    manager: &'a ResourceManager<SqliteBackend>,
    id: &str,
) -> Result<&'a Item> {
    manager
        .item(id)
        .ok_or_else(|| anyhow::anyhow!("Resource not found: {}", id))
}

/// Tell the user when a change did not reach the database
pub fn report_durability(durability: &Durability) {
    if let Some(err) = durability.error() {
        eprintln!(
            "{} change applied but not saved: {}",
            "⚠".yellow(),
            err
        );
    }
}

/// Warn about tags that are not in the registry
pub fn warn_unregistered(manager: &ResourceManager<SqliteBackend>, types: &[String]) {
    for tag in types {
        if !manager.registry().contains(tag) {
            eprintln!(
                "{} type '{}' is not registered (add it with: resman types add {})",
                "⚠".yellow(),
                tag,
                tag
            );
        }
    }
}
