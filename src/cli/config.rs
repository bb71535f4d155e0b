//! `resman config` command
//!
//! Get or set configuration values.
//!
//! # Usage
//! ```bash
//! resman config                              # Show effective config
//! resman config export.file_name             # Get specific value
//! resman config export.file_name backup.json # Set value
//! resman config --path                       # Show config locations
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::config::{Config, RESMAN_DIR};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config key (e.g., export.file_name, display.date_format)
    pub key: Option<String>,

    /// Value to set
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Use global config (~/.resman/config.toml) instead of local
    #[arg(short, long)]
    pub global: bool,
}

fn get_config_path(global: bool) -> PathBuf {
    if global {
        Config::global_config_path().unwrap_or_else(|| PathBuf::from(RESMAN_DIR).join("config.toml"))
    } else {
        Config::find_local_config().unwrap_or_else(|| PathBuf::from(RESMAN_DIR).join("config.toml"))
    }
}

pub fn run(args: ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => get_config_path(args.global),
    };

    if args.path {
        println!("Global: {}", get_config_path(true).display());
        println!("Local:  {}", get_config_path(false).display());
        println!();
        if config_path.exists() {
            println!("✓ Active: {}", config_path.display());
        } else {
            println!("⚠ No config file found at {}", config_path.display());
        }
        return Ok(());
    }

    let Some(key) = &args.key else {
        // No key: print the effective configuration, defaults included
        let config = if config_path.exists() {
            Config::load_from(&config_path)?
        } else {
            Config::default()
        };
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    };

    match &args.value {
        Some(value) => {
            set_config_value(&config_path, key, value)?;
            println!("✅ Set {} = {} (in {})", key, value, config_path.display());
        }
        None => match get_config_value(&config_path, key)? {
            Some(v) => println!("{}", v),
            None => println!("(not set)"),
        },
    }

    Ok(())
}

/// Set a nested config value using dot notation (e.g., "display.date_format")
fn set_config_value(path: &Path, key: &str, val: &str) -> Result<()> {
    use toml_edit::{value, DocumentMut};

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = content.parse().context("Failed to parse config.toml")?;

    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        [top] => doc[*top] = value(parse_toml_value(val)),
        [section, field] => {
            if doc.get(section).is_none() {
                doc[*section] = toml_edit::table();
            }
            doc[*section][*field] = value(parse_toml_value(val));
        }
        _ => bail!("Key too deep: {}. Max depth is section.key", key),
    }

    // Refuse values that would make the config unloadable
    toml::from_str::<Config>(&doc.to_string())
        .map_err(anyhow::Error::from)
        .and_then(|config| config.validate())
        .with_context(|| format!("Invalid value for {}: {}", key, val))?;

    fs::write(path, doc.to_string())?;
    Ok(())
}

/// Get a config value by dot notation key
fn get_config_value(path: &Path, key: &str) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let doc: toml::Value = content.parse().context("Failed to parse config.toml")?;

    let parts: Vec<&str> = key.split('.').collect();

    let val = match parts.as_slice() {
        [top] => doc.get(top),
        [section, field] => doc.get(section).and_then(|t| t.get(field)),
        _ => None,
    };

    Ok(val.map(|v| match v {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }))
}

/// Parse string value to appropriate TOML type
fn parse_toml_value(s: &str) -> toml_edit::Value {
    if s == "true" {
        return true.into();
    }
    if s == "false" {
        return false.into();
    }

    if let Ok(i) = s.parse::<i64>() {
        return i.into();
    }

    if let Ok(f) = s.parse::<f64>() {
        return f.into();
    }

    s.into()
}
