//! Config command handler

use crate::args::ConfigSubcommand;
use coursereg::config::Config;
use std::io::{self, Write};

/// Keys accepted by `config get/set/unset`
const KNOWN_KEYS: &[&str] = &[
    "level",
    "file",
    "verbose",
    "credit_ceiling",
    "data_dir",
    "catalog_file",
];

/// Dispatch config subcommands
///
/// # Errors
/// Returns a message for unknown keys, invalid values or save failures
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None => handle_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_reset(),
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "✗ Unknown config key: '{key}' (known keys: {})",
        KNOWN_KEYS.join(", ")
    )
}

fn handle_get(config: &Config, key: Option<String>) -> Result<(), String> {
    if let Some(k) = key {
        let value = config.get(&k).ok_or_else(|| unknown_key(&k))?;
        println!("{value}");
    } else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
    }
    Ok(())
}

fn handle_set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    if !KNOWN_KEYS.contains(&key) {
        return Err(unknown_key(key));
    }
    config.set(key, value).map_err(|e| format!("✗ {e}"))?;
    config
        .save()
        .map_err(|e| format!("✗ Failed to save config: {e}"))?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn handle_unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    if !KNOWN_KEYS.contains(&key) {
        return Err(unknown_key(key));
    }
    config.unset(key, defaults).map_err(|e| format!("✗ {e}"))?;
    config
        .save()
        .map_err(|e| format!("✗ Failed to save config: {e}"))?;
    println!("✓ Reset {key} to default");
    Ok(())
}

fn handle_reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let answer = response.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Config::reset().map_err(|e| format!("✗ Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
