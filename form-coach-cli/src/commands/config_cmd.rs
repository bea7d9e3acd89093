use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::config::Config;

pub async fn show_config(config: &Config) -> Result<()> {
    let config_str = toml::to_string_pretty(config)?;

    println!("{}", "Current Configuration".bold());
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);

    Ok(())
}

pub async fn show_path(config_file: &Path) -> Result<()> {
    println!("{}", config_file.display());
    Ok(())
}

pub async fn init_config(config_file: &Path, force: bool) -> Result<()> {
    if config_file.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_file.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save_to(config_file)?;
    tracing::info!(path = %config_file.display(), "Wrote default configuration");

    println!("{} Configuration initialized at: {}", "✓".green(), config_file.display());

    Ok(())
}
