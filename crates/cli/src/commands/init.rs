//! Initialize .vibewall.toml configuration

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use vibewall_core::config::CONFIG_FILENAME;
use vibewall_core::VibewallConfig;

pub fn run(path: Option<&Path>) -> Result<()> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(CONFIG_FILENAME);

    if config_path.exists() {
        println!(
            "  {} {} already exists at {}",
            "\u{26a0}".yellow(),
            CONFIG_FILENAME,
            config_path.display()
        );
        return Ok(());
    }

    let config = VibewallConfig::default();
    config.save(&config_path)?;

    println!(
        "  {} Created {} at {}",
        "\u{2713}".green(),
        CONFIG_FILENAME,
        config_path.display()
    );
    println!("\n  Set GEMINI_API_KEY (or [ai].api_key) for live content, then run:");
    println!("    {}", "vibewall run".bold());

    Ok(())
}
