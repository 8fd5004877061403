use anyhow::Result;
use console::style;
use stitch_core::config::ConfigManager;

/// Handle the config command
pub fn handle_config_command(manager: &ConfigManager) -> Result<()> {
    match manager.config_path() {
        Some(path) => println!(
            "{} {}",
            style("Configuration loaded from").blue().bold(),
            path.display()
        ),
        None => println!("{}", style("No stitch.toml found; using defaults").blue().bold()),
    }
    println!();
    println!("{}", manager.config().to_toml()?);
    Ok(())
}
