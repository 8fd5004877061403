use anyhow::{Context, Result};
use console::style;
use std::path::Path;
use stitch_core::config::StitchConfig;

/// Handle the init command
pub fn handle_init_command(workspace: &Path, force: bool) -> Result<()> {
    println!("{}", style("Initialize Stitch configuration").blue().bold());
    println!("Workspace: {}", workspace.display());

    let created = StitchConfig::bootstrap_project(workspace, force)
        .with_context(|| "failed to initialize configuration files")?;

    if created.is_empty() {
        println!(
            "{} stitch.toml already exists (use --force to overwrite)",
            style("Skipped:").yellow().bold()
        );
    }
    for file in created {
        println!("{} {}", style("Created").green().bold(), file);
    }

    Ok(())
}
