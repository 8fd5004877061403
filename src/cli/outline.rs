use super::build_assistant;
use super::spinner::Spinner;
use anyhow::Result;
use console::style;
use stitch_core::config::StitchConfig;

/// Handle the outline command
pub async fn handle_outline_command(config: &StitchConfig, request: &str) -> Result<()> {
    let mut assistant = build_assistant(config)?;

    let spinner = Spinner::new("Outlining tutorial...");
    let outline = match assistant.outline(request).await {
        Ok(outline) => {
            spinner.finish_and_clear();
            outline
        }
        Err(err) => {
            spinner.finish_with_error("outline failed");
            return Err(err);
        }
    };

    println!("{} {}", style("Topic:").cyan().bold(), outline.title);
    if let Some(language) = &outline.language {
        println!("{} {}", style("Language:").cyan().bold(), language);
    }

    if outline.directory.is_empty() {
        println!("{}", style("No directory entries were produced").yellow());
        return Ok(());
    }

    println!("{}", style("Directory:").cyan().bold());
    for (idx, title) in outline.directory.iter().enumerate() {
        println!("  {}. {}", idx + 1, title);
    }

    Ok(())
}
