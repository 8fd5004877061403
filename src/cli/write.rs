use super::spinner::Spinner;
use super::{build_assistant, output_root};
use anyhow::Result;
use console::style;
use std::path::Path;
use stitch_core::config::StitchConfig;
use stitch_core::llm::error_display;
use stitch_core::tutorial::TutorialWriter;

/// Handle the write command
pub async fn handle_write_command(
    config: &StitchConfig,
    workspace: &Path,
    request: &str,
) -> Result<()> {
    let mut assistant = build_assistant(config)?;
    println!(
        "{} {} {}",
        style(format!("{}:", assistant.profile().name)).yellow().bold(),
        style("writing tutorial with").dim(),
        style(&config.agent.default_model).cyan()
    );

    let spinner = Spinner::new("Understanding request, outlining and writing sections...");
    let report = match assistant.run(request).await {
        Ok(report) => {
            spinner.finish_and_clear();
            report
        }
        Err(err) => {
            spinner.finish_with_error("tutorial failed");
            return Err(err);
        }
    };

    let document = &report.document;
    if document.is_empty() {
        println!(
            "{}",
            error_display::format_llm_warning(
                &config.agent.provider,
                "returned no directory entries; nothing to write"
            )
        );
        return Ok(());
    }

    println!("{}", document.to_markdown());

    if config.output.save {
        let writer = TutorialWriter::new(output_root(config, workspace));
        let path = writer.write(document).await?;
        println!(
            "{} {}",
            style("Saved tutorial to").green().bold(),
            path.display()
        );
    }

    Ok(())
}
