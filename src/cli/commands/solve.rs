use anyhow::{ anyhow, bail, Result };
use std::fs;
use std::path::Path;

use mathscribe::{ ImageRef, MathPipeline, PipelineResult };

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Accepts a URL, a data URI or a local file path
pub fn resolve_image(source: &str) -> Result<ImageRef> {
    let trimmed = source.trim();
    let image = if
        trimmed.starts_with("http://") ||
        trimmed.starts_with("https://") ||
        trimmed.starts_with("data:")
    {
        ImageRef::parse(trimmed)?
    } else {
        ImageRef::from_file(Path::new(trimmed))?
    };
    Ok(image)
}

/// Image command: transcribe and process an image
pub async fn execute_image<P: MathPipeline>(
    pipeline: &P,
    source: &str,
    format: OutputFormat,
    save: Option<&Path>
) -> Result<()> {
    if format == OutputFormat::Text {
        ui::print_header("Processing Image");
    }
    let image = resolve_image(source)?;

    let spinner = ui::spinner_with_message("Transcribing and solving...");
    let result = pipeline.run_on_image(&image).await;
    spinner.finish_and_clear();

    report(&result, format, save)
}

/// Text command: process a problem description
pub async fn execute_text<P: MathPipeline>(
    pipeline: &P,
    problem: Option<&str>,
    format: OutputFormat,
    save: Option<&Path>
) -> Result<()> {
    let problem = match problem {
        Some(text) => text.to_string(),
        None => ui::get_problem_text()?,
    };

    if format == OutputFormat::Text {
        ui::print_header("Processing Problem");
    }

    let spinner = ui::spinner_with_message("Solving...");
    let result = pipeline.run_on_text(&problem).await;
    spinner.finish_and_clear();

    report(&result, format, save)
}

fn report(result: &PipelineResult, format: OutputFormat, save: Option<&Path>) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => {
            if let PipelineResult::Completed(output) = result {
                ui::display_output(output);
            }
        }
    }

    if let Some(path) = save {
        let document =
            serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "result": result,
        });
        fs::write(path, serde_json::to_string_pretty(&document)?).map_err(|e|
            anyhow!("Failed to write {}: {}", path.display(), e)
        )?;
        if format == OutputFormat::Text {
            ui::print_success(&format!("Result saved to {}", path.display()));
        }
    }

    if let Some(message) = result.error_message() {
        bail!(message);
    }
    Ok(())
}
