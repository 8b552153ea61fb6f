use anyhow::Result;

use mathscribe::lookup_formula;

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Formula command: search the built-in formula table
pub fn execute(query: &str, format: OutputFormat) -> Result<()> {
    let lookup = lookup_formula(query);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&lookup)?),
        OutputFormat::Text => ui::display_formulas(&lookup),
    }
    Ok(())
}
