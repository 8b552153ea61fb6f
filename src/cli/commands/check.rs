use anyhow::Result;

use mathscribe::check_latex_syntax;

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Check command: run the local balance checker
pub fn execute(latex: &str, format: OutputFormat) -> Result<()> {
    let report = check_latex_syntax(latex);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            ui::print_header("LaTeX Syntax Check");
            ui::display_syntax_report(&report);
        }
    }
    Ok(())
}
