use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Input };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use mathscribe::{ FormulaLookup, PipelineOutput, SyntaxReport };

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn term_width() -> usize {
    (Term::stdout().size().1 as usize).max(40)
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text with proper wrapping
pub fn print_text(text: &str) {
    let width = term_width();
    for line in text.lines() {
        for wrapped_line in wrap(line, width.saturating_sub(10)) {
            println!("{}", wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Ask the user for a problem description
pub fn get_problem_text() -> std::io::Result<String> {
    Input::with_theme(&get_theme())
        .with_prompt("Describe the math problem")
        .interact_text()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Display a completed pipeline run
pub fn display_output(output: &PipelineOutput) {
    print_header("Problem");
    print_text(&output.problem_text);

    print_header("LaTeX");
    println!("{}", output.latex.cyan());
    if !output.latex_description.is_empty() {
        println!();
        print_text(&output.latex_description);
    }

    print_header("Classification");
    print_result("Category", &output.classification.category);
    print_result("Difficulty", &output.classification.difficulty);
    print_result("Reasoning", &output.classification.reasoning);

    print_header("Solution");
    if output.solution.steps.is_empty() {
        print_warning("No solution steps were produced");
    }
    for (i, step) in output.solution.steps.iter().enumerate() {
        print_text(&format!("{}. {}", i + 1, step));
    }
    print_result("Final answer", &output.solution.final_answer.green().bold().to_string());

    if output.quality_issues().is_empty() {
        print_success("LaTeX passed quality review");
    } else {
        print_header("Quality Issues");
        for issue in output.quality_issues() {
            println!("- {}", issue);
        }
    }
}

pub fn display_syntax_report(report: &SyntaxReport) {
    if report.valid {
        print_success("LaTeX is balanced");
        return;
    }
    print_warning(&format!("Found {} issue(s)", report.issues.len()));
    for issue in &report.issues {
        println!("- {}", issue);
    }
}

pub fn display_formulas(lookup: &FormulaLookup) {
    if !lookup.found {
        print_info("No matching formulas");
        return;
    }
    for entry in &lookup.results {
        print_header(&entry.name);
        print_result("Key", &entry.key);
        print_result("LaTeX", &entry.latex.cyan().to_string());
        print_text(&entry.description);
    }
}
