use clap::{ Parser, Subcommand, ValueEnum };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "mathscribe",
    about = "Turns images or descriptions of math problems into LaTeX, a classification and a solution",
    version,
    author,
    long_about = None
)]
pub struct MathscribeCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline on an image file, image URL or data URI
    Image {
        /// Path, http(s) URL or data URI of the image
        source: String,

        /// Write the result as JSON to this file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Run the pipeline on a text description of a problem
    Text {
        /// Problem text; prompts for it when omitted
        problem: Option<String>,

        /// Write the result as JSON to this file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Check a LaTeX snippet for balanced braces and environments
    Check {
        /// LaTeX snippet to check
        latex: String,
    },

    /// Look up well-known formulas
    Formula {
        /// Formula name or topic, e.g. "quadratic"
        query: String,
    },
}
