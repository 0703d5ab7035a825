//! CLI interface for the resume analyzer

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Resume entity extraction and job description compatibility scoring")]
#[command(long_about = "Extract skills, education, experience and organizations from PDF, DOCX or text resumes \
and score them against a job description with TF-IDF cosine similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    Analyze(AnalyzeArgs),

    /// NER model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to resume file (PDF, DOCX, TXT)
    #[arg(short, long)]
    pub resume: PathBuf,

    /// Path to job description file (plain text)
    #[arg(short, long, conflicts_with = "job_text")]
    pub job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    pub job_text: Option<String>,

    /// Output format: console, json, markdown (defaults to the configured format)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Show diagnostic fields and timings
    #[arg(short, long)]
    pub detailed: bool,

    /// Skip the statistical NER model, use the skill list only
    #[arg(long)]
    pub no_model: bool,
}

#[derive(Subcommand, Debug)]
pub enum ModelAction {
    /// Download the configured NER model from the Hugging Face Hub
    Download {
        /// Force re-download if the model exists
        #[arg(short, long)]
        force: bool,
    },

    /// Show local model status
    Info,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}
