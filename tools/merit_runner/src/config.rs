//! CLI arguments with environment variable fallbacks.

use clap::Parser;
use merit_core::export::ExportConfig;
use std::path::PathBuf;

/// Aggregate OCR extraction results into a ranked merit list.
#[derive(Parser, Debug, Clone)]
#[command(name = "merit_runner")]
#[command(about = "Collate marksheet and certificate extractions into a merit list")]
pub struct Args {
    /// Marksheet results: a directory of per-file JSON results or one JSON batch file
    #[arg(long, env = "MERIT_MARKSHEETS", default_value = "marksheets")]
    pub marksheets: PathBuf,

    /// Certificate results: a directory of per-file JSON results or one JSON batch file
    #[arg(long, env = "MERIT_CERTIFICATES", default_value = "certificates")]
    pub certificates: PathBuf,

    /// Directory the store dump, merit list JSON and CSV are written to
    #[arg(long, env = "MERIT_OUTPUT_DIR", default_value = "extraction_results")]
    pub output_dir: PathBuf,

    /// Rank only students of this course (exact match)
    #[arg(long, env = "MERIT_COURSE")]
    pub course: Option<String>,

    /// Number of merit list rows printed after the run
    #[arg(long, env = "MERIT_TOP", default_value = "10")]
    pub top: usize,

    /// Print the run summary as JSON instead of the merit table
    #[arg(long, env = "MERIT_SUMMARY_JSON", default_value = "false")]
    pub summary_json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(course) = &self.course {
            if course.trim().is_empty() {
                return Err("course filter must not be empty".to_string());
            }
        }
        Ok(())
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig::with_output_dir(&self.output_dir)
    }
}
