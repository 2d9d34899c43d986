use crate::adapters::http::DEFAULT_API_BASE;
use crate::core::{ConfigProvider, FetchMode};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_url, Validate,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_OUTPUT: &str = "ucla_courses_requiring_calc1.xlsx";

#[derive(Debug, Clone, Parser)]
#[command(name = "prereq-etl")]
#[command(about = "Find UCLA courses that list Mathematics 31A as a prerequisite")]
pub struct CliConfig {
    /// Output spreadsheet path
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,

    /// Also save a CSV copy alongside the spreadsheet
    #[arg(long)]
    pub csv: bool,

    /// Fetch every subject area individually (slower, ~5 min) instead of using the search endpoint
    #[arg(long)]
    pub all_subjects: bool,

    /// Restrict --all-subjects to these subject area codes
    #[arg(long, value_delimiter = ',', requires = "all_subjects")]
    pub subjects: Vec<String>,

    /// Catalog API base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Pause between per-subject requests, in milliseconds
    #[arg(long, default_value = "300")]
    pub request_delay_ms: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn output_path(&self) -> &Path {
        &self.out
    }

    fn write_csv(&self) -> bool {
        self.csv
    }

    fn fetch_mode(&self) -> FetchMode {
        if self.all_subjects {
            FetchMode::AllSubjects
        } else {
            FetchMode::Search
        }
    }

    fn subjects(&self) -> &[String] {
        &self.subjects
    }

    fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_path("out", &self.out)?;
        validate_file_extension("out", &self.out, &["xlsx"])?;
        for subject in &self.subjects {
            validate_non_empty_string("subjects", subject)?;
        }
        Ok(())
    }
}
