use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unexpected response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No results: {message}")]
    NoResults { message: String },
}

impl CatalogError {
    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CatalogError::Config { .. } | CatalogError::InvalidConfigValue { .. } => 2,
            CatalogError::Write { .. } | CatalogError::Csv(_) | CatalogError::Xlsx(_) => 3,
            _ => 1,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatalogError::Http(_) => "Check your internet connection and try again",
            CatalogError::HttpStatus { .. } => {
                "The catalog API may be down; retry later or use --all-subjects"
            }
            CatalogError::MalformedResponse { .. } => {
                "The catalog API format may have changed; check --api-base"
            }
            CatalogError::Write { .. } => {
                "Make sure the output directory is writable and the file is not open elsewhere"
            }
            CatalogError::Csv(_) | CatalogError::Xlsx(_) => "Retry the export with a different --out path",
            CatalogError::Config { .. } | CatalogError::InvalidConfigValue { .. } => {
                "Run with --help to see valid options"
            }
            CatalogError::NoResults { .. } => {
                "Try --all-subjects for a full scan of every subject area"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
