use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteplotError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Settings error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Render error: {0}")]
    RenderError(String),
}
