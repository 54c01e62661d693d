// Error handling utilities
// Author: Gabriel Demetrios Lafis

use thiserror::Error;

use super::FilterError;
use crate::data::DataError;
use crate::processing::ProcessingError;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Processing error: {0}")]
    Processing(ProcessingError),
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl AppError {
    /// Whether this error means the city's data file is missing
    pub fn is_missing_source(&self) -> bool {
        matches!(self, AppError::Data(DataError::DataSourceNotFound(_)))
    }
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        // Surface data errors directly so callers can match on them
        match err {
            ProcessingError::DataError(data) => AppError::Data(data),
            other => AppError::Processing(other),
        }
    }
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;
