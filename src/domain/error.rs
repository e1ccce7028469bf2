use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Please select a PDF file first")]
    NoFileSelected,

    #[error("Please upload a PDF file only")]
    NotAPdf,

    #[error("Could not read file: {0}")]
    Inspect(String),

    #[error("{0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(String),
}
