//! sikum - Meeting transcript summaries rendered as right-to-left Word documents
//!
//! "sikum" is Hebrew for "summary"

pub mod cli;
pub mod config;
pub mod docx;
pub mod extract;
pub mod llm;
pub mod pipeline;
pub mod summary;

use thiserror::Error;

/// Main error type for sikum
#[derive(Error, Debug)]
pub enum SikumError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No text could be extracted from the file")]
    EmptyExtraction,

    #[error("DOCX error: {0}")]
    Docx(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("{0}")]
    Collaborator(String),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SikumError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "sikum";
