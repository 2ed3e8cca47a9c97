/// Centralized error types for toc-builder using thiserror
///
/// Provides domain-specific error types for better error handling and
/// user-facing messages.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the TOC builder
#[derive(Error, Debug)]
pub enum TocError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

/// Errors related to PDF page text extraction
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Failed to load PDF '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Page range end {end} exceeds document page count {page_count}")]
    PageOutOfRange { end: usize, page_count: usize },

    #[error("Failed to extract text from page {page}: {source}")]
    Extract {
        page: usize,
        #[source]
        source: lopdf::Error,
    },

    #[error("{0} pages is too few to split into four sections")]
    TooFewPages(usize),

    #[error("Page extraction worker panicked")]
    WorkerPanicked,
}

// Conversion from anyhow::Error to TocError
impl From<anyhow::Error> for TocError {
    fn from(err: anyhow::Error) -> Self {
        TocError::Other(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TocError::Config(ConfigError::MissingRequired("corpus.roots".to_string()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required configuration: corpus.roots"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let toc_err: TocError = io_err.into();
        assert!(matches!(toc_err, TocError::Io(_)));
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("test error");
        let toc_err: TocError = anyhow_err.into();
        assert!(matches!(toc_err, TocError::Other(_)));
    }

    #[test]
    fn test_pdf_error_too_few_pages() {
        let err = PdfError::TooFewPages(10);
        assert_eq!(
            err.to_string(),
            "10 pages is too few to split into four sections"
        );
    }

    #[test]
    fn test_pdf_error_page_out_of_range() {
        let err = PdfError::PageOutOfRange {
            end: 20,
            page_count: 12,
        };
        assert_eq!(
            err.to_string(),
            "Page range end 20 exceeds document page count 12"
        );
    }
}
