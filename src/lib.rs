//! # TOC Builder - Title-to-Page Mapping for PDF Documents
//!
//! Compiles a table of contents for a PDF by cross-referencing the H1
//! headings of a markdown corpus against the text of each PDF page.
//!
//! ## Overview
//!
//! Three passes run in sequence:
//!
//! 1. The configured corpus roots are crawled for `.md` files and each
//!    file's first H1 heading is collected into a de-duplicated set.
//! 2. Text is extracted per PDF page; large documents are split into four
//!    contiguous chunks extracted on worker threads.
//! 3. Each heading is matched against page text by substring containment,
//!    and the first page that contains it wins. The result is written as a
//!    `title,page` CSV.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration (corpus roots and extraction knobs)
//! - [`corpus`]: Markdown crawling and heading extraction
//! - [`pdf`]: Per-page PDF text extraction with the four-way split
//! - [`toc`]: Heading-to-page matching and CSV output
//! - [`error`]: Error types
//!
//! ## Usage Example
//!
//! ```no_run
//! use toc_builder::{corpus, pdf, toc};
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let roots = vec![PathBuf::from("docs")];
//!     let titles = corpus::collect_titles(&roots)?;
//!     let pages = pdf::PageExtractor::new("handbook.pdf").extract()?;
//!     let entries = toc::build_toc(&titles, &pages);
//!     toc::write_csv(&entries, std::path::Path::new("toc.csv"))?;
//!     Ok(())
//! }
//! ```

/// Configuration management with environment variable overrides
pub mod config;

/// Markdown corpus crawling and H1 heading extraction
pub mod corpus;

/// Error types and utilities
pub mod error;

/// Per-page PDF text extraction
pub mod pdf;

/// Heading-to-page matching and CSV output
pub mod toc;
