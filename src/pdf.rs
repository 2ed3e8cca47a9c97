use crate::error::PdfError;
use lopdf::Document;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Extracted page text keyed by zero-based page index
pub type PageTexts = BTreeMap<usize, String>;

/// Number of concurrent workers used for large documents
pub const SPLIT_WORKERS: usize = 4;

/// Default page count above which extraction is split four ways
pub const DEFAULT_SPLIT_THRESHOLD: usize = 13;

/// Per-page PDF text extractor.
///
/// Pages are reported zero-based internally; the PDF itself numbers pages
/// from one. Documents with more than `split_threshold` pages are extracted
/// in four contiguous chunks on worker threads, each writing into its own
/// map; the maps are merged after all workers are joined.
pub struct PageExtractor {
    path: PathBuf,
    snippet_len: usize,
    split_threshold: usize,
}

impl PageExtractor {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            snippet_len: 125,
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
        }
    }

    pub fn with_snippet_len(mut self, snippet_len: usize) -> Self {
        self.snippet_len = snippet_len;
        self
    }

    pub fn with_split_threshold(mut self, split_threshold: usize) -> Self {
        self.split_threshold = split_threshold;
        self
    }

    /// Extract the text of every page in the document
    pub fn extract(&self) -> Result<PageTexts, PdfError> {
        let doc = Document::load(&self.path).map_err(|source| PdfError::Load {
            path: self.path.clone(),
            source,
        })?;
        let page_count = doc.get_pages().len();
        tracing::info!("Extracting text from {} pages", page_count);

        if page_count <= self.split_threshold {
            return extract_range(&doc, 0, page_count, self.snippet_len);
        }

        let chunks = page_splits(page_count, self.split_threshold)?;
        let snippet_len = self.snippet_len;
        let doc = &doc;

        let results: Vec<Result<PageTexts, PdfError>> = std::thread::scope(|s| {
            let handles: Vec<_> = chunks
                .into_iter()
                .map(|(start, end)| {
                    s.spawn(move || extract_range(doc, start, end, snippet_len))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or(Err(PdfError::WorkerPanicked))
                })
                .collect()
        });

        // Workers produce disjoint key ranges, so merging is a plain union
        let mut pages = PageTexts::new();
        for result in results {
            pages.extend(result?);
        }
        Ok(pages)
    }
}

/// Split a page count into four contiguous, nearly-equal `(start, end)`
/// chunks with exclusive ends.
///
/// The first three chunks end one past a multiple of `page_count / 4`; the
/// last chunk absorbs the remainder. Together they cover `0..page_count`
/// with no gap and no overlap. Page counts at or below `split_threshold`
/// cannot be split; the same guard is what sends [`PageExtractor::extract`]
/// down the serial path, so a valid document never hits this error.
pub fn page_splits(
    page_count: usize,
    split_threshold: usize,
) -> Result<[(usize, usize); SPLIT_WORKERS], PdfError> {
    if page_count <= split_threshold {
        return Err(PdfError::TooFewPages(page_count));
    }

    let breaksize = page_count / 4;
    Ok([
        (0, breaksize + 1),
        (breaksize + 1, breaksize * 2 + 1),
        (breaksize * 2 + 1, breaksize * 3 + 1),
        (breaksize * 3 + 1, page_count),
    ])
}

/// Extract the text of pages `start..end` (zero-based, end exclusive).
///
/// Each page's text is truncated to `snippet_len` characters and literal
/// newlines are escaped for CSV safety.
pub fn extract_range(
    doc: &Document,
    start: usize,
    end: usize,
    snippet_len: usize,
) -> Result<PageTexts, PdfError> {
    let page_count = doc.get_pages().len();
    if end > page_count {
        return Err(PdfError::PageOutOfRange { end, page_count });
    }

    let mut pages = PageTexts::new();
    for index in start..end {
        tracing::debug!("Processing page {}", index);

        // lopdf page numbers are one-based
        let text = doc
            .extract_text(&[index as u32 + 1])
            .map_err(|source| PdfError::Extract {
                page: index,
                source,
            })?;

        pages.insert(index, sanitize(&text, snippet_len));
    }
    Ok(pages)
}

/// Keep the first `snippet_len` characters and escape newlines
fn sanitize(text: &str, snippet_len: usize) -> String {
    let cut = text
        .char_indices()
        .nth(snippet_len)
        .map_or(text.len(), |(i, _)| i);
    text[..cut].replace('\n', "\\n")
}
