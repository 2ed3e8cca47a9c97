use crate::error::TocError;
use crate::pdf::PageTexts;
use std::collections::BTreeSet;
use std::path::Path;

/// A matched table-of-contents entry.
///
/// `page` is one-based, as a reader of the PDF would see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub page: usize,
}

/// Match titles against page text, first page wins.
///
/// Pages are visited in key order and every known title is tested for
/// substring containment in the page text. Each title is recorded at most
/// once, on the first page that contains it.
pub fn build_toc(titles: &BTreeSet<String>, pages: &PageTexts) -> Vec<TocEntry> {
    let mut used: BTreeSet<&str> = BTreeSet::new();
    let mut entries = Vec::new();

    for (&index, text) in pages {
        for title in titles {
            if !used.contains(title.as_str()) && text.contains(title.as_str()) {
                used.insert(title);
                entries.push(TocEntry {
                    title: title.clone(),
                    page: index + 1,
                });
            }
        }
    }

    entries
}

/// Write TOC entries as CSV with a `title,page` header row
pub fn write_csv(entries: &[TocEntry], path: &Path) -> Result<(), TocError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(["title", "page"])?;
    for entry in entries {
        writer.write_record([entry.title.as_str(), entry.page.to_string().as_str()])?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} TOC entries to {:?}", entries.len(), path);
    Ok(())
}
