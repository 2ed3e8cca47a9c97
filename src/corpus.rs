use anyhow::{Context, Result};
use ignore::WalkBuilder;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker line delimiting the front-matter metadata block
const FRONT_MATTER_MARKER: &str = "---";

/// Crawl the corpus roots and collect the first H1 of every markdown file.
///
/// Duplicate headings across files collapse via set semantics. Files without
/// an H1 contribute nothing.
pub fn collect_titles(roots: &[PathBuf]) -> Result<BTreeSet<String>> {
    let mut titles = BTreeSet::new();

    for root in roots {
        for path in markdown_files(root)? {
            let raw = read_markdown(&path)?;
            if let Some(title) = first_h1(strip_front_matter(&raw)) {
                titles.insert(title);
            } else {
                tracing::debug!("No H1 heading in {:?}", path);
            }
        }
    }

    tracing::info!("Found {} distinct titles in the corpus", titles.len());
    Ok(titles)
}

/// Recursively collect `.md` file paths under a root directory
pub fn markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        anyhow::bail!("Corpus root does not exist: {:?}", root);
    }
    if !root.is_dir() {
        anyhow::bail!("Corpus root is not a directory: {:?}", root);
    }

    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .standard_filters(true) // Respect .gitignore, .ignore, etc.
        .hidden(false)
        .require_git(false)
        .build();

    for entry in walker {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        let is_markdown = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("md"));
        if is_markdown {
            files.push(path.to_path_buf());
        }
    }

    // Walk order is platform-dependent; sort so runs are reproducible
    files.sort();
    Ok(files)
}

/// Read a markdown file, tolerating invalid UTF-8.
///
/// Bad characters are replaced and warned about; the file is still processed.
fn read_markdown(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            tracing::warn!("Bad characters in {:?}, decoding lossily", path);
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

/// Strip a front-matter block delimited by `---` markers.
///
/// Everything through the second marker is dropped. Content without two
/// markers is returned unchanged.
pub fn strip_front_matter(raw: &str) -> &str {
    let Some(first) = raw.find(FRONT_MATTER_MARKER) else {
        return raw;
    };
    let after_first = first + FRONT_MATTER_MARKER.len();
    let Some(second) = raw[after_first..].find(FRONT_MATTER_MARKER) else {
        return raw;
    };
    &raw[after_first + second + FRONT_MATTER_MARKER.len()..]
}

/// Extract the text content of the first H1 heading in a markdown body
pub fn first_h1(body: &str) -> Option<String> {
    let mut in_h1 = false;
    let mut text = String::new();

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let title = text.trim().to_string();
                return (!title.is_empty()).then_some(title);
            }
            Event::Text(t) | Event::Code(t) if in_h1 => text.push_str(&t),
            _ => {}
        }
    }

    None
}
