//! Page indexes: term counting and storage.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use wikicrawl_html::Html;

use crate::error::{CrawlError, Result};

/// Stores indexed pages and answers term queries.
///
/// Methods take `&self` so a crawler can hold a shared reference while callers keep querying.
pub trait IndexStore {
    fn is_indexed(&self, url: &str) -> bool;

    /// Indexes `doc` under `url`, replacing any previous entry.
    fn index_page(&self, url: &str, doc: &Html) -> Result<()>;

    /// Maps every indexed URL containing `term` to its number of occurrences.
    fn term_counts(&self, term: &str) -> HashMap<String, u32>;
}

fn is_separator(c: char) -> bool {
    c.is_ascii_punctuation() || ('\u{2010}'..='\u{2027}').contains(&c)
}

/// Term frequencies of a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCounter {
    counts: HashMap<String, u32>,
}

impl TermCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the terms of every text node in `doc`.
    pub fn process(&mut self, doc: &Html) {
        for text in doc.text() {
            self.process_text(text);
        }
    }

    /// Punctuation separates terms, case is ignored.
    pub fn process_text(&mut self, text: &str) {
        let cleaned = text
            .chars()
            .map(|c| if is_separator(c) { ' ' } else { c })
            .collect::<String>()
            .to_lowercase();
        for term in cleaned.split_whitespace() {
            *self.counts.entry(term.to_string()).or_default() += 1;
        }
    }

    pub fn get(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Total number of terms counted.
    pub fn size(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn counts(&self) -> &HashMap<String, u32> {
        &self.counts
    }
}

/// In-memory index.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    pages: RefCell<BTreeMap<String, TermCounter>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexed URLs, sorted.
    pub fn urls(&self) -> Vec<String> {
        self.pages.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.pages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.borrow().is_empty()
    }
}

impl IndexStore for MemoryIndex {
    fn is_indexed(&self, url: &str) -> bool {
        self.pages.borrow().contains_key(url)
    }

    fn index_page(&self, url: &str, doc: &Html) -> Result<()> {
        let mut counter = TermCounter::new();
        counter.process(doc);
        log::debug!("Indexed {} terms for {url}", counter.size());
        self.pages.borrow_mut().insert(url.to_string(), counter);
        Ok(())
    }

    fn term_counts(&self, term: &str) -> HashMap<String, u32> {
        let term = term.to_lowercase();
        self.pages
            .borrow()
            .iter()
            .filter_map(|(url, counter)| match counter.get(&term) {
                0 => None,
                count => Some((url.clone(), count)),
            })
            .collect()
    }
}

/// A [`MemoryIndex`] persisted as a JSON file, rewritten after each indexed page.
#[derive(Debug)]
pub struct JsonIndex {
    path: PathBuf,
    inner: MemoryIndex,
}

impl JsonIndex {
    /// Opens the index at `path`, starting empty when the file doesn't exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let pages = if path.exists() {
            load(&path).map_err(|source| CrawlError::IndexLoad {
                path: path.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };
        log::debug!("Opened index {} with {} pages", path.display(), pages.len());
        Ok(Self {
            path,
            inner: MemoryIndex {
                pages: RefCell::new(pages),
            },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn urls(&self) -> Vec<String> {
        self.inner.urls()
    }

    /// Writes `pages` next to the index file, then renames it over the index.
    fn save(&self, pages: &BTreeMap<String, TermCounter>) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, pages)?;
            writer.flush()?;
        }
        tmp.persist(&self.path)?;
        Ok(())
    }
}

fn load(path: &Path) -> anyhow::Result<BTreeMap<String, TermCounter>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

impl IndexStore for JsonIndex {
    fn is_indexed(&self, url: &str) -> bool {
        self.inner.is_indexed(url)
    }

    /// The page only becomes visible once the file holding it is in place.
    fn index_page(&self, url: &str, doc: &Html) -> Result<()> {
        let mut counter = TermCounter::new();
        counter.process(doc);

        let mut pages = self.inner.pages.borrow().clone();
        pages.insert(url.to_string(), counter);
        self.save(&pages).map_err(|e| CrawlError::index_write(url, e))?;

        log::debug!("Indexed {url} into {}", self.path.display());
        *self.inner.pages.borrow_mut() = pages;
        Ok(())
    }

    fn term_counts(&self, term: &str) -> HashMap<String, u32> {
        self.inner.term_counts(term)
    }
}
