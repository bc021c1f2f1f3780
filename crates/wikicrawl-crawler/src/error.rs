use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// Popping an empty queue. Terminal for a crawl, not a failure.
    #[error("crawl queue is empty")]
    EmptyQueue,

    #[error("couldn't fetch {url}: {source:#}")]
    Fetch {
        url: String,
        source: anyhow::Error,
    },

    #[error("couldn't index {url}: {source:#}")]
    IndexWrite {
        url: String,
        source: anyhow::Error,
    },

    #[error("couldn't load index {}: {source:#}", path.display())]
    IndexLoad {
        path: PathBuf,
        source: anyhow::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CrawlError {
    pub fn is_empty_queue(&self) -> bool {
        matches!(self, CrawlError::EmptyQueue)
    }

    pub(crate) fn fetch(url: &str, source: impl Into<anyhow::Error>) -> Self {
        CrawlError::Fetch {
            url: url.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn index_write(url: &str, source: impl Into<anyhow::Error>) -> Self {
        CrawlError::IndexWrite {
            url: url.to_string(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
