mod config;
mod crawler;
mod error;
mod fetcher;
mod queue;

pub mod endpoint;
pub mod index;
pub mod links;

pub use config::{CrawlerConfig, OnError};
pub use crawler::{CrawlSummary, Crawler};
pub use endpoint::is_internal_document;
pub use error::{CrawlError, Result};
pub use fetcher::{mirror_path, FetchMode, Fetcher, WikiFetcher};
pub use index::{IndexStore, JsonIndex, MemoryIndex, TermCounter};
pub use links::{extract_links, Link};
pub use queue::CrawlQueue;

pub use anyhow;
pub use wikicrawl_html as html;
