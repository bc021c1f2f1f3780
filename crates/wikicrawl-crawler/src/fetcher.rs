//! Page retrieval.

use std::fs::{self, File};
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::blocking::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use url::Url;
use wikicrawl_html::Html;

use crate::config::CrawlerConfig;
use crate::error::{CrawlError, Result};

/// Where pages come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ArgEnum))]
pub enum FetchMode {
    /// Local fixtures, no network access.
    Testing,
    /// The live site, optionally through the page cache.
    Production,
}

/// Retrieves pages and hands them back parsed.
pub trait Fetcher {
    fn fetch_production(&self, url: &str) -> Result<Html>;

    fn fetch_testing(&self, url: &str) -> Result<Html>;

    fn fetch(&self, url: &str, mode: FetchMode) -> Result<Html> {
        match mode {
            FetchMode::Production => self.fetch_production(url),
            FetchMode::Testing => self.fetch_testing(url),
        }
    }
}

/// Maps `url` to `<root>/<host>/<path>`.
pub fn mirror_path(root: &Path, url: &str) -> anyhow::Result<PathBuf> {
    let url = Url::parse(url).context("invalid URL")?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow!("URL has no host: {url}"))?;
    let path = match url.path().trim_matches('/') {
        "" => "index",
        path => path,
    };
    Ok(root.join(host).join(path))
}

/// Fetches wiki pages over HTTP, or from a fixture tree in testing mode.
///
/// Documents are narrowed to the paragraphs of the article body when the page has one.
#[derive(Debug, Clone)]
pub struct WikiFetcher {
    client: Client,
    content_id: String,
    fixtures_dir: PathBuf,
    cache_dir: Option<PathBuf>,
}

impl WikiFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| CrawlError::Config(format!("couldn't build HTTP client: {e}")))?;

        Ok(Self {
            client,
            content_id: config.content_id.clone(),
            fixtures_dir: config.fixtures_dir.clone(),
            cache_dir: config.cache_dir.clone(),
        })
    }

    fn parse(&self, url: &str, page: &str) -> Html {
        let mut doc = Html::parse_document(page);
        if !doc.narrow_to_paragraphs(&self.content_id) {
            log::debug!("No #{} in {url}, keeping the whole page", self.content_id);
        }
        doc
    }

    fn download(&self, url: &str) -> anyhow::Result<String> {
        let resp = self.client.get(url).send()?.error_for_status()?;
        Ok(resp.text()?)
    }

    fn cache_path(&self, url: &str) -> anyhow::Result<Option<PathBuf>> {
        match &self.cache_dir {
            Some(dir) => {
                let mut path = mirror_path(dir, url)?.into_os_string();
                path.push(".html.gz");
                Ok(Some(path.into()))
            }
            None => Ok(None),
        }
    }
}

fn read_cached(path: &Path) -> anyhow::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut gz = GzDecoder::new(File::open(path)?);
    let mut page = String::new();
    gz.read_to_string(&mut page)?;
    Ok(Some(page))
}

fn write_cached(path: &Path, page: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut gz = GzEncoder::new(File::create(path)?, Compression::default());
    gz.write_all(page.as_bytes())?;
    gz.finish()?;
    Ok(())
}

impl Fetcher for WikiFetcher {
    fn fetch_production(&self, url: &str) -> Result<Html> {
        let cache_path = self
            .cache_path(url)
            .map_err(|e| CrawlError::fetch(url, e))?;

        if let Some(path) = &cache_path {
            match read_cached(path) {
                Ok(Some(page)) => {
                    log::debug!("Cache hit for {url}");
                    return Ok(self.parse(url, &page));
                }
                Ok(None) => (),
                Err(e) => log::warn!("Ignoring unreadable cache {}: {e}", path.display()),
            }
        }

        let page = self.download(url).map_err(|e| CrawlError::fetch(url, e))?;

        if let Some(path) = &cache_path {
            if let Err(e) = write_cached(path, &page) {
                log::warn!("Couldn't cache {url} to {}: {e}", path.display());
            }
        }

        Ok(self.parse(url, &page))
    }

    fn fetch_testing(&self, url: &str) -> Result<Html> {
        let page = mirror_path(&self.fixtures_dir, url)
            .and_then(|path| {
                fs::read_to_string(&path)
                    .with_context(|| format!("missing fixture {}", path.display()))
            })
            .map_err(|e| CrawlError::fetch(url, e))?;
        Ok(self.parse(url, &page))
    }
}
