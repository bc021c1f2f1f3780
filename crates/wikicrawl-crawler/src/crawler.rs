use wikicrawl_html::Html;

use crate::config::{CrawlerConfig, OnError};
use crate::error::{CrawlError, Result};
use crate::fetcher::{FetchMode, Fetcher};
use crate::index::IndexStore;
use crate::links::links;
use crate::queue::CrawlQueue;

/// Outcome of a crawl loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// URLs indexed, in visit order.
    pub indexed: Vec<String>,
    /// Steps that found their URL already indexed.
    pub skipped: usize,
    /// Steps that failed and were skipped.
    pub failed: usize,
}

/// Breadth-first wiki crawler.
///
/// Owns its queue, borrows the fetcher and the index. A crawl makes progress only through
/// [`Crawler::step`], one URL at a time.
pub struct Crawler<'a, F, I> {
    source: String,
    queue: CrawlQueue,
    site_base: String,
    fetcher: &'a F,
    index: &'a I,
}

impl<'a, F, I> Crawler<'a, F, I>
where
    F: Fetcher,
    I: IndexStore,
{
    pub fn new(source: impl Into<String>, fetcher: &'a F, index: &'a I) -> Self {
        Self::with_config(&CrawlerConfig::default(), source, fetcher, index)
    }

    pub fn with_config(
        config: &CrawlerConfig,
        source: impl Into<String>,
        fetcher: &'a F,
        index: &'a I,
    ) -> Self {
        let source = source.into();
        let mut queue = CrawlQueue::new();
        queue.push(source.clone());
        Self {
            source,
            queue,
            site_base: config.site_base.clone(),
            fetcher,
            index,
        }
    }

    /// The seed URL.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn queue_size(&self) -> usize {
        self.queue.size()
    }

    pub fn queue(&self) -> &CrawlQueue {
        &self.queue
    }

    pub fn index(&self) -> &'a I {
        self.index
    }

    /// Queues every internal link of `doc`, in document order. Returns how many were queued.
    pub fn queue_internal_links(&mut self, doc: &Html) -> usize {
        let before = self.queue.size();
        self.queue
            .extend(links(doc, &self.site_base).map(|link| link.url));
        self.queue.size() - before
    }

    /// Visits the next URL of the queue.
    ///
    /// Returns the visited URL, or `None` when in production mode the URL was already indexed.
    /// Fails with [`CrawlError::EmptyQueue`] once the queue is exhausted. A URL whose fetch or
    /// indexing fails is not queued again.
    pub fn step(&mut self, mode: FetchMode) -> Result<Option<String>> {
        let url = self.queue.pop()?;

        if mode == FetchMode::Production && self.index.is_indexed(&url) {
            log::debug!("Already indexed: {url}");
            return Ok(None);
        }

        let doc = self.fetcher.fetch(&url, mode)?;
        self.index.index_page(&url, &doc)?;

        let queued = self.queue_internal_links(&doc);
        log::info!("Indexed {url} ({queued} links queued)");

        Ok(Some(url))
    }

    /// Steps until the queue is exhausted or `max_pages` pages have been indexed.
    ///
    /// With [`OnError::Fail`] the first failing step ends the crawl with its error, with
    /// [`OnError::SkipAndLog`] it is logged and counted.
    pub fn crawl(
        &mut self,
        mode: FetchMode,
        max_pages: Option<usize>,
        on_error: OnError,
    ) -> Result<CrawlSummary> {
        let mut summary = CrawlSummary::default();

        while max_pages.map_or(true, |max| summary.indexed.len() < max) {
            match self.step(mode) {
                Ok(Some(url)) => summary.indexed.push(url),
                Ok(None) => summary.skipped += 1,
                Err(CrawlError::EmptyQueue) => break,
                Err(e) => match on_error {
                    OnError::Fail => {
                        log::error!("Crawl stopped: {e}");
                        return Err(e);
                    }
                    OnError::SkipAndLog => {
                        log::warn!("Skipping step: {e}");
                        summary.failed += 1;
                    }
                },
            }
        }

        log::info!(
            "Crawl done: {} indexed, {} skipped, {} failed, {} queued",
            summary.indexed.len(),
            summary.skipped,
            summary.failed,
            self.queue.size()
        );
        Ok(summary)
    }
}
