use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use wikicrawl_crawler::html::Html;
use wikicrawl_crawler::{
    CrawlError, Crawler, CrawlerConfig, FetchMode, Fetcher, IndexStore, MemoryIndex, OnError,
    WikiFetcher,
};

const JAVA: &str = "https://en.wikipedia.org/wiki/Java_(programming_language)";

fn fixtures() -> WikiFetcher {
    let conf = CrawlerConfig {
        fixtures_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources"),
        ..Default::default()
    };
    WikiFetcher::new(&conf).unwrap()
}

/// Serves the same page for every URL and records what was asked.
struct StaticFetcher {
    page: &'static str,
    calls: RefCell<Vec<String>>,
}

impl StaticFetcher {
    fn new(page: &'static str) -> Self {
        Self {
            page,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Fetcher for StaticFetcher {
    fn fetch_production(&self, url: &str) -> wikicrawl_crawler::Result<Html> {
        self.calls.borrow_mut().push(url.to_string());
        Ok(Html::parse_document(self.page))
    }

    fn fetch_testing(&self, url: &str) -> wikicrawl_crawler::Result<Html> {
        self.fetch_production(url)
    }
}

/// Reports a fixed set of URLs as indexed and records writes.
#[derive(Default)]
struct RecordingIndex {
    known: Vec<String>,
    writes: RefCell<Vec<String>>,
}

impl IndexStore for RecordingIndex {
    fn is_indexed(&self, url: &str) -> bool {
        self.known.iter().any(|known| known == url)
    }

    fn index_page(&self, url: &str, _doc: &Html) -> wikicrawl_crawler::Result<()> {
        self.writes.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn term_counts(&self, _term: &str) -> HashMap<String, u32> {
        HashMap::new()
    }
}

#[test]
fn java_seed_one_testing_step() {
    let fetcher = fixtures();
    let index = MemoryIndex::new();
    let mut crawler = Crawler::new(JAVA, &fetcher, &index);

    let visited = crawler.step(FetchMode::Testing).unwrap();

    assert_eq!(Some(JAVA.to_string()), visited);
    assert_eq!(3, crawler.queue_size());
    assert_eq!(
        vec![
            "https://en.wikipedia.org/wiki/Programming_language",
            "https://en.wikipedia.org/wiki/Class_(computer_programming)",
            JAVA,
        ],
        crawler.queue().iter().collect::<Vec<_>>()
    );
    assert!(index.is_indexed(JAVA));
    assert_eq!(vec![JAVA.to_string()], index.urls());
}

#[test]
fn java_seed_term_counts() {
    let fetcher = fixtures();
    let index = MemoryIndex::new();
    let mut crawler = Crawler::new(JAVA, &fetcher, &index);
    crawler.step(FetchMode::Testing).unwrap();
    crawler.step(FetchMode::Testing).unwrap();

    let counts = index.term_counts("the");
    assert_eq!(Some(&2), counts.get(JAVA));
    assert_eq!(1, counts.len());

    let counts = index.term_counts("java");
    assert_eq!(Some(&2), counts.get(JAVA));
    assert_eq!(
        Some(&1),
        counts.get("https://en.wikipedia.org/wiki/Programming_language")
    );
}

#[test]
fn failed_step_loses_the_url() {
    let fetcher = fixtures();
    let index = MemoryIndex::new();
    let mut crawler = Crawler::new(JAVA, &fetcher, &index);
    crawler.step(FetchMode::Testing).unwrap();
    crawler.step(FetchMode::Testing).unwrap();
    assert_eq!(3, crawler.queue_size());

    // No fixture for the class page.
    let err = crawler.step(FetchMode::Testing).unwrap_err();
    assert!(matches!(err, CrawlError::Fetch { .. }));
    assert_eq!(2, crawler.queue_size());
    assert!(crawler.queue().iter().all(|url| url == JAVA));
    assert!(!index.is_indexed("https://en.wikipedia.org/wiki/Class_(computer_programming)"));
}

#[test]
fn production_step_skips_indexed_url() {
    let fetcher = StaticFetcher::new(r#"<a href="/wiki/Next">next</a>"#);
    let index = RecordingIndex {
        known: vec![JAVA.to_string()],
        ..Default::default()
    };
    let mut crawler = Crawler::new(JAVA, &fetcher, &index);

    assert_eq!(None, crawler.step(FetchMode::Production).unwrap());
    assert!(fetcher.calls.borrow().is_empty());
    assert!(index.writes.borrow().is_empty());
    assert_eq!(0, crawler.queue_size());
}

#[test]
fn testing_step_ignores_index_state() {
    let fetcher = StaticFetcher::new(r#"<a href="/wiki/Next">next</a>"#);
    let index = RecordingIndex {
        known: vec![JAVA.to_string()],
        ..Default::default()
    };
    let mut crawler = Crawler::new(JAVA, &fetcher, &index);

    assert_eq!(Some(JAVA.to_string()), crawler.step(FetchMode::Testing).unwrap());
    assert_eq!(vec![JAVA.to_string()], *index.writes.borrow());
    assert_eq!(1, crawler.queue_size());
}

#[test]
fn empty_queue_step() {
    let fetcher = StaticFetcher::new("<p>dead end</p>");
    let index = RecordingIndex::default();
    let mut crawler = Crawler::new(JAVA, &fetcher, &index);
    crawler.step(FetchMode::Production).unwrap();

    let err = crawler.step(FetchMode::Production).unwrap_err();
    assert!(err.is_empty_queue());
    assert_eq!(0, crawler.queue_size());
    assert_eq!(1, fetcher.calls.borrow().len());
}

#[test]
fn custom_site_base() {
    let fetcher = StaticFetcher::new(r#"<a href="/wiki/A">a</a><a href="/wiki/A">again</a>"#);
    let index = RecordingIndex::default();
    let conf = CrawlerConfig {
        site_base: "http://localhost:8080".to_string(),
        ..Default::default()
    };
    let mut crawler =
        Crawler::with_config(&conf, "http://localhost:8080/wiki/Seed", &fetcher, &index);
    crawler.step(FetchMode::Production).unwrap();
    assert_eq!(
        vec!["http://localhost:8080/wiki/A"; 2],
        crawler.queue().iter().collect::<Vec<_>>()
    );
}

#[test]
fn preload_queue_from_page() {
    let fetcher = fixtures();
    let index = MemoryIndex::new();
    let mut crawler = Crawler::new(JAVA, &fetcher, &index);
    let page = fetcher.fetch_testing(JAVA).unwrap();
    assert_eq!(3, crawler.queue_internal_links(&page));
    assert_eq!(4, crawler.queue_size());

    let summary = crawler
        .crawl(FetchMode::Testing, Some(2), OnError::Fail)
        .unwrap();
    assert_eq!(
        vec![
            JAVA.to_string(),
            "https://en.wikipedia.org/wiki/Programming_language".to_string()
        ],
        summary.indexed
    );
}
