use std::collections::{vec_deque, VecDeque};

use crate::error::{CrawlError, Result};

/// FIFO of pending URLs.
///
/// Duplicates are allowed, deduplication happens against the index when a URL is visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlQueue {
    urls: VecDeque<String>,
}

impl CrawlQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a URL at the tail.
    pub fn push(&mut self, url: impl Into<String>) {
        self.urls.push_back(url.into());
    }

    /// Removes the URL at the head.
    pub fn pop(&mut self) -> Result<String> {
        self.urls.pop_front().ok_or(CrawlError::EmptyQueue)
    }

    pub fn size(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Iterates pending URLs, head first.
    pub fn iter(&self) -> vec_deque::Iter<'_, String> {
        self.urls.iter()
    }
}

impl<'a> IntoIterator for &'a CrawlQueue {
    type Item = &'a String;
    type IntoIter = vec_deque::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> Extend<S> for CrawlQueue {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.urls.extend(iter.into_iter().map(Into::into));
    }
}
