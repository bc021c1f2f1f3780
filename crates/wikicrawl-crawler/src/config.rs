use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::fetcher::FetchMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    #[serde(default = "default_site_base")]
    pub site_base: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_content_id")]
    pub content_id: String,

    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: PathBuf,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: Option<PathBuf>,

    #[serde(default = "default_fetch_mode")]
    pub fetch_mode: FetchMode,

    #[serde(default = "default_on_step_error")]
    pub on_step_error: OnError,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            site_base: default_site_base(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            content_id: default_content_id(),
            fixtures_dir: default_fixtures_dir(),
            cache_dir: default_cache_dir(),
            fetch_mode: default_fetch_mode(),
            on_step_error: default_on_step_error(),
        }
    }
}

fn default_site_base() -> String {
    String::from("https://en.wikipedia.org")
}

fn default_user_agent() -> String {
    String::from("wikicrawl")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_content_id() -> String {
    String::from("mw-content-text")
}

fn default_fixtures_dir() -> PathBuf {
    PathBuf::from("resources")
}

fn default_cache_dir() -> Option<PathBuf> {
    None
}

fn default_fetch_mode() -> FetchMode {
    FetchMode::Production
}

fn default_on_step_error() -> OnError {
    OnError::Fail
}

/// What the crawl loop does when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ArgEnum))]
pub enum OnError {
    Fail,
    SkipAndLog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let conf: CrawlerConfig =
            serde_json::from_str(r#"{"userAgent": "bot", "onStepError": "SkipAndLog"}"#).unwrap();
        assert_eq!("bot", conf.user_agent);
        assert_eq!(OnError::SkipAndLog, conf.on_step_error);
        assert_eq!("https://en.wikipedia.org", conf.site_base);
        assert_eq!("mw-content-text", conf.content_id);
        assert_eq!(30, conf.timeout_secs);
        assert_eq!(None, conf.cache_dir);
        assert_eq!(FetchMode::Production, conf.fetch_mode);
    }
}
