use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use wikicrawl_crawler::{
    Crawler, CrawlerConfig, FetchMode, IndexStore, JsonIndex, MemoryIndex, OnError, WikiFetcher,
};

const DEFAULT_SEED: &str = "https://en.wikipedia.org/wiki/Java_(programming_language)";

/// Wiki crawler and term indexer
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Args {
    #[clap(subcommand)]
    pub cmd: SubCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    #[clap(name = "crawl")]
    Crawl(CrawlArgs),
    #[clap(name = "counts")]
    Counts(CountsArgs),
    #[clap(hide = true)]
    Completion,
}

/// Crawl from a seed page and index every visited page
#[derive(Debug, clap::Args)]
pub struct CrawlArgs {
    /// URL of the first page to visit
    #[clap(default_value = DEFAULT_SEED)]
    pub seed: String,
    /// Stop after this many pages were indexed, required in testing mode
    #[clap(long, short)]
    pub max_pages: Option<usize>,
    /// Override crawler's fetch mode
    #[clap(arg_enum, long)]
    pub mode: Option<FetchMode>,
    /// Override crawler's fixtures directory, used in testing mode
    #[clap(parse(from_os_str), long)]
    pub fixtures_dir: Option<PathBuf>,
    /// Override crawler's page cache directory, used in production mode
    #[clap(parse(from_os_str), long)]
    pub cache_dir: Option<PathBuf>,
    /// JSON file the index is loaded from and saved to, in memory otherwise
    #[clap(parse(from_os_str), long, short)]
    pub index_file: Option<PathBuf>,
    /// Optional default crawler yaml configuration file
    #[clap(env = "WIKICRAWL_CRAWLER_CONFIG", parse(from_os_str), long)]
    pub crawler_config: Option<PathBuf>,
    /// Override crawler's user agent
    #[clap(long)]
    pub user_agent: Option<String>,
    /// Override crawler's step error handling strategy
    #[clap(arg_enum, long)]
    pub on_step_error: Option<OnError>,
    /// When quiet no logs are outputted
    #[clap(long, short)]
    pub quiet: bool,
}

impl TryFrom<&CrawlArgs> for CrawlerConfig {
    type Error = anyhow::Error;

    fn try_from(args: &CrawlArgs) -> Result<Self, Self::Error> {
        let mut conf = if let Some(file) = args.crawler_config.as_ref().map(File::open) {
            serde_yaml::from_reader(file?)?
        } else {
            CrawlerConfig::default()
        };
        if let Some(mode) = args.mode {
            conf.fetch_mode = mode;
        }
        if let Some(fixtures_dir) = &args.fixtures_dir {
            conf.fixtures_dir = fixtures_dir.clone();
        }
        if let Some(cache_dir) = &args.cache_dir {
            conf.cache_dir = Some(cache_dir.clone());
        }
        if let Some(user_agent) = &args.user_agent {
            conf.user_agent = user_agent.to_string();
        }
        if let Some(on_step_error) = args.on_step_error {
            conf.on_step_error = on_step_error;
        }
        Ok(conf)
    }
}

fn run_crawl<I: IndexStore>(
    conf: &CrawlerConfig,
    seed: &str,
    max_pages: Option<usize>,
    index: &I,
) -> anyhow::Result<()> {
    let fetcher = WikiFetcher::new(conf)?;
    let mut crawler = Crawler::with_config(conf, seed, &fetcher, index);
    let summary = crawler.crawl(conf.fetch_mode, max_pages, conf.on_step_error)?;
    for url in &summary.indexed {
        println!("{url}");
    }
    Ok(())
}

/// Testing mode never skips indexed pages, so any cycle in the fixtures would loop forever.
fn check_bounded(conf: &CrawlerConfig, max_pages: Option<usize>) -> anyhow::Result<()> {
    if conf.fetch_mode == FetchMode::Testing && max_pages.is_none() {
        anyhow::bail!("Testing mode revisits pages, `--max-pages` is required");
    }
    Ok(())
}

pub fn crawl(args: CrawlArgs) -> anyhow::Result<()> {
    let conf = CrawlerConfig::try_from(&args)?;
    check_bounded(&conf, args.max_pages)?;
    match &args.index_file {
        Some(path) => run_crawl(&conf, &args.seed, args.max_pages, &JsonIndex::open(path)?),
        None => run_crawl(&conf, &args.seed, args.max_pages, &MemoryIndex::new()),
    }
}

/// Print the pages containing a term, most occurrences first
#[derive(Debug, clap::Args)]
pub struct CountsArgs {
    /// The term to look up, case insensitive
    pub term: String,
    /// JSON index file written by `crawl`
    #[clap(parse(from_os_str), long, short)]
    pub index_file: PathBuf,
}

pub fn counts(args: CountsArgs) -> anyhow::Result<()> {
    if !args.index_file.exists() {
        anyhow::bail!("No index at {}", args.index_file.display());
    }
    let index = JsonIndex::open(&args.index_file)?;
    for (url, count) in sorted_counts(&index, &args.term) {
        println!("{url}\t{count}");
    }
    Ok(())
}

fn sorted_counts(index: &impl IndexStore, term: &str) -> Vec<(String, u32)> {
    let mut counts = index.term_counts(term).into_iter().collect::<Vec<_>>();
    counts.sort_by(|(url_a, a), (url_b, b)| b.cmp(a).then_with(|| url_a.cmp(url_b)));
    counts
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.cmd {
        SubCommand::Crawl(args) => {
            if !args.quiet {
                env_logger::Builder::from_env(
                    env_logger::Env::default().default_filter_or("wikicrawl_crawler=info"),
                )
                .init();
            }
            crawl(args)
        }
        SubCommand::Counts(args) => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or("wikicrawl_crawler=warn"),
            )
            .init();
            counts(args)
        }
        SubCommand::Completion => {
            generate(Shell::Bash, &mut Args::command(), "wikicrawl", &mut io::stdout());
            Ok(())
        }
    }
}
