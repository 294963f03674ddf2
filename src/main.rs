mod fetch;
mod parser;
mod pipeline;
mod rank;
mod report;
mod sentiment;
mod settings;
mod store;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, warn};

use fetch::HttpFetcher;
use pipeline::ReviewAnalyzer;
use sentiment::LexiconScorer;
use settings::{ReportFormat, Settings};

#[derive(Parser)]
#[command(
    name = "review_ranker",
    about = "Scrape dealership reviews and rank the most positive ones"
)]
struct Cli {
    /// Review page URLs, fetched in order
    urls: Vec<String>,

    /// Number of top reviews to report
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Dealer review page base; used when no URLs are given
    #[arg(long)]
    dealer: Option<String>,

    /// Number of dealer pages to expand (with --dealer)
    #[arg(long)]
    pages: Option<u32>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Settings file (default: ./reviews.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,

    /// JSON file of word -> polarity merged over the built-in lexicon
    #[arg(long)]
    lexicon: Option<PathBuf>,
}

impl Cli {
    /// CLI flags take precedence over every other settings layer.
    fn apply(self, mut settings: Settings) -> (Settings, Vec<String>) {
        if let Some(top) = self.top {
            settings.top = top;
        }
        if let Some(dealer) = self.dealer {
            settings.dealer = Some(dealer);
        }
        if let Some(pages) = self.pages {
            settings.pages = pages;
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if let Some(ua) = self.user_agent {
            settings.user_agent = ua;
        }
        if let Some(lexicon) = self.lexicon {
            settings.lexicon = Some(lexicon);
        }
        (settings, self.urls)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let (settings, urls) = cli.apply(settings);
    settings.validate()?;
    let urls = settings.page_urls(&urls)?;

    let scorer = match &settings.lexicon {
        Some(path) => LexiconScorer::new().with_lexicon_file(path)?,
        None => LexiconScorer::new(),
    };
    debug!(words = scorer.lexicon_size(), "Sentiment lexicon ready");

    let fetcher = HttpFetcher::new(&settings).context("Failed to build HTTP client")?;

    info!(pages = urls.len(), top = settings.top, "Scraping review pages");
    let mut analyzer = ReviewAnalyzer::new(&urls);
    let stats = analyzer.collect(&fetcher).await;
    if stats.pages_ok == 0 {
        anyhow::bail!("none of the {} page(s) could be fetched", stats.pages_failed);
    }

    if analyzer.store().is_empty() {
        warn!("No consistent reviews were found");
    }
    info!(reviews = analyzer.store().len(), "Ranking reviews");
    let ranked = analyzer.rank(&scorer);
    let top = rank::top_n(&ranked, settings.top);
    let entries = report::report_entries(analyzer.store(), top);

    match settings.format {
        ReportFormat::Text => print!("{}", report::render_text(&entries)),
        ReportFormat::Json => println!("{}", report::render_json(&entries)?),
    }

    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "Done");
    Ok(())
}
