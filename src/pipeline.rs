use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::fetch::Fetcher;
use crate::parser;
use crate::rank::{self, RankedEntry};
use crate::sentiment::SentimentScorer;
use crate::store::{Admission, ReviewStore};

/// Counts for one page's worth of reviews.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageStats {
    pub stored: usize,
    pub inconsistent: usize,
    pub duplicate: usize,
    pub malformed: usize,
}

impl PageStats {
    fn add(&mut self, other: PageStats) {
        self.stored += other.stored;
        self.inconsistent += other.inconsistent;
        self.duplicate += other.duplicate;
        self.malformed += other.malformed;
    }
}

/// Run summary returned after all pages have been visited.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectStats {
    pub pages_ok: usize,
    pub pages_failed: usize,
    pub reviews: PageStats,
}

/// Owns its own copy of the page list and a fresh review store.
pub struct ReviewAnalyzer {
    urls: Box<[String]>,
    store: ReviewStore,
}

impl ReviewAnalyzer {
    pub fn new(urls: &[String]) -> Self {
        Self {
            urls: urls.into(),
            store: ReviewStore::new(),
        }
    }

    pub fn store(&self) -> &ReviewStore {
        &self.store
    }

    /// Fetch and ingest every page in order. A failed fetch skips that page.
    pub async fn collect<F: Fetcher>(&mut self, fetcher: &F) -> CollectStats {
        let pb = ProgressBar::new(self.urls.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} pages") {
            pb.set_style(style.progress_chars("=> "));
        }

        let mut stats = CollectStats::default();
        let urls = self.urls.clone();
        for url in urls.iter() {
            match fetcher.fetch(url).await {
                Ok(html) => {
                    let page = self.ingest_page(&html);
                    debug!(url = %url, ?page, "Ingested page");
                    stats.pages_ok += 1;
                    stats.reviews.add(page);
                }
                Err(e) => {
                    pb.suspend(|| warn!(url = %url, "{}", e));
                    stats.pages_failed += 1;
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(
            pages_ok = stats.pages_ok,
            pages_failed = stats.pages_failed,
            stored = stats.reviews.stored,
            inconsistent = stats.reviews.inconsistent,
            duplicate = stats.reviews.duplicate,
            malformed = stats.reviews.malformed,
            "Collected reviews"
        );
        stats
    }

    /// Parse one page and offer its reviews to the store.
    pub fn ingest_page(&mut self, html: &str) -> PageStats {
        let page = parser::parse_page(html);
        let mut stats = PageStats {
            malformed: page.errors.len(),
            ..Default::default()
        };
        for e in &page.errors {
            warn!(error = %e, "Skipping malformed review block");
        }

        for parsed in page.reviews {
            let reviewer = parsed.reviewer.clone();
            match self.store.offer(parsed.reviewer, parsed.review) {
                Admission::Stored => stats.stored += 1,
                Admission::Inconsistent => {
                    debug!(reviewer, "Dropping review whose rating and recommendation disagree");
                    stats.inconsistent += 1;
                }
                Admission::Duplicate => {
                    debug!(reviewer, "Reviewer already stored; keeping first review");
                    stats.duplicate += 1;
                }
            }
        }
        stats
    }

    pub fn rank<S: SentimentScorer + ?Sized>(&self, scorer: &S) -> Vec<RankedEntry> {
        rank::rank(&self.store, scorer)
    }
}
