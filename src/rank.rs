use std::cmp::Ordering;

use serde::Serialize;
use tracing::warn;

use crate::parser::normalize::normalize_review;
use crate::sentiment::SentimentScorer;
use crate::store::{Rating, ReviewStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub reviewer: String,
    pub rating: Rating,
    pub sentiment: f64,
}

/// Score every stored review. A review the scorer cannot handle is logged
/// and left out; the rest of the pass continues.
pub fn score_reviews<S: SentimentScorer + ?Sized>(store: &ReviewStore, scorer: &S) -> Vec<RankedEntry> {
    store
        .iter()
        .filter_map(|(reviewer, review)| {
            let cleaned = normalize_review(&review.review_text);
            match scorer.polarity(&cleaned) {
                Ok(sentiment) => Some(RankedEntry {
                    reviewer: reviewer.to_string(),
                    rating: review.rating,
                    sentiment,
                }),
                Err(e) => {
                    warn!(reviewer, error = %e, "Skipping review that could not be scored");
                    None
                }
            }
        })
        .collect()
}

/// Rating descending, then sentiment descending. Stable, so equal entries
/// keep store order.
pub fn sort_entries(entries: &mut [RankedEntry]) {
    entries.sort_by(|a, b| {
        b.rating
            .cmp(&a.rating)
            .then_with(|| b.sentiment.partial_cmp(&a.sentiment).unwrap_or(Ordering::Equal))
    });
}

pub fn rank<S: SentimentScorer + ?Sized>(store: &ReviewStore, scorer: &S) -> Vec<RankedEntry> {
    let mut entries = score_reviews(store, scorer);
    sort_entries(&mut entries);
    entries
}

/// The first `n` entries. Asking for more than exist returns them all.
pub fn top_n(entries: &[RankedEntry], n: usize) -> &[RankedEntry] {
    if n > entries.len() {
        warn!(
            requested = n,
            available = entries.len(),
            "Fewer ranked reviews than requested; reporting all of them"
        );
    }
    &entries[..n.min(entries.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentError;
    use crate::store::Review;

    fn entry(reviewer: &str, tenths: u8, sentiment: f64) -> RankedEntry {
        RankedEntry {
            reviewer: reviewer.to_string(),
            rating: Rating::from_tenths(tenths).unwrap(),
            sentiment,
        }
    }

    fn review(text: &str, tenths: u8) -> Review {
        Review {
            review_text: text.to_string(),
            rating: Rating::from_tenths(tenths).unwrap(),
            recommend: tenths >= 25,
            date: String::new(),
            title: String::new(),
        }
    }

    /// Polarity is the number of words, scaled; "boom" is unscorable.
    struct WordCount;

    impl SentimentScorer for WordCount {
        fn polarity(&self, text: &str) -> Result<f64, SentimentError> {
            if text.contains("boom") {
                return Err(SentimentError::NonFinite(text.to_string()));
            }
            Ok(text.split_whitespace().count() as f64 / 10.0)
        }
    }

    #[test]
    fn rating_then_sentiment() {
        let mut entries = vec![entry("a", 50, 0.1), entry("b", 50, 0.8), entry("c", 30, 0.9)];
        sort_entries(&mut entries);
        let order: Vec<(f64, f64)> = entries.iter().map(|e| (e.rating.value(), e.sentiment)).collect();
        assert_eq!(order, [(5.0, 0.8), (5.0, 0.1), (3.0, 0.9)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut entries = vec![entry("x", 40, 0.5), entry("y", 40, 0.5), entry("z", 40, 0.5)];
        sort_entries(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.reviewer.as_str()).collect();
        assert_eq!(names, ["x", "y", "z"]);
    }

    #[test]
    fn top_n_clamps() {
        let entries = vec![entry("a", 50, 0.0), entry("b", 40, 0.0), entry("c", 30, 0.0)];
        assert_eq!(top_n(&entries, 5).len(), 3);
        assert_eq!(top_n(&entries, 2).len(), 2);
        assert!(top_n(&entries, 0).is_empty());
        assert!(top_n(&[], 3).is_empty());
    }

    #[test]
    fn scoring_uses_normalised_text() {
        let mut store = ReviewStore::new();
        store.offer("ann".into(), review("one, two!!! @three http://x.co/four", 40));
        let entries = score_reviews(&store, &WordCount);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sentiment, 0.3);
    }

    #[test]
    fn one_bad_review_does_not_abort_the_pass() {
        let mut store = ReviewStore::new();
        store.offer("ann".into(), review("fine words here", 40));
        store.offer("ben".into(), review("boom", 50));
        store.offer("cat".into(), review("short", 30));
        let ranked = rank(&store, &WordCount);
        let names: Vec<&str> = ranked.iter().map(|e| e.reviewer.as_str()).collect();
        assert_eq!(names, ["ann", "cat"]);
    }
}
