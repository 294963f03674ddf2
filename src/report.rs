use std::fmt::Write;

use serde::Serialize;

use crate::rank::RankedEntry;
use crate::store::{Rating, ReviewStore};

const DIVIDER_WIDTH: usize = 68;

#[derive(Debug, Serialize)]
pub struct ReportEntry<'a> {
    pub rank: usize,
    pub reviewer: &'a str,
    pub rating: Rating,
    pub sentiment: f64,
    pub recommend: bool,
    pub date: &'a str,
    pub title: &'a str,
    pub review: &'a str,
}

/// Join ranked entries back to their stored reviews.
pub fn report_entries<'a>(store: &'a ReviewStore, top: &'a [RankedEntry]) -> Vec<ReportEntry<'a>> {
    top.iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let review = store.get(&entry.reviewer)?;
            Some(ReportEntry {
                rank: i + 1,
                reviewer: &entry.reviewer,
                rating: entry.rating,
                sentiment: entry.sentiment,
                recommend: review.recommend,
                date: &review.date,
                title: &review.title,
                review: &review.review_text,
            })
        })
        .collect()
}

pub fn render_text(entries: &[ReportEntry<'_>]) -> String {
    let divider = "-".repeat(DIVIDER_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "TOP {} OVERLY POSITIVE REVIEWS", entries.len());
    let _ = writeln!(out, "{}", divider);
    for e in entries {
        let _ = writeln!(out, "{}", e.date);
        let _ = writeln!(out, "rating: {}/5.0", e.rating);
        let _ = writeln!(out, "{}: {}", e.reviewer, e.title);
        let _ = writeln!(out, "{}", e.review);
        let _ = writeln!(out, "{}", divider);
    }
    out
}

pub fn render_json(entries: &[ReportEntry<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}
