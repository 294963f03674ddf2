use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use super::rating;

static REVIEW_ENTRY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.review-entry").unwrap());
static USER_LABEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.italic").unwrap());
static RATING_WIDGET: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.rating-static").unwrap());
static CONTENT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.review-content").unwrap());
static RECOMMEND: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.boldest").unwrap());
static DATE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.font-20").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());

#[derive(Debug, Error, PartialEq)]
pub enum ExtractionError {
    #[error("review block has no {0} element")]
    MissingField(&'static str),
    #[error("reviewer label {0:?} has no name segment")]
    MalformedUsername(String),
    #[error("rating widget has no score class")]
    MissingRatingToken,
    #[error("rating class {0:?} does not encode a rating")]
    MalformedRating(String),
    #[error("recommendation {0:?} is neither \"Yes\" nor \"No\"")]
    UnknownRecommendation(String),
}

/// One review block as it appears on the page, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReview {
    pub reviewer_raw_label: String,
    pub rating_class_token: String,
    pub content: String,
    pub recommend_flag: String,
    pub date: String,
    pub title: String,
}

/// Pull every review block out of a page. Malformed blocks come back as
/// errors in their own slot so siblings are unaffected.
pub fn extract_raw_reviews(html: &str) -> Vec<Result<RawReview, ExtractionError>> {
    let document = Html::parse_document(html);
    document.select(&REVIEW_ENTRY).map(extract_block).collect()
}

fn extract_block(block: ElementRef<'_>) -> Result<RawReview, ExtractionError> {
    let reviewer_raw_label = text_of(block, &USER_LABEL, "reviewer")?;

    let widget = block
        .select(&RATING_WIDGET)
        .next()
        .ok_or(ExtractionError::MissingField("rating"))?;
    let rating_class_token = widget
        .value()
        .attr("class")
        .and_then(rating::rating_token)
        .ok_or(ExtractionError::MissingRatingToken)?
        .to_string();

    Ok(RawReview {
        reviewer_raw_label,
        rating_class_token,
        content: text_of(block, &CONTENT, "content")?.trim().to_string(),
        recommend_flag: text_of(block, &RECOMMEND, "recommendation")?.trim().to_string(),
        date: text_of(block, &DATE, "date")?.trim().to_string(),
        title: text_of(block, &TITLE, "title")?.trim().to_string(),
    })
}

fn text_of(block: ElementRef<'_>, selector: &Selector, field: &'static str) -> Result<String, ExtractionError> {
    block
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or(ExtractionError::MissingField(field))
}

/// Reviewer identity from a label like `"- john-smith"`.
///
/// The label is split on hyphens; everything after the first segment is the
/// name, rejoined so hyphenated names survive.
pub fn parse_username(label: &str) -> Result<String, ExtractionError> {
    let segments: Vec<&str> = label.split('-').collect();
    let name = match segments.len() {
        0 | 1 => return Err(ExtractionError::MalformedUsername(label.to_string())),
        2 => segments[1].to_string(),
        _ => segments[1..].join("-"),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(ExtractionError::MalformedUsername(label.to_string()));
    }
    Ok(name.to_string())
}
