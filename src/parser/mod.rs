pub mod extract;
pub mod normalize;
pub mod rating;

use crate::store::{Recommendation, Review};
use extract::{ExtractionError, RawReview};

/// A review block resolved into a reviewer identity and a typed record.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReview {
    pub reviewer: String,
    pub review: Review,
}

#[derive(Debug, Default)]
pub struct ParsedPage {
    pub reviews: Vec<ParsedReview>,
    pub errors: Vec<ExtractionError>,
}

/// Two-step pipeline: markup → raw blocks → typed reviews.
pub fn parse_page(html: &str) -> ParsedPage {
    let mut page = ParsedPage::default();
    for raw in extract::extract_raw_reviews(html) {
        match raw.and_then(resolve) {
            Ok(review) => page.reviews.push(review),
            Err(e) => page.errors.push(e),
        }
    }
    page
}

fn resolve(raw: RawReview) -> Result<ParsedReview, ExtractionError> {
    let reviewer = extract::parse_username(&raw.reviewer_raw_label)?;
    let rating = rating::parse_rating_token(&raw.rating_class_token)?;
    let recommend: Recommendation = raw
        .recommend_flag
        .parse()
        .map_err(|_| ExtractionError::UnknownRecommendation(raw.recommend_flag.clone()))?;

    Ok(ParsedReview {
        reviewer,
        review: Review {
            review_text: raw.content,
            rating,
            recommend: recommend.as_bool(),
            date: raw.date,
            title: raw.title,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn page_a_fixture() {
        let page = parse_page(&fixture("page_a"));
        assert!(page.errors.is_empty(), "unexpected errors: {:?}", page.errors);
        let names: Vec<&str> = page.reviews.iter().map(|r| r.reviewer.as_str()).collect();
        assert_eq!(names, ["alice", "bob"]);
        assert_eq!(page.reviews[0].review.rating.to_string(), "4.5");
        assert!(page.reviews[0].review.recommend);
        assert_eq!(page.reviews[1].review.rating.to_string(), "1.0");
        assert!(page.reviews[1].review.recommend);
    }

    #[test]
    fn malformed_fixture_skips_bad_blocks() {
        let page = parse_page(&fixture("malformed"));
        let names: Vec<&str> = page.reviews.iter().map(|r| r.reviewer.as_str()).collect();
        assert_eq!(names, ["mary-jo-smith"]);
        assert_eq!(page.errors.len(), 3);
        assert!(page.errors.contains(&ExtractionError::MissingField("content")));
        assert!(page
            .errors
            .contains(&ExtractionError::UnknownRecommendation("Maybe".to_string())));
        assert!(page
            .errors
            .contains(&ExtractionError::MalformedRating("rating-x".to_string())));
    }

    #[test]
    fn parsing_is_pure() {
        let html = fixture("page_b");
        let first = parse_page(&html);
        let second = parse_page(&html);
        assert_eq!(first.reviews, second.reviews);
    }
}
