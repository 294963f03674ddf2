//! Rating lookup for the review rating widget.
//!
//! The widget carries its score as a style class such as `rating-45`, always
//! in a fixed slot of the class list. Layout drift should only ever need
//! changes here.

use super::extract::ExtractionError;
use crate::store::Rating;

/// Zero-based position of the score class in the widget's class list.
const RATING_CLASS_POSITION: usize = 4;

const RATING_CLASS_SEPARATOR: char = '-';

/// Pick the score class out of the widget's `class` attribute.
pub fn rating_token(class_attr: &str) -> Option<&str> {
    class_attr.split_whitespace().nth(RATING_CLASS_POSITION)
}

/// Parse a score class (`rating-45`) into a rating (4.5).
pub fn parse_rating_token(token: &str) -> Result<Rating, ExtractionError> {
    let malformed = || ExtractionError::MalformedRating(token.to_string());
    let suffix = token
        .split(RATING_CLASS_SEPARATOR)
        .nth(1)
        .ok_or_else(malformed)?;
    let tenths: u8 = suffix.parse().map_err(|_| malformed())?;
    Rating::from_tenths(tenths).ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifth_class_is_the_token() {
        let attr = "rating-static hidden-xs margin-center rating-static-indv rating-45";
        assert_eq!(rating_token(attr), Some("rating-45"));
    }

    #[test]
    fn short_class_list() {
        assert_eq!(rating_token("rating-static rating-50"), None);
    }

    #[test]
    fn parses_tenths() {
        assert_eq!(parse_rating_token("rating-45").unwrap().to_string(), "4.5");
        assert_eq!(parse_rating_token("rating-50").unwrap().value(), 5.0);
        assert_eq!(parse_rating_token("rating-0").unwrap().value(), 0.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_rating_token("rating").is_err());
        assert!(parse_rating_token("rating-x5").is_err());
        assert!(parse_rating_token("rating-55").is_err());
        assert!(parse_rating_token("rating--5").is_err());
    }
}
