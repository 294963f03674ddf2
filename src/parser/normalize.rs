use std::sync::LazyLock;

use regex::{Captures, Regex};

// URL first so its punctuation is not eaten one character at a time.
static NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+://\S+)|@([A-Za-z0-9]+)|[^0-9A-Za-z \t]").unwrap()
});

/// Reduce review text to plain words for sentiment scoring.
///
/// URLs and punctuation become spaces, `@handle` mentions are unwrapped to
/// the bare name, and whitespace runs collapse to single spaces.
pub fn normalize_review(text: &str) -> String {
    let replaced = NOISE_RE.replace_all(text, |caps: &Captures| match caps.get(2) {
        Some(handle) => format!(" {} ", handle.as_str()),
        None => " ".to_string(),
    });
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
