//! Lexicon-based polarity scoring.
//!
//! Polarity is in [-1.0, 1.0]: negative for negative sentiment, positive for
//! positive, 0.0 for neutral or when nothing in the text is recognised.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("scorer produced a non-finite polarity for {0:?}")]
    NonFinite(String),
    #[error("failed to read lexicon {path}: {source}")]
    LexiconIo {
        path: String,
        source: std::io::Error,
    },
    #[error("lexicon {path} is not a JSON object of word -> polarity: {source}")]
    LexiconFormat {
        path: String,
        source: serde_json::Error,
    },
}

pub trait SentimentScorer {
    /// Polarity of already-normalised text.
    fn polarity(&self, text: &str) -> Result<f64, SentimentError>;
}

/// Multiplier applied to a negated word.
const NEGATION_FACTOR: f64 = -0.5;

const NEGATORS: &[&str] = &["not", "no", "never", "nothing", "cannot", "dont", "didnt", "wont", "cant"];

/// First halves of split "n't" contractions. They only negate when followed
/// by the leftover "t"; on their own they are ordinary words ("won", "Don").
const CONTRACTION_STEMS: &[&str] = &[
    "don", "didn", "doesn", "isn", "wasn", "weren", "aren", "won", "wouldn", "couldn", "shouldn",
    "hasn", "haven", "hadn", "can", "ain",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.2),
    ("super", 1.3),
    ("extremely", 1.5),
    ("absolutely", 1.5),
    ("incredibly", 1.5),
    ("totally", 1.3),
    ("truly", 1.2),
    ("quite", 1.1),
];

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("courteous", 0.5),
    ("easy", 0.43),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("friendly", 0.38),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("honest", 0.6),
    ("knowledgeable", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("nice", 0.6),
    ("outstanding", 0.5),
    ("patient", 0.4),
    ("perfect", 1.0),
    ("pleasant", 0.73),
    ("pleased", 0.5),
    ("polite", 0.3),
    ("professional", 0.1),
    ("quick", 0.33),
    ("recommend", 0.3),
    ("smooth", 0.4),
    ("wonderful", 1.0),
    // negative
    ("angry", -0.5),
    ("awful", -1.0),
    ("bad", -0.7),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("dishonest", -0.6),
    ("horrible", -1.0),
    ("lied", -0.6),
    ("poor", -0.4),
    ("rude", -0.3),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("unhappy", -0.6),
    ("unprofessional", -0.5),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

pub struct LexiconScorer {
    lexicon: HashMap<String, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().map(|&(w, p)| (w.to_string(), p)).collect(),
        }
    }

    /// Merge extra word polarities over the built-in lexicon.
    pub fn with_overrides(mut self, overrides: HashMap<String, f64>) -> Self {
        for (word, polarity) in overrides {
            self.lexicon.insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
        }
        self
    }

    /// Load overrides from a JSON file of `{ "word": polarity }`.
    pub fn with_lexicon_file(self, path: &Path) -> Result<Self, SentimentError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| SentimentError::LexiconIo {
            path: display.clone(),
            source,
        })?;
        let overrides: HashMap<String, f64> =
            serde_json::from_str(&raw).map_err(|source| SentimentError::LexiconFormat {
                path: display,
                source,
            })?;
        Ok(self.with_overrides(overrides))
    }

    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len()
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> Result<f64, SentimentError> {
        let mut total = 0.0;
        let mut matched = 0usize;
        let mut negated = false;
        let mut intensity = 1.0;
        let mut after_stem = false;

        for token in text.split_whitespace().map(str::to_lowercase) {
            // "t" is what is left of a split contraction ("didn t")
            if token == "t" {
                if after_stem {
                    negated = true;
                }
                after_stem = false;
                continue;
            }
            after_stem = false;
            if NEGATORS.contains(&token.as_str()) {
                negated = true;
                continue;
            }
            if let Some(&(_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == token) {
                intensity *= factor;
                continue;
            }
            if let Some(&polarity) = self.lexicon.get(&token) {
                let mut score = (polarity * intensity).clamp(-1.0, 1.0);
                if negated {
                    score *= NEGATION_FACTOR;
                }
                total += score;
                matched += 1;
            }
            // modifiers only reach the next word
            negated = false;
            intensity = 1.0;
            after_stem = CONTRACTION_STEMS.contains(&token.as_str());
        }

        if matched == 0 {
            return Ok(0.0);
        }
        let polarity = (total / matched as f64).clamp(-1.0, 1.0);
        if !polarity.is_finite() {
            return Err(SentimentError::NonFinite(text.to_string()));
        }
        Ok(polarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconScorer::new().polarity(text).unwrap()
    }

    #[test]
    fn empty_is_neutral() {
        assert_eq!(score(""), 0.0);
        assert_eq!(score("the car was blue"), 0.0);
    }

    #[test]
    fn sign_convention() {
        assert!(score("great helpful staff") > 0.0);
        assert!(score("terrible rude staff") < 0.0);
    }

    #[test]
    fn stays_in_range() {
        for text in ["absolutely extremely very best", "extremely very worst", "great terrible"] {
            let s = score(text);
            assert!((-1.0..=1.0).contains(&s), "{} -> {}", text, s);
        }
    }

    #[test]
    fn negation_flips_and_damps() {
        let plain = score("good");
        let negated = score("not good");
        assert!(negated < 0.0);
        assert!(negated.abs() < plain.abs());
        // contraction split by the normaliser
        assert!(score("wasn t helpful") < 0.0);
        assert_eq!(score("never bad"), score("bad") * NEGATION_FACTOR);
    }

    #[test]
    fn contraction_stems_alone_do_not_negate() {
        assert!(score("they won best dealer award") > 0.0);
        assert_eq!(score("they won best dealer award"), score("best"));
        assert!(score("Don was great") > 0.0);
        assert!(score("won t recommend") < 0.0);
        assert_eq!(score("didn t like it but wasn t bad"), score("not bad"));
    }

    #[test]
    fn intensifier_strengthens() {
        assert!(score("very good") > score("good"));
        // modifier does not leak past the word it modifies
        assert_eq!(score("very good nice"), (score("very good") + score("nice")) / 2.0);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(score("GREAT"), score("great"));
    }

    #[test]
    fn overrides_are_clamped() {
        let scorer = LexiconScorer::new().with_overrides(HashMap::from([
            ("stellar".to_string(), 3.0),
            ("Great".to_string(), -0.2),
        ]));
        assert_eq!(scorer.polarity("stellar").unwrap(), 1.0);
        assert_eq!(scorer.polarity("great").unwrap(), -0.2);
    }

    #[test]
    fn missing_lexicon_file() {
        let err = LexiconScorer::new()
            .with_lexicon_file(Path::new("tests/fixtures/no_such_lexicon.json"))
            .err()
            .unwrap();
        assert!(matches!(err, SentimentError::LexiconIo { .. }));
    }
}
