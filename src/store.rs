use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Ratings at or above this value must come with a "Yes" recommendation.
pub const RECOMMEND_THRESHOLD: f64 = 2.5;

/// Star rating in [0.0, 5.0], held as tenths so equality and ordering are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MAX_TENTHS: u8 = 50;

    pub fn from_tenths(tenths: u8) -> Option<Self> {
        (tenths <= Self::MAX_TENTHS).then_some(Rating(tenths))
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

impl Serialize for Rating {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

/// The boldface "would you recommend" answer on a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Yes,
    No,
}

impl Recommendation {
    pub fn as_bool(self) -> bool {
        matches!(self, Recommendation::Yes)
    }
}

impl FromStr for Recommendation {
    type Err = ();

    /// Exact match only; "yes" or "Yes!" are not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Recommendation::Yes),
            "No" => Ok(Recommendation::No),
            _ => Err(()),
        }
    }
}

/// A stored review. Never mutated once inserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub review_text: String,
    pub rating: Rating,
    pub recommend: bool,
    pub date: String,
    pub title: String,
}

/// Consistency gate: rating and recommendation must agree in direction.
pub fn admit(rating: f64, recommend: bool) -> bool {
    (rating >= RECOMMEND_THRESHOLD && recommend) || (rating < RECOMMEND_THRESHOLD && !recommend)
}

/// What happened to a review offered to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Stored,
    Inconsistent,
    Duplicate,
}

/// Reviews keyed by reviewer identity. First write wins.
///
/// Insertion order is kept so that iteration (and therefore ranking ties)
/// is reproducible across runs.
#[derive(Debug, Default)]
pub struct ReviewStore {
    index: HashMap<String, usize>,
    entries: Vec<(String, Review)>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the consistency gate, then insert if the reviewer is not yet present.
    pub fn offer(&mut self, reviewer: String, review: Review) -> Admission {
        if !admit(review.rating.value(), review.recommend) {
            return Admission::Inconsistent;
        }
        if self.index.contains_key(&reviewer) {
            return Admission::Duplicate;
        }
        self.index.insert(reviewer.clone(), self.entries.len());
        self.entries.push((reviewer, review));
        Admission::Stored
    }

    pub fn get(&self, reviewer: &str) -> Option<&Review> {
        self.index.get(reviewer).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Review)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
