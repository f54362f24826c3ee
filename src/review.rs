use std::fmt;

use serde::Serialize;

use crate::sentiment::{Sentiment, SentimentScore};

/// Placeholder for a field the review block did not provide.
pub const SENTINEL: &str = "N/A";

/// A review's rating as it moves through the pipeline: the raw string pulled
/// out of the page, then a finite number or the missing marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rating {
    Raw(String),
    Score(f64),
    Missing,
}

impl Rating {
    pub fn sentinel() -> Self {
        Rating::Raw(SENTINEL.to_string())
    }

    /// Coerce to `Score` or `Missing`. Never fails, and `Score`/`Missing` are
    /// fixed points, so re-applying is harmless.
    pub fn normalize(&self) -> Rating {
        match self {
            Rating::Raw(raw) => parse_rating(raw).map_or(Rating::Missing, Rating::Score),
            other => other.clone(),
        }
    }

    /// Numeric value after normalization, if any.
    pub fn value(&self) -> Option<f64> {
        match self.normalize() {
            Rating::Score(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Raw(raw) => f.write_str(raw),
            Rating::Score(v) => write!(f, "{}", v),
            Rating::Missing => f.write_str("-"),
        }
    }
}

fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub rating: Rating,
    pub text: String,
    #[serde(flatten)]
    pub sentiment: Option<SentimentScore>,
}

impl Review {
    pub fn new(rating: Rating, text: impl Into<String>) -> Self {
        Self {
            rating,
            text: text.into(),
            sentiment: None,
        }
    }

    pub fn normalize(&mut self) {
        self.rating = self.rating.normalize();
    }

    pub fn polarity(&self) -> Option<f64> {
        self.sentiment.map(|s| s.polarity)
    }

    pub fn label(&self) -> Option<Sentiment> {
        self.sentiment.map(|s| s.sentiment)
    }
}

pub fn normalize_all(reviews: &mut [Review]) {
    for review in reviews {
        review.normalize();
    }
}

// ── Tests ──
