pub mod lexicon;

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::review::Review;

pub use lexicon::LexiconScorer;

pub const POSITIVE_THRESHOLD: f64 = 0.1;
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Scores free text with a polarity in [-1.0, 1.0]. Implementations must be
/// deterministic: the same text always yields the same score.
pub trait PolarityScorer {
    fn polarity(&self, text: &str) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// Fixed cut points; exactly ±0.1 is Neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Polarity and its label, always produced together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScore {
    pub polarity: f64,
    pub sentiment: Sentiment,
}

pub fn score_text(scorer: &dyn PolarityScorer, text: &str) -> SentimentScore {
    let raw = scorer.polarity(text);
    let polarity = if raw.is_nan() { 0.0 } else { raw.clamp(-1.0, 1.0) };
    SentimentScore {
        polarity,
        sentiment: Sentiment::from_polarity(polarity),
    }
}

/// Attach a sentiment score to every review. The "N/A" sentinel text goes
/// through the scorer like any other text.
pub fn classify_all(scorer: &dyn PolarityScorer, reviews: &mut [Review]) {
    for review in reviews.iter_mut() {
        review.sentiment = Some(score_text(scorer, &review.text));
    }
    info!("Classified {} reviews", reviews.len());
}

// ── Tests ──
