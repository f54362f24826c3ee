//! Word-level polarity lexicon.
//!
//! Each sentiment word carries a fixed polarity. Intensifiers scale the next
//! sentiment word, negations flip it at half strength, and the text's score is
//! the mean over every sentiment word found.

use std::collections::HashMap;

use super::PolarityScorer;

const NEGATION_FACTOR: f64 = -0.5;

const WORDS: &[(&str, f64)] = &[
    // Praise
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("brilliant", 0.9),
    ("captivating", 0.7),
    ("charming", 0.5),
    ("compelling", 0.5),
    ("cool", 0.35),
    ("emotional", 0.3),
    ("enjoy", 0.4),
    ("enjoyable", 0.4),
    ("enjoyed", 0.4),
    ("entertaining", 0.5),
    ("epic", 0.6),
    ("excellent", 1.0),
    ("exciting", 0.3),
    ("fantastic", 0.4),
    ("favorite", 0.5),
    ("favourite", 0.5),
    ("fine", 0.4167),
    ("fun", 0.3),
    ("funny", 0.25),
    ("genius", 0.8),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("hilarious", 0.5),
    ("incredible", 0.9),
    ("interesting", 0.5),
    ("legendary", 0.7),
    ("like", 0.1),
    ("liked", 0.3),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("masterpiece", 1.0),
    ("memorable", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("phenomenal", 0.9),
    ("pleasant", 0.7333),
    ("recommend", 0.4),
    ("solid", 0.3),
    ("spectacular", 0.8),
    ("strong", 0.4333),
    ("stunning", 0.5),
    ("superb", 1.0),
    ("wonderful", 1.0),
    ("worth", 0.3),
    // Lukewarm
    ("average", -0.05),
    ("decent", 0.1667),
    ("mediocre", -0.3),
    ("okay", 0.1),
    ("ok", 0.1),
    ("predictable", -0.2),
    ("slow", -0.3),
    ("long", -0.05),
    // Criticism
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("confusing", -0.4),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("dragged", -0.4),
    ("dull", -0.5),
    ("filler", -0.3),
    ("garbage", -0.8),
    ("hate", -0.8),
    ("hated", -0.9),
    ("horrible", -1.0),
    ("lame", -0.5),
    ("messy", -0.4),
    ("overrated", -0.5),
    ("pointless", -0.6),
    ("poor", -0.4),
    ("repetitive", -0.5),
    ("sad", -0.5),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("tedious", -0.6),
    ("ugly", -0.7),
    ("unbearable", -0.9),
    ("waste", -0.6),
    ("weak", -0.375),
    ("worse", -0.4),
    ("worst", -1.0),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.4),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.5),
    ("most", 1.3),
    ("pretty", 1.1),
    ("quite", 1.1),
    ("really", 1.3),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("super", 1.4),
    ("totally", 1.3),
    ("truly", 1.3),
    ("very", 1.3),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "nothing", "hardly", "barely", "cannot"];

/// Words that may sit between a modifier and the word it modifies.
const FILLERS: &[&str] = &["a", "an", "the", "so", "that", "this", "at", "all", "be", "been"];

pub struct LexiconScorer {
    words: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            words: WORDS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn word_scores(&self, text: &str) -> Vec<f64> {
        let lower = text.to_lowercase().replace('\u{2019}', "'");
        let mut scores = Vec::new();
        let mut intensity: Option<f64> = None;
        let mut negated = false;

        for token in tokenize(&lower) {
            if is_negation(token) {
                negated = true;
            } else if let Some(&factor) = self.intensifiers.get(token) {
                intensity = Some(intensity.unwrap_or(1.0) * factor);
            } else if let Some(&polarity) = self.words.get(token) {
                let mut score = polarity * intensity.unwrap_or(1.0);
                if negated {
                    score *= NEGATION_FACTOR;
                }
                scores.push(score.clamp(-1.0, 1.0));
                intensity = None;
                negated = false;
            } else if !FILLERS.contains(&token) {
                intensity = None;
                negated = false;
            }
        }

        scores
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let scores = self.word_scores(text);
        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment;

    fn polarity(text: &str) -> f64 {
        LexiconScorer::new().polarity(text)
    }

    fn label(text: &str) -> Sentiment {
        Sentiment::from_polarity(polarity(text))
    }

    #[test]
    fn praise_is_positive() {
        assert_eq!(label("Amazing journey, loved every arc"), Sentiment::Positive);
        assert_eq!(label("One of the best shows ever made"), Sentiment::Positive);
    }

    #[test]
    fn criticism_is_negative() {
        assert_eq!(label("Boring filler and terrible pacing"), Sentiment::Negative);
    }

    #[test]
    fn sentinel_and_empty_are_neutral() {
        assert_eq!(polarity("N/A"), 0.0);
        assert_eq!(polarity(""), 0.0);
        assert_eq!(label("N/A"), Sentiment::Neutral);
    }

    #[test]
    fn lukewarm_lands_on_the_boundary() {
        // "okay" scores exactly 0.1, which is not strictly above the cut point.
        assert_eq!(polarity("It was okay I guess"), 0.1);
        assert_eq!(label("It was okay I guess"), Sentiment::Neutral);
    }

    #[test]
    fn negation_flips_at_half_strength() {
        assert!((polarity("not good") - (-0.35)).abs() < 1e-9);
        assert!((polarity("it isn't a good show") - (-0.35)).abs() < 1e-9);
        assert_eq!(label("not good"), Sentiment::Negative);
    }

    #[test]
    fn intensifier_scales_next_word_only() {
        assert!((polarity("very good") - 0.91).abs() < 1e-9);
        // The intensifier is consumed by "good"; "nice" is unmodified.
        assert!((polarity("very good and nice") - (0.91 + 0.6) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn unrelated_word_clears_pending_modifiers() {
        assert!((polarity("not the ending, which was good") - 0.7).abs() < 1e-9);
    }

    #[test]
    fn scores_stay_in_range_and_are_deterministic() {
        let scorer = LexiconScorer::new();
        let texts = [
            "absolutely extremely incredibly awesome",
            "never ever absolutely extremely horrible",
            "masterpiece masterpiece worst",
            "",
        ];
        for t in texts {
            let p = scorer.polarity(t);
            assert!((-1.0..=1.0).contains(&p), "{} -> {}", t, p);
            assert_eq!(p, scorer.polarity(t));
        }
    }
}
