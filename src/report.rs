use itertools::Itertools;
use serde::Serialize;

use crate::review::Review;
use crate::sentiment::Sentiment;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingCount {
    pub rating: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentCount {
    pub sentiment: Sentiment,
    pub count: usize,
    /// Percentage of classified reviews carrying this label.
    pub share: f64,
}

/// Rating × sentiment counts. Rows are ratings ascending; `counts[i]` lines up
/// with `sentiments[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrossTab {
    pub sentiments: Vec<Sentiment>,
    pub rows: Vec<CrossTabRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTabRow {
    pub rating: f64,
    pub counts: Vec<usize>,
}

impl CrossTab {
    pub fn max_count(&self) -> usize {
        self.rows.iter().flat_map(|r| r.counts.iter().copied()).max().unwrap_or(0)
    }
}

/// Aggregates over one batch. Means are `None` when nothing qualifies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total: usize,
    pub rating_counts: Vec<RatingCount>,
    pub sentiment_counts: Vec<SentimentCount>,
    pub crosstab: CrossTab,
    pub mean_polarity: Option<f64>,
    pub mean_rating: Option<f64>,
}

impl Report {
    pub fn build(reviews: &[Review]) -> Self {
        Self {
            total: reviews.len(),
            rating_counts: rating_counts(reviews),
            sentiment_counts: sentiment_counts(reviews),
            crosstab: crosstab(reviews),
            mean_polarity: mean(reviews.iter().filter_map(Review::polarity)),
            mean_rating: mean(reviews.iter().filter_map(|r| r.rating.value())),
        }
    }

    pub fn rated(&self) -> usize {
        self.rating_counts.iter().map(|c| c.count).sum()
    }
}

fn rating_counts(reviews: &[Review]) -> Vec<RatingCount> {
    reviews
        .iter()
        .filter_map(|r| r.rating.value())
        .sorted_by(f64::total_cmp)
        .dedup_with_count()
        .map(|(count, rating)| RatingCount { rating, count })
        .collect()
}

/// Most frequent label first; ties keep Negative → Neutral → Positive order.
fn sentiment_counts(reviews: &[Review]) -> Vec<SentimentCount> {
    let labels: Vec<Sentiment> = reviews.iter().filter_map(Review::label).collect();
    let total = labels.len();

    Sentiment::ALL
        .iter()
        .map(|&sentiment| {
            let count = labels.iter().filter(|&&l| l == sentiment).count();
            SentimentCount {
                sentiment,
                count,
                share: percent(count, total),
            }
        })
        .filter(|c| c.count > 0)
        .sorted_by(|a, b| b.count.cmp(&a.count))
        .collect()
}

fn crosstab(reviews: &[Review]) -> CrossTab {
    let pairs: Vec<(f64, Sentiment)> = reviews
        .iter()
        .filter_map(|r| Some((r.rating.value()?, r.label()?)))
        .collect();

    let sentiments: Vec<Sentiment> = Sentiment::ALL
        .into_iter()
        .filter(|s| pairs.iter().any(|(_, l)| l == s))
        .collect();

    let rows = pairs
        .iter()
        .map(|(rating, _)| *rating)
        .sorted_by(f64::total_cmp)
        .dedup()
        .map(|rating| CrossTabRow {
            rating,
            counts: sentiments
                .iter()
                .map(|s| pairs.iter().filter(|(r, l)| *r == rating && l == s).count())
                .collect(),
        })
        .collect();

    CrossTab { sentiments, rows }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{Rating, SENTINEL};
    use crate::sentiment::SentimentScore;

    fn review(rating: Rating, polarity: f64) -> Review {
        let mut r = Review::new(rating, "text");
        r.sentiment = Some(SentimentScore {
            polarity,
            sentiment: Sentiment::from_polarity(polarity),
        });
        r
    }

    fn batch() -> Vec<Review> {
        vec![
            review(Rating::Raw("9".into()), 0.5),
            review(Rating::sentinel(), 0.0),
            review(Rating::Raw("3".into()), -0.4),
            review(Rating::Score(9.0), 0.3),
            review(Rating::Raw("7.5".into()), 0.05),
        ]
    }

    #[test]
    fn rating_distribution_sorted_ascending() {
        let report = Report::build(&batch());
        assert_eq!(
            report.rating_counts,
            vec![
                RatingCount { rating: 3.0, count: 1 },
                RatingCount { rating: 7.5, count: 1 },
                RatingCount { rating: 9.0, count: 2 },
            ]
        );
        assert_eq!(report.rated(), 4);
        assert_eq!(report.total, 5);
    }

    #[test]
    fn sentiment_distribution_and_shares() {
        let report = Report::build(&batch());
        let counts: Vec<(Sentiment, usize)> =
            report.sentiment_counts.iter().map(|c| (c.sentiment, c.count)).collect();
        assert_eq!(
            counts,
            vec![(Sentiment::Neutral, 2), (Sentiment::Positive, 2), (Sentiment::Negative, 1)]
        );
        let shares: f64 = report.sentiment_counts.iter().map(|c| c.share).sum();
        assert!((shares - 100.0).abs() < 1e-9);
        assert!((report.sentiment_counts[0].share - 40.0).abs() < 1e-9);
    }

    #[test]
    fn crosstab_skips_missing_ratings() {
        let report = Report::build(&batch());
        let ct = &report.crosstab;
        assert_eq!(ct.sentiments, vec![Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive]);
        assert_eq!(
            ct.rows,
            vec![
                CrossTabRow { rating: 3.0, counts: vec![1, 0, 0] },
                CrossTabRow { rating: 7.5, counts: vec![0, 1, 0] },
                CrossTabRow { rating: 9.0, counts: vec![0, 0, 2] },
            ]
        );
        assert_eq!(ct.max_count(), 2);
    }

    #[test]
    fn means_ignore_missing() {
        let report = Report::build(&batch());
        assert!((report.mean_rating.unwrap() - 7.125).abs() < 1e-9);
        assert!((report.mean_polarity.unwrap() - 0.09).abs() < 1e-9);
    }

    #[test]
    fn empty_batch_is_well_defined() {
        let report = Report::build(&[]);
        assert_eq!(report.total, 0);
        assert!(report.rating_counts.is_empty());
        assert!(report.sentiment_counts.is_empty());
        assert_eq!(report.crosstab, CrossTab::default());
        assert_eq!(report.mean_polarity, None);
        assert_eq!(report.mean_rating, None);
    }

    #[test]
    fn unclassified_batch_has_ratings_only() {
        let reviews = vec![Review::new(Rating::Raw("8".into()), SENTINEL)];
        let report = Report::build(&reviews);
        assert_eq!(report.rating_counts.len(), 1);
        assert!(report.sentiment_counts.is_empty());
        assert!(report.crosstab.rows.is_empty());
        assert_eq!(report.mean_polarity, None);
        assert_eq!(report.mean_rating, Some(8.0));
    }
}
