use tracing::info;

use crate::review::Review;

/// Reviews rated at least `min_rating` (inclusive), in input order, with the
/// rating normalized. Reviews without a numeric rating never pass.
pub fn filter_by_min_rating(reviews: &[Review], min_rating: f64) -> Vec<Review> {
    let kept: Vec<Review> = reviews
        .iter()
        .filter(|r| r.rating.value().is_some_and(|v| v >= min_rating))
        .map(|r| {
            let mut r = r.clone();
            r.normalize();
            r
        })
        .collect();
    info!("{} of {} reviews rated >= {}", kept.len(), reviews.len(), min_rating);
    kept
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{Rating, SENTINEL};

    fn batch() -> Vec<Review> {
        vec![
            Review::new(Rating::Raw("9".into()), "a"),
            Review::new(Rating::sentinel(), "b"),
            Review::new(Rating::Raw("8".into()), "c"),
            Review::new(Rating::Score(7.99), "d"),
            Review::new(Rating::Missing, "e"),
            Review::new(Rating::Raw("10".into()), SENTINEL),
            Review::new(Rating::Raw("eight".into()), "g"),
        ]
    }

    fn texts(reviews: &[Review]) -> Vec<&str> {
        reviews.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn keeps_ratings_at_or_above_threshold_in_order() {
        let kept = filter_by_min_rating(&batch(), 8.0);
        assert_eq!(texts(&kept), vec!["a", "c", SENTINEL]);
        assert!(kept.iter().all(|r| matches!(r.rating, Rating::Score(_))));
    }

    #[test]
    fn missing_ratings_never_pass() {
        let kept = filter_by_min_rating(&batch(), f64::NEG_INFINITY);
        assert_eq!(texts(&kept), vec!["a", "c", "d", SENTINEL]);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let once = filter_by_min_rating(&batch(), 8.0);
        let twice = filter_by_min_rating(&once, 8.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_result_is_valid() {
        assert!(filter_by_min_rating(&batch(), 11.0).is_empty());
        assert!(filter_by_min_rating(&[], 8.0).is_empty());
    }
}
