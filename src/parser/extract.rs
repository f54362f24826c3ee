use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use scraper::ElementRef;
use tracing::debug;

use super::blocks::ReviewSelectors;
use crate::review::{Rating, Review, SENTINEL};

static RATING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").unwrap());

/// One review per block. Missing containers fall back to the "N/A" sentinel;
/// a block is never dropped.
pub fn extract_review(block: ElementRef<'_>, selectors: &ReviewSelectors) -> Review {
    let rating = block
        .select(&selectors.rating)
        .next()
        .and_then(rating_from)
        .map(Rating::Raw)
        .unwrap_or_else(|| {
            debug!("Review block has no usable rating; using {}", SENTINEL);
            Rating::sentinel()
        });

    let text = block
        .select(&selectors.text)
        .next()
        .map(text_from)
        .unwrap_or_else(|| {
            debug!("Review block has no text container; using {}", SENTINEL);
            SENTINEL.to_string()
        });

    Review::new(rating, text)
}

/// First number in the container's text, decimal part included
/// ("Overall Rating: 8.5/10" -> "8.5").
fn rating_from(container: ElementRef<'_>) -> Option<String> {
    let raw: String = container.text().collect();
    first_number(&raw).map(str::to_string)
}

pub fn first_number(text: &str) -> Option<&str> {
    RATING_RE.find(text).map(|m| m.as_str())
}

/// Every descendant text node, joined by single spaces with whitespace runs
/// collapsed and the ends trimmed.
fn text_from(container: ElementRef<'_>) -> String {
    container.text().flat_map(str::split_whitespace).join(" ")
}

// ── Tests ──
