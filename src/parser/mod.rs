pub mod blocks;
pub mod extract;

use tracing::{info, warn};

use crate::review::Review;
use blocks::ReviewSelectors;

/// Page HTML → review blocks → one raw review per block, in page order.
/// Malformed markup degrades per field; it never aborts the scan.
pub fn process_document(html: &str, selectors: &ReviewSelectors) -> Vec<Review> {
    let doc = blocks::parse_document(html);
    let review_blocks = blocks::review_blocks(&doc, selectors);
    if review_blocks.is_empty() {
        warn!("No review blocks found on page");
    }

    let reviews: Vec<Review> = review_blocks
        .into_iter()
        .map(|block| extract::extract_review(block, selectors))
        .collect();
    info!("Extracted {} reviews", reviews.len());
    reviews
}

// ── Tests ──
