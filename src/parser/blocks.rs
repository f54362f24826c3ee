use scraper::{ElementRef, Html, Selector};

use crate::config::Settings;
use crate::error::ScrapeError;

/// Compiled CSS selectors for a review page: the block wrapping one review,
/// and the rating/text containers searched inside each block.
#[derive(Debug, Clone)]
pub struct ReviewSelectors {
    pub block: Selector,
    pub rating: Selector,
    pub text: Selector,
}

impl ReviewSelectors {
    pub fn new(block: &str, rating: &str, text: &str) -> Result<Self, ScrapeError> {
        Ok(Self {
            block: compile(block)?,
            rating: compile(rating)?,
            text: compile(text)?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ScrapeError> {
        Self::new(
            &settings.block_selector,
            &settings.rating_selector,
            &settings.text_selector,
        )
    }
}

fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("invalid selector {:?}: {}", css, e)))
}

/// Parse a page. The HTML parser recovers from any malformed markup, stray
/// NUL characters included, so this never fails.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// All review blocks in document order.
pub fn review_blocks<'a>(doc: &'a Html, selectors: &ReviewSelectors) -> Vec<ElementRef<'a>> {
    doc.select(&selectors.block).collect()
}

// ── Tests ──
