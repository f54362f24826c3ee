use thiserror::Error;

/// Failures that abort a scrape. Missing fields inside a review block are not
/// errors; they are recorded as sentinels on the review itself.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("document cannot be parsed as markup: {0}")]
    Parse(String),
}
