use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Settings;
use crate::fetch;
use crate::filter::filter_by_min_rating;
use crate::parser::{self, blocks::ReviewSelectors};
use crate::render;
use crate::report::Report;
use crate::review::{normalize_all, Review};
use crate::sentiment::{classify_all, PolarityScorer};

/// Where the review page comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `--input` wins over `--url`, which wins over the configured URL.
    pub fn resolve(url: Option<String>, input: Option<PathBuf>, settings: &Settings) -> Self {
        match (input, url) {
            (Some(path), _) => Source::File(path),
            (None, Some(url)) => Source::Url(url),
            (None, None) => Source::Url(settings.url.clone()),
        }
    }

    /// Fetch or read the page and extract its raw reviews.
    pub async fn load(&self, settings: &Settings) -> Result<Vec<Review>> {
        let selectors = ReviewSelectors::from_settings(settings)?;
        let html = match self {
            Source::Url(url) => fetch::fetch_document(settings, url).await?,
            Source::File(path) => {
                info!("Reading saved page: {}", path.display());
                let bytes = std::fs::read(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                fetch::decode_body(&bytes)?
            }
        };
        Ok(parser::process_document(&html, &selectors))
    }

    /// The flag that selects this source on the command line.
    pub fn cli_args(&self) -> String {
        match self {
            Source::Url(url) => format!("--url {}", shell_quote(url)),
            Source::File(path) => format!("--input {}", shell_quote(&path.display().to_string())),
        }
    }

    /// Human title for the reviewed show: the MyAnimeList slug for URLs
    /// (`/anime/21/One_piece/reviews` -> "One piece"), the file stem otherwise.
    pub fn title(&self) -> String {
        let slug = match self {
            Source::Url(url) => url
                .trim_end_matches('/')
                .rsplit('/')
                .find(|seg| !seg.is_empty() && *seg != "reviews" && !seg.chars().all(|c| c.is_ascii_digit()))
                .map(str::to_string),
            Source::File(path) => path.file_stem().map(|s| s.to_string_lossy().into_owned()),
        };
        slug.map(|s| s.replace(['_', '-'], " "))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "Anime".to_string())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn shell_quote(s: &str) -> String {
    if s.chars().any(|c| c.is_whitespace() || "'\"$&;|<>()".contains(c)) {
        format!("'{}'", s.replace('\'', r"'\''"))
    } else {
        s.to_string()
    }
}

/// One stage of the analysis as shown to the user: a heading, the command
/// that reproduces it, and what it printed.
#[derive(Debug, Clone)]
pub struct Step {
    pub title: &'static str,
    pub args: String,
    pub output: String,
}

/// Results of every stage, in pipeline order.
pub struct PipelineRun {
    pub scraped: Vec<Review>,
    pub analyzed: Vec<Review>,
    pub high_rated: Vec<Review>,
    pub report: Report,
    pub min_rating: f64,
}

impl PipelineRun {
    pub fn execute(scraped: Vec<Review>, scorer: &dyn PolarityScorer, min_rating: f64) -> Self {
        let mut analyzed = scraped.clone();
        normalize_all(&mut analyzed);
        classify_all(scorer, &mut analyzed);
        let high_rated = filter_by_min_rating(&analyzed, min_rating);
        let report = Report::build(&analyzed);

        Self {
            scraped,
            analyzed,
            high_rated,
            report,
            min_rating,
        }
    }

    pub fn steps(&self, head: usize) -> Vec<Step> {
        vec![
            Step {
                title: "1. Scrape Reviews",
                args: format!("scrape -n {}", head),
                output: format!("First few reviews:\n{}", render::review_table(&self.scraped, head)),
            },
            Step {
                title: "2. Perform Sentiment Analysis",
                args: format!("analyze -n {}", head),
                output: format!(
                    "Reviews with sentiment analysis:\n{}",
                    render::review_table(&self.analyzed, head)
                ),
            },
            Step {
                title: "3. Filter and Analyze High-Rated Reviews",
                args: format!("filter --min {} -n {}", self.min_rating, head),
                output: format!(
                    "High-rated reviews (rating >= {}):\n{}",
                    self.min_rating,
                    render::review_table(&self.high_rated, head)
                ),
            },
            Step {
                title: "4. Visualizations",
                args: "report --view charts".to_string(),
                output: format!(
                    "{}\n{}",
                    render::rating_chart(&self.report),
                    render::sentiment_chart(&self.report)
                ),
            },
            Step {
                title: "5. Additional Analysis: Correlation between Ratings and Sentiment",
                args: "report --view correlation".to_string(),
                output: format!(
                    "{}\n{}",
                    render::heatmap(&self.report),
                    render::summary(&self.report)
                ),
            },
        ]
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::Rating;
    use crate::sentiment::{LexiconScorer, Sentiment};

    fn fixture_run() -> PipelineRun {
        let html = std::fs::read_to_string("tests/fixtures/three_blocks.html").unwrap();
        let selectors = ReviewSelectors::from_settings(&Settings::default()).unwrap();
        let scraped = parser::process_document(&html, &selectors);
        PipelineRun::execute(scraped, &LexiconScorer::new(), 8.0)
    }

    #[test]
    fn stages_chain_in_order() {
        let run = fixture_run();
        // Raw stage keeps the extracted strings
        assert_eq!(run.scraped[1].rating, Rating::sentinel());
        assert!(run.scraped.iter().all(|r| r.sentiment.is_none()));
        // Analyzed stage is normalized and classified
        assert_eq!(run.analyzed[1].rating, Rating::Missing);
        assert_eq!(run.analyzed[0].label(), Some(Sentiment::Positive));
        assert_eq!(run.analyzed[2].label(), Some(Sentiment::Neutral));
        assert_eq!(run.high_rated.len(), 1);
        assert_eq!(run.report.total, 3);
    }

    #[test]
    fn steps_follow_pipeline_order() {
        let steps = fixture_run().steps(5);
        let titles: Vec<&str> = steps.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "1. Scrape Reviews",
                "2. Perform Sentiment Analysis",
                "3. Filter and Analyze High-Rated Reviews",
                "4. Visualizations",
                "5. Additional Analysis: Correlation between Ratings and Sentiment",
            ]
        );
        assert_eq!(steps[2].args, "filter --min 8 -n 5");
        assert!(steps[4].output.contains("Summary Statistics:"));
    }

    #[test]
    fn source_resolution_order() {
        let settings = Settings::default();
        assert_eq!(
            Source::resolve(None, None, &settings),
            Source::Url(crate::config::DEFAULT_URL.to_string())
        );
        assert_eq!(
            Source::resolve(Some("https://x/y".into()), None, &settings),
            Source::Url("https://x/y".into())
        );
        assert_eq!(
            Source::resolve(Some("https://x/y".into()), Some("page.html".into()), &settings),
            Source::File("page.html".into())
        );
    }

    #[test]
    fn title_from_source() {
        let url = Source::Url(crate::config::DEFAULT_URL.to_string());
        assert_eq!(url.title(), "One piece");
        assert_eq!(Source::File("saved/bleach_reviews.html".into()).title(), "bleach reviews");
        assert_eq!(Source::Url("https://example.com/".into()).title(), "example.com");
    }

    #[test]
    fn cli_args_quote_when_needed() {
        assert_eq!(Source::Url("https://a/b".into()).cli_args(), "--url https://a/b");
        assert_eq!(
            Source::File("my page.html".into()).cli_args(),
            "--input 'my page.html'"
        );
    }
}
