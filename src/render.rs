//! Plain-text renderings of a review batch and its report: preview table, rating
//! bar chart, sentiment share chart, rating × sentiment heatmap, summary.

use crate::report::Report;
use crate::review::Review;

const BAR_WIDTH: usize = 40;
const TEXT_WIDTH: usize = 60;
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// First `limit` reviews as a table. Polarity and sentiment columns appear
/// only once the batch has been classified.
pub fn review_table(reviews: &[Review], limit: usize) -> String {
    if reviews.is_empty() {
        return "No reviews.\n".to_string();
    }

    let classified = reviews.iter().any(|r| r.sentiment.is_some());
    let mut out = String::new();
    if classified {
        out.push_str(&format!(
            "{:>3} | {:>6} | {:>8} | {:<9} | {}\n",
            "#", "Rating", "Polarity", "Sentiment", "Text"
        ));
        out.push_str(&format!("{}\n", "-".repeat(100)));
    } else {
        out.push_str(&format!("{:>3} | {:>6} | {}\n", "#", "Rating", "Text"));
        out.push_str(&format!("{}\n", "-".repeat(75)));
    }

    for (i, r) in reviews.iter().take(limit).enumerate() {
        let text = truncate(&r.text, TEXT_WIDTH);
        match r.sentiment {
            Some(s) => out.push_str(&format!(
                "{:>3} | {:>6} | {:>8.3} | {:<9} | {}\n",
                i, r.rating.to_string(), s.polarity, s.sentiment, text
            )),
            None if classified => out.push_str(&format!(
                "{:>3} | {:>6} | {:>8} | {:<9} | {}\n",
                i, r.rating.to_string(), "-", "-", text
            )),
            None => out.push_str(&format!("{:>3} | {:>6} | {}\n", i, r.rating.to_string(), text)),
        }
    }

    if reviews.len() > limit {
        out.push_str(&format!("... {} more\n", reviews.len() - limit));
    }
    out.push_str(&format!("\n{} reviews\n", reviews.len()));
    out
}

pub fn rating_chart(report: &Report) -> String {
    if report.rating_counts.is_empty() {
        return "No valid ratings to plot.\n".to_string();
    }

    let max = report.rating_counts.iter().map(|c| c.count).max().unwrap_or(0);
    let mut out = String::from("Distribution of review ratings\n");
    out.push_str(&format!("{:>6} | Number of reviews\n", "Rating"));
    for c in &report.rating_counts {
        out.push_str(&format!(
            "{:>6} | {} {}\n",
            format_rating(c.rating),
            "█".repeat(scaled(c.count, max)),
            c.count
        ));
    }
    out.push_str(&format!("(rating /10; {} of {} reviews rated)\n", report.rated(), report.total));
    out
}

/// Stand-in for a pie chart: each label's share of the whole as a bar.
pub fn sentiment_chart(report: &Report) -> String {
    if report.sentiment_counts.is_empty() {
        return "No classified reviews to plot.\n".to_string();
    }

    let mut out = String::from("Distribution of review sentiments\n");
    for c in &report.sentiment_counts {
        let width = (c.share / 100.0 * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "{:<9} {:>5.1}% {} ({})\n",
            c.sentiment,
            c.share,
            "█".repeat(width),
            c.count
        ));
    }
    out
}

pub fn heatmap(report: &Report) -> String {
    let ct = &report.crosstab;
    if ct.rows.is_empty() {
        return "No rated and classified reviews to correlate.\n".to_string();
    }

    let max = ct.max_count();
    let mut out = String::from("Correlation between ratings and sentiments\n");
    out.push_str(&format!("{:>6} |", "Rating"));
    for s in &ct.sentiments {
        out.push_str(&format!(" {:^10}", s.as_str()));
    }
    out.push('\n');
    out.push_str(&format!("{}\n", "-".repeat(8 + 11 * ct.sentiments.len())));

    for row in &ct.rows {
        out.push_str(&format!("{:>6} |", format_rating(row.rating)));
        for &count in &row.counts {
            let cell = format!("{}{:>3}", shade(count, max).to_string().repeat(3), count);
            out.push_str(&format!(" {:^10}", cell));
        }
        out.push('\n');
    }
    out
}

pub fn summary(report: &Report) -> String {
    let mut out = String::from("Summary Statistics:\n");
    match report.mean_polarity {
        Some(p) => out.push_str(&format!("Average polarity score: {:.3}\n", p)),
        None => out.push_str("Average polarity score: n/a\n"),
    }
    match report.mean_rating {
        Some(r) => out.push_str(&format!("Average rating: {:.2}\n", r)),
        None => out.push_str("Average rating: n/a\n"),
    }
    out.push_str("\nSentiment distribution:\n");
    if report.sentiment_counts.is_empty() {
        out.push_str("  (none)\n");
    }
    for c in &report.sentiment_counts {
        out.push_str(&format!("  {:<9} {:>5.1}%\n", c.sentiment, c.share));
    }
    out
}

fn scaled(count: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        (count * BAR_WIDTH).div_ceil(max)
    }
}

fn shade(count: usize, max: usize) -> char {
    if count == 0 || max == 0 {
        return SHADES[0];
    }
    let idx = (count * (SHADES.len() - 1)).div_ceil(max);
    SHADES[idx.min(SHADES.len() - 1)]
}

fn format_rating(rating: f64) -> String {
    format!("{}", rating)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

// ── Tests ──
