mod config;
mod error;
mod fetch;
mod filter;
mod notebook;
mod parser;
mod pipeline;
mod render;
mod report;
mod review;
mod sentiment;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use config::Settings;
use pipeline::{PipelineRun, Source};
use report::Report;
use review::normalize_all;
use sentiment::{classify_all, LexiconScorer};

#[derive(Parser)]
#[command(name = "anime_reviews", about = "Anime review scraper with lexicon sentiment analysis")]
struct Cli {
    /// Review listing page to fetch (default from config)
    #[arg(long, global = true)]
    url: Option<String>,
    /// Parse a saved HTML page instead of fetching
    #[arg(long, global = true)]
    input: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the page and show the extracted ratings and texts
    Scrape {
        /// Rows to show
        #[arg(short = 'n', long)]
        head: Option<usize>,
    },
    /// Scrape + sentiment analysis
    Analyze {
        /// Rows to show
        #[arg(short = 'n', long)]
        head: Option<usize>,
    },
    /// Reviews rated at or above a minimum
    Filter {
        /// Minimum rating, inclusive (default from config)
        #[arg(long)]
        min: Option<f64>,
        /// Rows to show (default: all)
        #[arg(short = 'n', long)]
        head: Option<usize>,
    },
    /// Rating/sentiment charts and summary statistics
    Report {
        /// Print the aggregated report as JSON
        #[arg(long)]
        json: bool,
        #[arg(long, value_enum, default_value_t = ReportView::All)]
        view: ReportView,
    },
    /// Whole pipeline: scrape, analyze, filter, charts, correlation
    Run {
        #[arg(long)]
        min: Option<f64>,
        #[arg(short = 'n', long)]
        head: Option<usize>,
    },
    /// Run the pipeline and write it out as a Jupyter notebook
    Notebook {
        /// Output path
        #[arg(short, long, default_value = notebook::DEFAULT_NOTEBOOK)]
        output: PathBuf,
        #[arg(long)]
        min: Option<f64>,
        #[arg(short = 'n', long)]
        head: Option<usize>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportView {
    All,
    Charts,
    Correlation,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    let source = Source::resolve(cli.url, cli.input, &settings);
    let scorer = LexiconScorer::new();

    let result = match cli.command {
        Commands::Scrape { head } => {
            let reviews = source.load(&settings).await?;
            print!("{}", render::review_table(&reviews, head.unwrap_or(settings.head)));
            Ok(())
        }
        Commands::Analyze { head } => {
            let mut reviews = source.load(&settings).await?;
            normalize_all(&mut reviews);
            classify_all(&scorer, &mut reviews);
            print!("{}", render::review_table(&reviews, head.unwrap_or(settings.head)));
            Ok(())
        }
        Commands::Filter { min, head } => {
            let min = min.unwrap_or(settings.min_rating);
            let mut reviews = source.load(&settings).await?;
            normalize_all(&mut reviews);
            classify_all(&scorer, &mut reviews);
            let kept = filter::filter_by_min_rating(&reviews, min);
            if kept.is_empty() {
                println!("No reviews rated >= {}.", min);
                return Ok(());
            }
            println!("High-rated reviews (rating >= {}):", min);
            print!("{}", render::review_table(&kept, head.unwrap_or(kept.len())));
            Ok(())
        }
        Commands::Report { json, view } => {
            let mut reviews = source.load(&settings).await?;
            normalize_all(&mut reviews);
            classify_all(&scorer, &mut reviews);
            let report = Report::build(&reviews);
            if json {
                let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
                println!("{}", out);
            } else {
                print_report(&report, view);
            }
            Ok(())
        }
        Commands::Run { min, head } => {
            let reviews = source.load(&settings).await?;
            let run = PipelineRun::execute(reviews, &scorer, min.unwrap_or(settings.min_rating));
            for step in run.steps(head.unwrap_or(settings.head)) {
                println!("== {} ==\n", step.title);
                println!("{}", step.output);
            }
            Ok(())
        }
        Commands::Notebook { output, min, head } => {
            let reviews = source.load(&settings).await?;
            let run = PipelineRun::execute(reviews, &scorer, min.unwrap_or(settings.min_rating));
            let steps = run.steps(head.unwrap_or(settings.head));
            let nb = notebook::Notebook::build(&source, &steps, chrono::Utc::now());
            nb.write(&output)?;
            info!("Notebook written: {}", output.display());
            println!(
                "Wrote {} ({} reviews, {} cells)",
                output.display(),
                run.report.total,
                nb.cells.len()
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {}", format_duration(elapsed));
    }

    result
}

fn print_report(report: &Report, view: ReportView) {
    if matches!(view, ReportView::All | ReportView::Charts) {
        println!("{}", render::rating_chart(report));
        println!("{}", render::sentiment_chart(report));
    }
    if matches!(view, ReportView::All | ReportView::Correlation) {
        println!("{}", render::heatmap(report));
        print!("{}", render::summary(report));
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
