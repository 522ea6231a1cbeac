use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use review_pulse::chart::svg::SvgChartRenderer;
use review_pulse::config::Config;
use review_pulse::error::AnalysisError;
use review_pulse::keywords::yake::YakeExtractor;
use review_pulse::output::terminal;
use review_pulse::period::DateRange;
use review_pulse::pipeline::compare::{
    compare_two_periods, Collaborators, OutputMode, PipelineOptions,
};
use review_pulse::sentiment::download;
use review_pulse::sentiment::onnx::OnnxSentimentClassifier;
use review_pulse::sentiment::tally::Aggregation;
use review_pulse::table::{self, TableSchema};
use review_pulse::topics::tfidf::TfIdfTopicModeler;

/// Review Pulse: compare the comments of two date ranges.
///
/// Reports how sentiment, keyword frequency and (optionally) topics changed
/// between two periods of a dated comment table.
#[derive(Parser)]
#[command(name = "review-pulse", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two periods of a comment table
    Compare {
        /// Path to the CSV comment table
        #[arg(long)]
        file: PathBuf,

        /// First range, "start,end" (e.g. 20250101,20250131)
        #[arg(long)]
        period1: String,

        /// Second range, "start,end"
        #[arg(long)]
        period2: String,

        /// Also model topics per period
        #[arg(long)]
        topics: bool,

        /// Report sentiment as counts or percentages
        #[arg(long, value_enum, default_value_t = Aggregation::Counts)]
        aggregation: Aggregation,

        /// Print JSON with an embedded chart, or a terminal summary
        #[arg(long, value_enum, default_value_t = OutputMode::Encoded)]
        output: OutputMode,

        /// Where to write the chart in displayed mode
        #[arg(long)]
        chart_out: Option<PathBuf>,

        /// Keyword candidates per comment (overrides REVIEW_PULSE_KEYWORDS_PER_TEXT)
        #[arg(long, value_parser = parse_positive)]
        keywords_per_text: Option<usize>,

        /// Keyword deltas to keep (overrides REVIEW_PULSE_TOP_DELTAS)
        #[arg(long, value_parser = parse_positive)]
        top_deltas: Option<usize>,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Convert a UTF-16LE tab-separated export into a quoted UTF-8 CSV
    Standardize {
        /// The raw export
        input: PathBuf,
        /// Destination CSV
        output: PathBuf,
    },

    /// Show date coverage and missing fields of a comment table
    Inspect {
        /// Path to the CSV comment table
        #[arg(long)]
        file: PathBuf,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Download the ONNX sentiment model
    DownloadModel,
}

#[derive(Args)]
struct ColumnArgs {
    /// Header of the date column
    #[arg(long, default_value = "Date")]
    date_column: String,

    /// Header of the title column
    #[arg(long, default_value = "Title")]
    title_column: String,

    /// Header of the content column
    #[arg(long, default_value = "Content")]
    content_column: String,
}

impl ColumnArgs {
    fn schema(&self) -> TableSchema {
        TableSchema {
            date_column: self.date_column.clone(),
            title_column: self.title_column.clone(),
            content_column: self.content_column.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("review_pulse=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<AnalysisError>() {
            // Bad input rather than a failure: report it plainly
            Some(client) if client.is_client_error() => {
                eprintln!("{} {client}", "error:".red().bold());
                std::process::exit(2);
            }
            _ => Err(e),
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compare {
            file,
            period1,
            period2,
            topics,
            aggregation,
            output,
            chart_out,
            keywords_per_text,
            top_deltas,
            columns,
        } => {
            // Bad range input is reported before any model is loaded
            DateRange::parse(&period1)?;
            DateRange::parse(&period2)?;

            let config = Config::load()?;
            let records = table::load_csv(&file, &columns.schema())?;
            info!(records = records.len(), file = %file.display(), "Loaded comment table");

            config.require_model()?;
            let classifier = OnnxSentimentClassifier::load(&config.model_dir, config.max_tokens)?;
            let extractor = YakeExtractor::english();
            let modeler = TfIdfTopicModeler::default();
            let renderer = SvgChartRenderer::default();

            let collaborators = Collaborators {
                classifier: &classifier,
                extractor: &extractor,
                topics: &modeler,
                renderer: &renderer,
            };
            let options = PipelineOptions {
                include_topics: topics,
                aggregation,
                output_mode: output,
                keywords_per_text: keywords_per_text.unwrap_or(config.keywords_per_text),
                top_deltas: top_deltas.unwrap_or(config.top_deltas),
            };

            let report =
                compare_two_periods(&collaborators, &options, &records, &period1, &period2)
                    .await?;

            match options.output_mode {
                OutputMode::Encoded => {
                    let json = report.to_encoded_json()?;
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
                OutputMode::Displayed => {
                    terminal::display_report(&report);
                    let path = chart_out.unwrap_or_else(|| {
                        PathBuf::from("output")
                            .join(format!("comparison.{}", report.chart.extension()))
                    });
                    write_chart(&path, &report.chart.bytes)?;
                    println!("Chart written to {}", path.display().to_string().bold());
                }
            }
        }

        Commands::Standardize { input, output } => {
            let rows = table::standardize::standardize_file(&input, &output)?;
            println!(
                "Wrote {} rows to {}",
                rows,
                output.display().to_string().bold()
            );
        }

        Commands::Inspect { file, columns } => {
            let records = table::load_csv(&file, &columns.schema())?;
            match table::summarize(&records) {
                Some(summary) => terminal::display_table_summary(&summary),
                None => println!("No dated records in {}", file.display()),
            }
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            let model_dir = &config.model_dir;

            println!("Downloading sentiment model...");
            println!("  Source:      {}", config.model_url);
            println!("  Destination: {}", model_dir.display());

            download::download_model(&config.model_url, model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `review-pulse compare`.");
        }
    }

    Ok(())
}

/// Clap value parser for counts that must be at least 1.
fn parse_positive(raw: &str) -> std::result::Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("must be greater than zero".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn write_chart(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
