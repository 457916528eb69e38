//! CLI entry point for the storm impact rater.
//!
//! Loads the storm events dataset from a file or URL, ranks event types by
//! population-health and economic impact, and writes the worst offenders as
//! CSV or JSON reports.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use storm_impact_rater::analyzers::aggregate::aggregate;
use storm_impact_rater::analyzers::analyzer::analyze;
use storm_impact_rater::{
    config::AnalysisConfig,
    fetch::{BasicClient, load_source},
    output::{print_json, print_pretty, write_aggregates_csv, write_report_csv, write_report_json},
    parser::parse_events,
    records::RawRecord,
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "storm_impact_rater")]
#[command(about = "Rank storm event types by health and economic impact", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Analysis {
    Health,
    Economic,
    All,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank event types and report the worst ones
    Rank {
        /// Path to storm data CSV (optionally gzipped) or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Which preset analysis to run
        #[arg(short, long, value_enum, default_value_t = Analysis::All)]
        analysis: Analysis,

        /// JSON analysis config; replaces the presets
        #[arg(short, long)]
        config: Option<String>,

        /// Minimum events per type to be ranked (overrides the preset)
        #[arg(short, long)]
        min_count: Option<usize>,

        /// Number of worst event types to report (overrides the preset)
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Directory to write <analysis>.csv reports into
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Also write <analysis>.json reports and log them as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write per-event-type counts, totals and means as CSV
    Aggregate {
        /// Path to storm data CSV (optionally gzipped) or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Which preset's fields to aggregate
        #[arg(short, long, value_enum, default_value_t = Analysis::All)]
        analysis: Analysis,

        /// CSV file to write
        #[arg(short, long, default_value = "aggregates.csv")]
        output: String,
    },
}

impl Analysis {
    fn configs(self) -> Vec<AnalysisConfig> {
        match self {
            Analysis::Health => vec![AnalysisConfig::health()],
            Analysis::Economic => vec![AnalysisConfig::economic()],
            Analysis::All => vec![AnalysisConfig::health(), AnalysisConfig::economic()],
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/storm_impact_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("storm_impact_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            source,
            analysis,
            config,
            min_count,
            top,
            output_dir,
            json,
        } => {
            let configs = match config {
                Some(path) => vec![AnalysisConfig::load(&path)?],
                None => analysis.configs(),
            };
            let records = load_records(&source).await?;

            if let Some(dir) = &output_dir {
                std::fs::create_dir_all(dir)?;
            }

            for config in configs {
                let config = config.with_min_count(min_count).with_top_n(top);
                let report = analyze(&records, &config);

                for row in &report.rows {
                    info!(
                        analysis = %report.analysis,
                        category = row.category(),
                        count = row.row.count,
                        composite_score = row.composite_score,
                        "Ranked"
                    );
                }
                print_pretty(&report);

                if json {
                    print_json(&report)?;
                }

                if let Some(dir) = &output_dir {
                    let csv_path = format!("{}/{}.csv", dir, report.analysis);
                    write_report_csv(&csv_path, &report)?;
                    info!(path = %csv_path, "Report written");

                    if json {
                        let json_path = format!("{}/{}.json", dir, report.analysis);
                        write_report_json(&json_path, &report)?;
                        info!(path = %json_path, "Report written");
                    }
                }
            }
        }
        Commands::Aggregate {
            source,
            analysis,
            output,
        } => {
            let records = load_records(&source).await?;
            let configs = analysis.configs();
            let fields: Vec<&str> = configs.iter().flat_map(|c| c.fields()).collect();

            let rows = aggregate(&records, &fields);
            write_aggregates_csv(&output, &rows, &fields)?;
            info!(path = %output, categories = rows.len(), "Aggregates written");
        }
    }

    Ok(())
}

/// Loads and parses the dataset, converting each event to a normalized record.
#[tracing::instrument]
async fn load_records(source: &str) -> Result<Vec<RawRecord>> {
    let client = BasicClient::new()?;
    let bytes = load_source(&client, source).await?;
    let events = parse_events(&bytes)?;
    info!(events = events.len(), "Dataset loaded");

    Ok(events.iter().map(|e| e.to_record()).collect())
}
