//! Output formatting and persistence for analysis reports.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::analyzer::AnalysisReport;
use crate::analyzers::types::AggregatedRow;
use csv::Writer;
use std::fs::File;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &AnalysisReport) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &AnalysisReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes the selected rows of `report` to a new CSV file at `path`.
///
/// Columns are `category`, `count`, `composite_score`, then one rank column
/// per score label.
pub fn write_report_csv(path: &str, report: &AnalysisReport) -> Result<()> {
    debug!(path, rows = report.rows.len(), "Writing CSV report");

    let mut writer = Writer::from_path(path)?;

    let mut header = vec!["category", "count", "composite_score"];
    header.extend(report.score_columns.iter().map(String::as_str));
    writer.write_record(&header)?;

    for row in &report.rows {
        let mut record = vec![
            row.category().to_string(),
            row.row.count.to_string(),
            row.composite_score.to_string(),
        ];
        record.extend(
            report
                .score_columns
                .iter()
                .map(|label| row.rank_for(label).map(|r| r.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes `report` as pretty JSON to `path`.
pub fn write_report_json(path: &str, report: &AnalysisReport) -> Result<()> {
    debug!(path, "Writing JSON report");
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

/// Writes aggregated rows to CSV: `category`, `count`, then `<field>_total`
/// and `<field>_mean` for each field.
pub fn write_aggregates_csv(path: &str, rows: &[AggregatedRow], fields: &[&str]) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing aggregate CSV");

    let mut writer = Writer::from_path(path)?;

    let mut header = vec!["category".to_string(), "count".to_string()];
    for field in fields {
        header.push(format!("{field}_total"));
        header.push(format!("{field}_mean"));
    }
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.category.clone(), row.count.to_string()];
        for field in fields {
            let summary = row.metrics.get(*field).copied().unwrap_or_default();
            record.push(summary.total.to_string());
            record.push(summary.mean.to_string());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
