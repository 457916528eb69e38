use crate::analyzers::aggregate::aggregate;
use crate::analyzers::filter::filter_min_count;
use crate::analyzers::rank::score;
use crate::analyzers::report::top_worst;
use crate::analyzers::types::RankedRow;
use crate::config::AnalysisConfig;
use crate::records::RawRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Result of one ranking run, ready for reporting.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub schema_version: u8,
    pub analysis: String,
    pub generated_at: DateTime<Utc>,
    pub min_count: usize,
    pub top_n: usize,
    pub categories_total: usize,
    pub categories_ranked: usize,
    pub score_columns: Vec<String>,
    pub rows: Vec<RankedRow>,
}

/// Runs aggregate, threshold, score and select over `records`.
#[tracing::instrument(skip(records, config), fields(analysis = %config.name, records = records.len()))]
pub fn analyze(records: &[RawRecord], config: &AnalysisConfig) -> AnalysisReport {
    let rows = aggregate(records, &config.fields());
    let categories_total = rows.len();

    let rows = filter_min_count(rows, config.min_count);
    let categories_ranked = rows.len();

    let ranked = score(rows, &config.columns);
    let rows = top_worst(ranked, config.top_n, config.tie_break);

    info!(
        categories_total,
        categories_ranked,
        selected = rows.len(),
        "Analysis complete"
    );

    AnalysisReport {
        schema_version: 1,
        analysis: config.name.clone(),
        generated_at: Utc::now(),
        min_count: config.min_count,
        top_n: config.top_n,
        categories_total,
        categories_ranked,
        score_columns: config.columns.iter().map(|c| c.label()).collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{FATALITIES, INJURIES};

    fn repeat(category: &str, n: usize, fatalities: f64, injuries: f64) -> Vec<RawRecord> {
        (0..n)
            .map(|_| {
                RawRecord::new(category)
                    .with_value(FATALITIES, fatalities)
                    .with_value(INJURIES, injuries)
            })
            .collect()
    }

    #[test]
    fn test_health_pipeline() {
        let mut records = Vec::new();
        records.extend(repeat("HEAT", 12, 3.0, 10.0));
        records.extend(repeat("TORNADO", 20, 1.0, 20.0));
        records.extend(repeat("HAIL", 30, 0.0, 0.5));
        // would rank first on both columns but is too rare
        records.extend(repeat("TSUNAMI", 9, 50.0, 100.0));

        let report = analyze(&records, &AnalysisConfig::health());

        assert_eq!(report.categories_total, 4);
        assert_eq!(report.categories_ranked, 3);
        assert_eq!(report.score_columns, vec!["fatalities_score", "injuries_score"]);

        let names: Vec<_> = report.rows.iter().map(|r| r.category()).collect();
        // HEAT 1+2=3, TORNADO 2+1=3, HAIL 3+3=6; ties keep aggregation order
        assert_eq!(names, vec!["HEAT", "TORNADO", "HAIL"]);
        assert!(report.rows.iter().all(|r| r.category() != "TSUNAMI"));
    }

    #[test]
    fn test_truncates_to_top_n() {
        let mut records = Vec::new();
        for (i, name) in ["A", "B", "C", "D"].iter().enumerate() {
            records.extend(repeat(name, 10, i as f64, i as f64));
        }
        let config = AnalysisConfig::health().with_top_n(Some(2));
        let report = analyze(&records, &config);

        let names: Vec<_> = report.rows.iter().map(|r| r.category()).collect();
        assert_eq!(names, vec!["D", "C"]);
        assert_eq!(report.rows[0].composite_score, 2);
    }

    #[test]
    fn test_empty_input_is_valid() {
        let report = analyze(&[], &AnalysisConfig::economic());
        assert_eq!(report.categories_total, 0);
        assert!(report.rows.is_empty());
    }
}
