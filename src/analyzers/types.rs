//! Data types used by the scoring pipeline.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Sum and mean of one tracked field within a category.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSummary {
    pub total: f64,
    pub mean: f64,
}

/// One row per distinct category after grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub category: String,
    pub count: usize,
    pub metrics: BTreeMap<String, MetricSummary>,
}

impl AggregatedRow {
    /// Value of `column` for this row. Fields that were never aggregated read as 0.
    pub fn value(&self, column: &MetricColumn) -> f64 {
        self.metrics
            .get(&column.field)
            .map(|m| match column.statistic {
                Statistic::Total => m.total,
                Statistic::Mean => m.mean,
            })
            .unwrap_or(0.0)
    }
}

/// Which summary of a field a column ranks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    Total,
    Mean,
}

impl Statistic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::Total => "total",
            Statistic::Mean => "mean",
        }
    }
}

/// Sort direction for ranking. `Descending` means a higher value is worse
/// and receives rank 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Descending,
    Ascending,
}

impl Direction {
    /// Orders two values so that the one ranked first compares `Less`.
    /// NaN always sorts last and NaNs compare equal to each other.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
                match self {
                    Direction::Descending => ord.reverse(),
                    Direction::Ascending => ord,
                }
            }
        }
    }
}

/// A ranked column: a field, the statistic taken of it, and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricColumn {
    pub field: String,
    pub statistic: Statistic,
    #[serde(default)]
    pub direction: Direction,
    /// Name of the score column in reports.
    #[serde(default)]
    pub label: Option<String>,
}

impl MetricColumn {
    pub fn descending(field: &str, statistic: Statistic) -> Self {
        Self {
            field: field.to_string(),
            statistic,
            direction: Direction::Descending,
            label: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("{}_{}_score", self.field, self.statistic.as_str()),
        }
    }
}

/// Rank of one row within one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricScore {
    pub label: String,
    pub rank: usize,
}

/// An aggregated row with its per-column ranks and their sum.
/// A lower `composite_score` is a worse outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    #[serde(flatten)]
    pub row: AggregatedRow,
    pub scores: Vec<MetricScore>,
    pub composite_score: usize,
}

impl RankedRow {
    pub fn category(&self) -> &str {
        &self.row.category
    }

    pub fn rank_for(&self, label: &str) -> Option<usize> {
        self.scores.iter().find(|s| s.label == label).map(|s| s.rank)
    }
}
