//! Per-column descending ranks and their composite sum.
//!
//! Ties take the 1-based position where their value first appears in the
//! sorted column, so values at sorted positions 3 and 4 that are equal both
//! rank 3 and the next distinct value ranks 5. Each column is sorted once and
//! ranks are assigned in a single pass over the sorted order.

use crate::analyzers::types::{AggregatedRow, Direction, MetricColumn, MetricScore, RankedRow};
use tracing::debug;

fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Returns the rank of each value in `values`, in input order.
pub fn rank_values(values: &[f64], direction: Direction) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| direction.compare(values[a], values[b]));

    let mut ranks = vec![0; values.len()];
    let mut first_position = 0;

    for (position, &idx) in order.iter().enumerate() {
        if position > 0 && !same_value(values[order[position - 1]], values[idx]) {
            first_position = position;
        }
        ranks[idx] = first_position + 1;
    }

    ranks
}

/// Ranks every row within each column and sums the ranks into a composite
/// score. Output keeps the input row order.
pub fn score(rows: Vec<AggregatedRow>, columns: &[MetricColumn]) -> Vec<RankedRow> {
    let column_ranks: Vec<(String, Vec<usize>)> = columns
        .iter()
        .map(|column| {
            let values: Vec<f64> = rows.iter().map(|r| r.value(column)).collect();
            (column.label(), rank_values(&values, column.direction))
        })
        .collect();

    debug!(
        rows = rows.len(),
        columns = columns.len(),
        "Scored rows"
    );

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let scores: Vec<MetricScore> = column_ranks
                .iter()
                .map(|(label, ranks)| MetricScore {
                    label: label.clone(),
                    rank: ranks[i],
                })
                .collect();
            let composite_score = scores.iter().map(|s| s.rank).sum();

            RankedRow {
                row,
                scores,
                composite_score,
            }
        })
        .collect()
}
