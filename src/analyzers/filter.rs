use crate::analyzers::types::AggregatedRow;
use tracing::debug;

/// Default minimum number of observations a category needs to be ranked.
pub const DEFAULT_MIN_COUNT: usize = 10;

/// Keeps rows observed at least `min_count` times. An empty result is valid.
pub fn filter_min_count(rows: Vec<AggregatedRow>, min_count: usize) -> Vec<AggregatedRow> {
    let before = rows.len();
    let kept: Vec<AggregatedRow> = rows.into_iter().filter(|r| r.count >= min_count).collect();

    debug!(
        min_count,
        kept = kept.len(),
        dropped = before - kept.len(),
        "Applied observation threshold"
    );

    kept
}
