use crate::analyzers::types::{AggregatedRow, MetricSummary};
use crate::analyzers::utility::mean;
use crate::records::RawRecord;
use std::collections::BTreeMap;
use tracing::debug;

/// Groups `records` by category and sums each of `fields` per group.
///
/// Categories are matched by exact, case-sensitive string equality. Rows come
/// back in ascending category order so identical input always yields
/// identical output. A record without one of the fields contributes 0 to it.
pub fn aggregate(records: &[RawRecord], fields: &[&str]) -> Vec<AggregatedRow> {
    let mut fields: Vec<&str> = fields.to_vec();
    fields.sort_unstable();
    fields.dedup();

    let mut groups: BTreeMap<&str, (usize, Vec<f64>)> = BTreeMap::new();

    for record in records {
        let (count, totals) = groups
            .entry(record.category.as_str())
            .or_insert_with(|| (0, vec![0.0; fields.len()]));

        *count += 1;
        for (total, field) in totals.iter_mut().zip(&fields) {
            *total += record.value(field).unwrap_or(0.0);
        }
    }

    debug!(
        records = records.len(),
        categories = groups.len(),
        fields = fields.len(),
        "Aggregated records by category"
    );

    groups
        .into_iter()
        .map(|(category, (count, totals))| AggregatedRow {
            category: category.to_string(),
            count,
            metrics: fields
                .iter()
                .zip(totals)
                .map(|(field, total)| {
                    (
                        field.to_string(),
                        MetricSummary {
                            total,
                            mean: mean(total, count),
                        },
                    )
                })
                .collect(),
        })
        .collect()
}
