use crate::analyzers::types::RankedRow;
use serde::{Deserialize, Serialize};

/// How rows with equal composite scores are ordered by [`top_worst`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the relative order the rows arrived in.
    #[default]
    InputOrder,
    /// Ascending category name.
    Category,
}

/// Orders rows by ascending composite score (worst first) and keeps the first `n`.
pub fn top_worst(mut rows: Vec<RankedRow>, n: usize, tie_break: TieBreak) -> Vec<RankedRow> {
    match tie_break {
        TieBreak::InputOrder => rows.sort_by_key(|r| r.composite_score),
        TieBreak::Category => rows.sort_by(|a, b| {
            a.composite_score
                .cmp(&b.composite_score)
                .then_with(|| a.row.category.cmp(&b.row.category))
        }),
    }
    rows.truncate(n);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::AggregatedRow;
    use std::collections::BTreeMap;

    fn ranked(category: &str, composite_score: usize) -> RankedRow {
        RankedRow {
            row: AggregatedRow {
                category: category.to_string(),
                count: 10,
                metrics: BTreeMap::new(),
            },
            scores: vec![],
            composite_score,
        }
    }

    fn names(rows: &[RankedRow]) -> Vec<&str> {
        rows.iter().map(|r| r.category()).collect()
    }

    #[test]
    fn test_lowest_composite_first() {
        let rows = vec![ranked("a", 7), ranked("b", 2), ranked("c", 4)];
        let top = top_worst(rows, 2, TieBreak::InputOrder);
        assert_eq!(names(&top), vec!["b", "c"]);
    }

    #[test]
    fn test_n_larger_than_rows() {
        let rows = vec![ranked("a", 3), ranked("b", 1)];
        assert_eq!(top_worst(rows, 10, TieBreak::InputOrder).len(), 2);
        assert!(top_worst(vec![], 5, TieBreak::InputOrder).is_empty());
    }

    #[test]
    fn test_input_order_tie_break_is_stable() {
        let rows = vec![ranked("zeta", 4), ranked("alpha", 4), ranked("mid", 1)];
        let top = top_worst(rows, 3, TieBreak::InputOrder);
        assert_eq!(names(&top), vec!["mid", "zeta", "alpha"]);
    }

    #[test]
    fn test_category_tie_break() {
        let rows = vec![ranked("zeta", 4), ranked("alpha", 4), ranked("mid", 1)];
        let top = top_worst(rows, 3, TieBreak::Category);
        assert_eq!(names(&top), vec!["mid", "alpha", "zeta"]);
    }

    #[test]
    fn test_zero_n() {
        assert!(top_worst(vec![ranked("a", 1)], 0, TieBreak::Category).is_empty());
    }
}
