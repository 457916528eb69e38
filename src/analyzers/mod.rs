//! Storm impact scoring.
//!
//! Raw event records are grouped by category, categories with too few
//! observations are dropped, each remaining category is ranked per metric
//! column, and the ranks are summed into a composite score used to pick the
//! worst categories.

pub mod aggregate;
pub mod analyzer;
pub mod filter;
pub mod magnitude;
pub mod rank;
pub mod report;
pub mod types;
pub mod utility;
