use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::analyzers::filter::DEFAULT_MIN_COUNT;
use crate::analyzers::report::TieBreak;
use crate::analyzers::types::{MetricColumn, Statistic};
use crate::records::{CROP_DAMAGE, FATALITIES, INJURIES, PROPERTY_DAMAGE};

/// Parameters for one ranking run.
///
/// Stored as JSON on disk:
/// ```json
/// {
///   "name": "health",
///   "columns": [
///     { "field": "fatalities", "statistic": "mean" },
///     { "field": "injuries", "statistic": "mean" }
///   ],
///   "min_count": 10,
///   "top_n": 5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub name: String,
    pub columns: Vec<MetricColumn>,
    #[serde(default = "default_min_count")]
    pub min_count: usize,
    pub top_n: usize,
    #[serde(default)]
    pub tie_break: TieBreak,
}

fn default_min_count() -> usize {
    DEFAULT_MIN_COUNT
}

impl AnalysisConfig {
    /// Mean fatalities and mean injuries per event type, top 5.
    pub fn health() -> Self {
        Self {
            name: "health".to_string(),
            columns: vec![
                MetricColumn::descending(FATALITIES, Statistic::Mean)
                    .with_label("fatalities_score"),
                MetricColumn::descending(INJURIES, Statistic::Mean).with_label("injuries_score"),
            ],
            min_count: DEFAULT_MIN_COUNT,
            top_n: 5,
            tie_break: TieBreak::InputOrder,
        }
    }

    /// Mean property damage and mean crop damage per event type, top 6.
    pub fn economic() -> Self {
        Self {
            name: "economic".to_string(),
            columns: vec![
                MetricColumn::descending(PROPERTY_DAMAGE, Statistic::Mean)
                    .with_label("property_damage_score"),
                MetricColumn::descending(CROP_DAMAGE, Statistic::Mean)
                    .with_label("crop_damage_score"),
            ],
            min_count: DEFAULT_MIN_COUNT,
            top_n: 6,
            tie_break: TieBreak::InputOrder,
        }
    }

    /// Loads a config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configs whose reports would have two score columns with the same name.
    pub fn validate(&self) -> Result<()> {
        let mut labels: Vec<String> = self.columns.iter().map(MetricColumn::label).collect();
        labels.sort();
        if let Some(pair) = labels.windows(2).find(|w| w[0] == w[1]) {
            bail!("analysis '{}' has duplicate score column '{}'", self.name, pair[0]);
        }
        Ok(())
    }

    /// Distinct fields referenced by the columns, in column order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for column in &self.columns {
            if !fields.contains(&column.field.as_str()) {
                fields.push(&column.field);
            }
        }
        fields
    }

    pub fn with_min_count(mut self, min_count: Option<usize>) -> Self {
        if let Some(min_count) = min_count {
            self.min_count = min_count;
        }
        self
    }

    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        if let Some(top_n) = top_n {
            self.top_n = top_n;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_presets() {
        let health = AnalysisConfig::health();
        assert_eq!(health.fields(), vec![FATALITIES, INJURIES]);
        assert_eq!(health.min_count, 10);
        assert_eq!(health.top_n, 5);

        let economic = AnalysisConfig::economic();
        assert_eq!(economic.fields(), vec![PROPERTY_DAMAGE, CROP_DAMAGE]);
        assert_eq!(economic.top_n, 6);
    }

    #[test]
    fn test_overrides() {
        let config = AnalysisConfig::health()
            .with_min_count(Some(3))
            .with_top_n(None);
        assert_eq!(config.min_count, 3);
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn test_fields_are_deduplicated() {
        let config = AnalysisConfig {
            name: "x".into(),
            columns: vec![
                MetricColumn::descending("a", Statistic::Total),
                MetricColumn::descending("a", Statistic::Mean),
                MetricColumn::descending("b", Statistic::Mean),
            ],
            min_count: 1,
            top_n: 1,
            tie_break: TieBreak::Category,
        };
        assert_eq!(config.fields(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let mut config = AnalysisConfig::health();
        config.columns.push(config.columns[0].clone());
        assert!(config.validate().is_err());
        assert!(AnalysisConfig::health().validate().is_ok());
    }

    #[test]
    fn test_load_with_defaults() {
        let path = temp_path("storm_impact_rater_test_config.json");
        fs::write(
            &path,
            r#"{"name":"custom","columns":[{"field":"injuries","statistic":"total"}],"top_n":3}"#,
        )
        .unwrap();

        let config = AnalysisConfig::load(&path).unwrap();
        assert_eq!(config.name, "custom");
        assert_eq!(config.min_count, DEFAULT_MIN_COUNT);
        assert_eq!(config.tie_break, TieBreak::InputOrder);
        assert_eq!(config.columns[0].label(), "injuries_total_score");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        assert!(AnalysisConfig::load("/nonexistent/storm_config.json").is_err());
    }
}
