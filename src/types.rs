//! Core types for the decision board
//!
//! Records are read-only fixture data. Every grouping pass builds fresh
//! view copies (with a `unique_id` assigned) and never touches the store.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle stage of a decision
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Start state, never assigned explicitly in the sample data
    #[default]
    Discussion,
    Effect,
    Approvals,
    Rollout,
}

/// Direction a KPI moved in
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Flat,
}

/// One point of a KPI time series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A metric attached to a decision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Kpi {
    pub value: f64,
    pub label: String,
    /// Percent change against the previous period
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<KpiPoint>,
}

/// A marketing/business decision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    /// Stable business identity; not unique across grouping contexts
    pub id: u32,
    /// `<context>-<id>`, assigned when the record is placed into a group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub stage: Stage,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
}

/// A quarter (or, in older data, a month) inside a year bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuarterGroup {
    /// Quarter label, e.g. "Q4" or "Q3 2023"
    pub month: String,
    pub decisions: Vec<DecisionRecord>,
}

/// Content of a year bucket: either flat or nested under quarters
///
/// Serialized as a bare array. When reading, a first element with a
/// `month` key makes it `Quarters`; anything else (including `[]`) is `Flat`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum YearContent {
    Flat(Vec<DecisionRecord>),
    Quarters(Vec<QuarterGroup>),
}

/// One year of decisions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearBucket {
    pub year: String,
    pub content: YearContent,
}

/// The in-memory decision store
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DecisionStore {
    /// Decisions not filed under any year
    #[serde(default)]
    pub decisions: Vec<DecisionRecord>,
    #[serde(default)]
    pub years: Vec<YearBucket>,
}

/// A named insight that claims a set of decision ids
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightCategory {
    pub id: String,
    pub name: String,
    pub decisions: Vec<u32>,
}

/// Output of the insight grouping pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightGroup {
    pub id: String,
    pub name: String,
    pub decisions: Vec<DecisionRecord>,
}

/// Insight view: non-empty groups in priority order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InsightView {
    pub groups: Vec<InsightGroup>,
}

/// A quarter after filtering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuarterBucket {
    pub label: String,
    pub decisions: Vec<DecisionRecord>,
}

/// Filtered content of a year in the timeline view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase", tag = "kind", content = "items")]
pub enum YearViewContent {
    Flat(Vec<DecisionRecord>),
    Quarters(Vec<QuarterBucket>),
}

/// A year after filtering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearView {
    pub year: String,
    pub content: YearViewContent,
}

/// Timeline view: years (most recent first) with matching decisions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimelineView {
    pub years: Vec<YearView>,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Discussion => "Discussion",
            Stage::Effect => "Effect",
            Stage::Approvals => "Approvals",
            Stage::Rollout => "Rollout",
        }
    }

    pub fn all() -> [Stage; 4] {
        [Stage::Discussion, Stage::Effect, Stage::Approvals, Stage::Rollout]
    }
}

impl std::str::FromStr for Stage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Stage::all()
            .into_iter()
            .find(|stage| stage.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown stage '{}'", s))
    }
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Flat => "■",
        }
    }
}

impl Kpi {
    /// Display form of `value` used for search: `420.0` prints as "420"
    pub fn value_text(&self) -> String {
        self.value.to_string()
    }
}

impl<'de> Deserialize<'de> for YearContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<serde_json::Value>::deserialize(deserializer)?;
        let nested = items
            .first()
            .is_some_and(|first| first.get("month").is_some());
        let items = serde_json::Value::Array(items);

        // Decode the chosen variant directly so field-level errors survive
        if nested {
            serde_json::from_value(items)
                .map(YearContent::Quarters)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(items)
                .map(YearContent::Flat)
                .map_err(D::Error::custom)
        }
    }
}

impl DecisionRecord {
    /// Copy of this record placed under `context`
    pub fn placed(&self, context: &str) -> DecisionRecord {
        DecisionRecord {
            unique_id: Some(format!("{}-{}", context, self.id)),
            ..self.clone()
        }
    }
}

impl YearContent {
    /// Decisions in encounter order, quarters flattened
    pub fn decisions(&self) -> Box<dyn Iterator<Item = &DecisionRecord> + '_> {
        match self {
            YearContent::Flat(decisions) => Box::new(decisions.iter()),
            YearContent::Quarters(quarters) => {
                Box::new(quarters.iter().flat_map(|q| q.decisions.iter()))
            }
        }
    }
}

impl InsightView {
    /// True when no group survived filtering ("no results")
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn decision_count(&self) -> usize {
        self.groups.iter().map(|g| g.decisions.len()).sum()
    }
}

impl YearViewContent {
    pub fn decisions(&self) -> Box<dyn Iterator<Item = &DecisionRecord> + '_> {
        match self {
            YearViewContent::Flat(decisions) => Box::new(decisions.iter()),
            YearViewContent::Quarters(quarters) => {
                Box::new(quarters.iter().flat_map(|q| q.decisions.iter()))
            }
        }
    }
}

impl TimelineView {
    /// True when no year survived filtering ("no results")
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn decision_count(&self) -> usize {
        self.years.iter().map(|y| y.content.decisions().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_text_drops_integral_fraction() {
        let kpi = Kpi {
            value: 420.0,
            label: "NGRP".to_string(),
            change: 0.0,
            trend: Trend::Flat,
            series: vec![],
        };
        assert_eq!(kpi.value_text(), "420");

        let kpi = Kpi { value: 3.5, ..kpi };
        assert_eq!(kpi.value_text(), "3.5");
    }

    #[test]
    fn test_value_text_keeps_large_integral_values() {
        let decision = DecisionRecord {
            id: 1,
            unique_id: None,
            title: "Reach campaign".to_string(),
            stage: Stage::Effect,
            kpis: vec![Kpi {
                value: 1e21,
                label: "Impressions".to_string(),
                change: 0.0,
                trend: Trend::Flat,
                series: vec![],
            }],
        };
        assert_eq!(decision.kpis[0].value_text(), "1000000000000000000000");
        assert!(crate::filter::matches(&decision, Some("1000000000000000000000")));
        assert!(!crate::filter::matches(&decision, Some("9223372036854775807")));
    }

    #[test]
    fn test_year_content_error_names_bad_field() {
        let err = serde_json::from_str::<YearContent>(r#"[{"id": 1, "title": "A", "stage": "Launch"}]"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("Launch"), "unexpected error: {}", err);
        assert!(!err.contains("untagged"), "unexpected error: {}", err);

        let err = serde_json::from_str::<YearContent>(r#"[{"month": "Q4", "decisions": [{"id": "x"}]}]"#)
            .unwrap_err()
            .to_string();
        assert!(!err.contains("untagged"), "unexpected error: {}", err);
    }

    #[test]
    fn test_year_content_shapes() {
        let flat: YearContent =
            serde_json::from_str(r#"[{"id": 1, "title": "A", "stage": "Effect"}]"#).unwrap();
        assert!(matches!(flat, YearContent::Flat(ref d) if d.len() == 1));

        let nested: YearContent = serde_json::from_str(
            r#"[{"month": "Q4", "decisions": [{"id": 2, "title": "B"}]}]"#,
        )
        .unwrap();
        assert!(matches!(nested, YearContent::Quarters(ref q) if q[0].month == "Q4"));

        // Zero-length bucket has no shape to probe; it reads as flat and empty
        let empty: YearContent = serde_json::from_str("[]").unwrap();
        assert_eq!(empty, YearContent::Flat(vec![]));
    }

    #[test]
    fn test_placed_sets_unique_id_without_touching_original() {
        let record = DecisionRecord {
            id: 7,
            unique_id: None,
            title: "Test".to_string(),
            stage: Stage::Rollout,
            kpis: vec![],
        };
        let placed = record.placed("brand_awareness");
        assert_eq!(placed.unique_id.as_deref(), Some("brand_awareness-7"));
        assert_eq!(placed.id, 7);
        assert!(record.unique_id.is_none());
    }

    #[test]
    fn test_stage_from_str() {
        assert_eq!("rollout".parse::<Stage>().unwrap(), Stage::Rollout);
        assert_eq!(" Effect ".parse::<Stage>().unwrap(), Stage::Effect);
        assert!("launch".parse::<Stage>().is_err());
        assert_eq!(Stage::default(), Stage::Discussion);
    }
}
