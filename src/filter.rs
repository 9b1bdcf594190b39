//! Decision filtering
//!
//! A boolean filter, not a ranking: a decision either matches the search
//! term (case-insensitive substring of its title, or of any KPI label or
//! value) or it doesn't.

use crate::types::{DecisionRecord, Stage};
use serde::{Deserialize, Serialize};

/// Does `decision` match `search_term`? An empty or absent term matches everything.
pub fn matches(decision: &DecisionRecord, search_term: Option<&str>) -> bool {
    match normalize(search_term) {
        None => true,
        Some(needle) => matches_lowered(decision, &needle),
    }
}

/// Search term plus an optional stage restriction
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionFilter {
    pub search: Option<String>,
    pub stage: Option<Stage>,
}

impl DecisionFilter {
    /// Filter equivalent to `matches(_, term)`
    pub fn from_search(term: Option<&str>) -> Self {
        Self {
            search: term.map(|s| s.to_string()),
            stage: None,
        }
    }

    pub fn with_stage(mut self, stage: Option<Stage>) -> Self {
        self.stage = stage;
        self
    }

    /// Lowercase the term once so a grouping pass doesn't redo it per record
    pub fn compile(&self) -> CompiledFilter {
        CompiledFilter {
            needle: normalize(self.search.as_deref()),
            stage: self.stage,
        }
    }

    pub fn is_noop(&self) -> bool {
        normalize(self.search.as_deref()).is_none() && self.stage.is_none()
    }
}

/// A `DecisionFilter` ready to be applied to many records
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    needle: Option<String>,
    stage: Option<Stage>,
}

impl CompiledFilter {
    pub fn accepts(&self, decision: &DecisionRecord) -> bool {
        if let Some(stage) = self.stage {
            if decision.stage != stage {
                return false;
            }
        }
        match &self.needle {
            None => true,
            Some(needle) => matches_lowered(decision, needle),
        }
    }
}

fn normalize(term: Option<&str>) -> Option<String> {
    term.filter(|t| !t.is_empty()).map(|t| t.to_lowercase())
}

fn matches_lowered(decision: &DecisionRecord, needle: &str) -> bool {
    if decision.title.to_lowercase().contains(needle) {
        return true;
    }
    decision.kpis.iter().any(|kpi| {
        kpi.label.to_lowercase().contains(needle) || kpi.value_text().contains(needle)
    })
}
