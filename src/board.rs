//! Decision board facade
//!
//! Owns one store and one insight taxonomy and answers both views.
//!
//! ```rust,ignore
//! let board = DecisionBoard::builtin();
//! let filter = DecisionFilter::from_search(Some("campaign"));
//!
//! let timeline = board.timeline(&filter);
//! let insights = board.insights(&filter);
//! if board.has_results(ViewMode::Insights, &filter) { /* render */ }
//! ```

use crate::filter::DecisionFilter;
use crate::insights::group_by_insight;
use crate::store::{self, BoardData};
use crate::summary::{KpiSummary, StageCounts};
use crate::timeline::group_by_quarter;
use crate::types::{DecisionStore, InsightCategory, InsightView, TimelineView};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which grouping a caller is rendering
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Quarters,
    Insights,
}

/// Store-wide statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardStats {
    pub unfiled: usize,
    pub years: usize,
    pub filed: usize,
    pub insight_categories: usize,
    /// Decisions that no insight category claims
    pub unclaimed: usize,
    pub stages: StageCounts,
    pub kpis: KpiSummary,
}

pub struct DecisionBoard {
    store: DecisionStore,
    insights: Vec<InsightCategory>,
}

impl DecisionBoard {
    pub fn new(store: DecisionStore, insights: Vec<InsightCategory>) -> Self {
        Self { store, insights }
    }

    /// Board over the built-in fixtures
    pub fn builtin() -> Self {
        Self::from_data(BoardData::builtin())
    }

    pub fn from_data(data: BoardData) -> Self {
        Self::new(data.store, data.insights)
    }

    /// Load a board file
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_data(store::load_board(path)?))
    }

    pub fn timeline(&self, filter: &DecisionFilter) -> TimelineView {
        group_by_quarter(&self.store, filter)
    }

    pub fn insights(&self, filter: &DecisionFilter) -> InsightView {
        group_by_insight(&self.store, &self.insights, filter)
    }

    /// Does `mode` show anything under `filter`? False means "no results".
    pub fn has_results(&self, mode: ViewMode, filter: &DecisionFilter) -> bool {
        match mode {
            ViewMode::Quarters => !self.timeline(filter).is_empty(),
            ViewMode::Insights => !self.insights(filter).is_empty(),
        }
    }

    pub fn stats(&self) -> BoardStats {
        let filed: Vec<_> = self
            .store
            .years
            .iter()
            .flat_map(|y| y.content.decisions())
            .collect();
        let all: Vec<_> = self.store.decisions.iter().chain(filed.iter().copied()).collect();

        let claimed: std::collections::HashSet<u32> = self
            .insights(&DecisionFilter::default())
            .groups
            .iter()
            .flat_map(|g| g.decisions.iter().map(|d| d.id))
            .collect();
        let unclaimed = all
            .iter()
            .map(|d| d.id)
            .collect::<std::collections::HashSet<_>>()
            .difference(&claimed)
            .count();

        BoardStats {
            unfiled: self.store.decisions.len(),
            years: self.store.years.len(),
            filed: filed.len(),
            insight_categories: self.insights.len(),
            unclaimed,
            stages: StageCounts::of(all.iter().copied()),
            kpis: KpiSummary::of(all.iter().copied()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stage;

    #[test]
    fn test_no_results_in_both_modes() {
        let board = DecisionBoard::builtin();
        let filter = DecisionFilter::from_search(Some("nonexistent-xyz"));
        assert!(!board.has_results(ViewMode::Quarters, &filter));
        assert!(!board.has_results(ViewMode::Insights, &filter));
        assert!(board.timeline(&filter).is_empty());
        assert!(board.insights(&filter).is_empty());
    }

    #[test]
    fn test_results_for_known_term() {
        let board = DecisionBoard::builtin();
        let filter = DecisionFilter::from_search(Some("market share"));
        assert!(board.has_results(ViewMode::Quarters, &filter));
        assert!(board.has_results(ViewMode::Insights, &filter));
    }

    #[test]
    fn test_stage_filter_narrows_views() {
        let board = DecisionBoard::builtin();
        let filter = DecisionFilter::default().with_stage(Some(Stage::Approvals));
        let view = board.insights(&filter);
        assert!(!view.is_empty());
        for group in &view.groups {
            assert!(group.decisions.iter().all(|d| d.stage == Stage::Approvals));
        }
    }

    #[test]
    fn test_open_board_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        store::save_board(&path, &BoardData::builtin()).unwrap();

        let board = DecisionBoard::open(&path).unwrap();
        let view = board.insights(&DecisionFilter::default());
        assert_eq!(view.groups.len(), 4);
        // 16 records, id 3 filed twice; each id is emitted once
        assert_eq!(view.decision_count(), 15);
    }

    #[test]
    fn test_stats_on_fixtures() {
        let stats = DecisionBoard::builtin().stats();
        assert_eq!(stats.unfiled, 3);
        assert_eq!(stats.years, 3);
        assert_eq!(stats.insight_categories, 4);
        assert_eq!(stats.unclaimed, 0);
        assert_eq!(
            stats.stages.discussion + stats.stages.effect + stats.stages.approvals + stats.stages.rollout,
            stats.unfiled + stats.filed
        );
    }
}
