//! KPI rollups for a group of decisions

use crate::types::{DecisionRecord, Stage, Trend};
use serde::{Deserialize, Serialize};

/// Trend counts and average percent change over a set of decisions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KpiSummary {
    pub decisions: usize,
    pub kpis: usize,
    pub up: usize,
    pub down: usize,
    pub flat: usize,
    /// Mean percent change over all KPIs (0.0 when there are none)
    pub mean_change: f64,
}

/// Decisions per stage
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageCounts {
    pub discussion: usize,
    pub effect: usize,
    pub approvals: usize,
    pub rollout: usize,
}

impl KpiSummary {
    pub fn of<'a>(decisions: impl IntoIterator<Item = &'a DecisionRecord>) -> Self {
        let mut summary = KpiSummary::default();
        let mut total_change = 0.0;

        for decision in decisions {
            summary.decisions += 1;
            for kpi in &decision.kpis {
                summary.kpis += 1;
                total_change += kpi.change;
                match kpi.trend {
                    Trend::Up => summary.up += 1,
                    Trend::Down => summary.down += 1,
                    Trend::Flat => summary.flat += 1,
                }
            }
        }

        if summary.kpis > 0 {
            summary.mean_change = total_change / summary.kpis as f64;
        }
        summary
    }

    /// One-line headline, e.g. "3 decisions, 5 KPIs (▲3 ▼1 ■1), avg +4.2%"
    pub fn headline(&self) -> String {
        format!(
            "{} decision(s), {} KPI(s) ({}{} {}{} {}{}), avg {:+.1}%",
            self.decisions,
            self.kpis,
            Trend::Up.arrow(),
            self.up,
            Trend::Down.arrow(),
            self.down,
            Trend::Flat.arrow(),
            self.flat,
            self.mean_change
        )
    }
}

impl StageCounts {
    pub fn of<'a>(decisions: impl IntoIterator<Item = &'a DecisionRecord>) -> Self {
        let mut counts = StageCounts::default();
        for decision in decisions {
            match decision.stage {
                Stage::Discussion => counts.discussion += 1,
                Stage::Effect => counts.effect += 1,
                Stage::Approvals => counts.approvals += 1,
                Stage::Rollout => counts.rollout += 1,
            }
        }
        counts
    }

    pub fn get(&self, stage: Stage) -> usize {
        match stage {
            Stage::Discussion => self.discussion,
            Stage::Effect => self.effect,
            Stage::Approvals => self.approvals,
            Stage::Rollout => self.rollout,
        }
    }
}
