//! Timeline (year -> quarter) view
//!
//! Years most recent first, quarters Q4 first. Quarters and years left
//! without a matching decision are dropped, so an empty view means
//! "no results" without a second scan.

use crate::filter::{CompiledFilter, DecisionFilter};
use crate::ordering::{sort_quarters, sort_years};
use crate::types::{
    DecisionRecord, DecisionStore, QuarterBucket, QuarterGroup, TimelineView, YearBucket,
    YearContent, YearView, YearViewContent,
};
use std::collections::HashMap;
use tracing::debug;

/// Group the store's year buckets into the timeline view
pub fn group_by_quarter(store: &DecisionStore, filter: &DecisionFilter) -> TimelineView {
    let compiled = filter.compile();

    let mut buckets: Vec<&YearBucket> = store.years.iter().collect();
    buckets.sort_by(|a, b| sort_years(&a.year, &b.year));

    let mut keys = Keys::default();
    let years: Vec<YearView> = buckets
        .into_iter()
        .filter_map(|bucket| year_view(bucket, &compiled, &mut keys))
        .collect();

    debug!(
        buckets = store.years.len(),
        years = years.len(),
        "timeline grouping pass"
    );

    TimelineView { years }
}

/// Convenience wrapper: group by a bare search term
pub fn group_by_quarter_search(store: &DecisionStore, search_term: Option<&str>) -> TimelineView {
    group_by_quarter(store, &DecisionFilter::from_search(search_term))
}

/// Hands out `unique_id`s for one pass. A key already issued (same id twice
/// in a year, or two quarters sharing a label) gets a `-<n>` suffix.
#[derive(Default)]
struct Keys {
    issued: HashMap<String, usize>,
}

impl Keys {
    fn place(&mut self, decision: &DecisionRecord, context: &str) -> DecisionRecord {
        let mut placed = decision.placed(context);
        if let Some(key) = placed.unique_id.as_mut() {
            let seen = self.issued.entry(key.clone()).or_default();
            *seen += 1;
            if *seen > 1 {
                key.push_str(&format!("-{}", seen));
            }
        }
        placed
    }
}

fn year_view(bucket: &YearBucket, filter: &CompiledFilter, keys: &mut Keys) -> Option<YearView> {
    let content = match &bucket.content {
        YearContent::Flat(decisions) => {
            let kept = keep(decisions, &bucket.year, filter, keys);
            if kept.is_empty() {
                return None;
            }
            YearViewContent::Flat(kept)
        }
        YearContent::Quarters(quarters) => {
            let mut ordered: Vec<&QuarterGroup> = quarters.iter().collect();
            ordered.sort_by(|a, b| sort_quarters(&a.month, &b.month));

            let kept: Vec<QuarterBucket> = ordered
                .into_iter()
                .filter_map(|quarter| {
                    let context = format!("{}-{}", bucket.year, quarter.month);
                    let decisions = keep(&quarter.decisions, &context, filter, keys);
                    (!decisions.is_empty()).then(|| QuarterBucket {
                        label: quarter.month.clone(),
                        decisions,
                    })
                })
                .collect();
            if kept.is_empty() {
                return None;
            }
            YearViewContent::Quarters(kept)
        }
    };

    Some(YearView {
        year: bucket.year.clone(),
        content,
    })
}

fn keep(
    decisions: &[DecisionRecord],
    context: &str,
    filter: &CompiledFilter,
    keys: &mut Keys,
) -> Vec<DecisionRecord> {
    decisions
        .iter()
        .filter(|d| filter.accepts(d))
        .map(|d| keys.place(d, context))
        .collect()
}
