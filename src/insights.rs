//! Insight grouping
//!
//! Every decision in the store (flat list first, then each year in store
//! order) is offered to the insight categories in priority order. A
//! decision lands in the first category that claims its id and passes the
//! filter, and is then unavailable to every later category.

use crate::filter::{CompiledFilter, DecisionFilter};
use crate::types::{DecisionRecord, DecisionStore, InsightCategory, InsightGroup, InsightView};
use std::collections::HashSet;
use tracing::debug;

/// Fixed category priority; categories not listed keep their relative order after these
pub const INSIGHT_PRIORITY: [&str; 4] = [
    "market_share",
    "brand_awareness",
    "market_performance",
    "customer_engagement",
];

/// All decisions of the store in encounter order
pub fn flatten(store: &DecisionStore) -> Vec<&DecisionRecord> {
    store
        .decisions
        .iter()
        .chain(store.years.iter().flat_map(|y| y.content.decisions()))
        .collect()
}

/// Categories sorted into priority order (stable)
pub fn prioritize(categories: &[InsightCategory]) -> Vec<&InsightCategory> {
    let mut ordered: Vec<&InsightCategory> = categories.iter().collect();
    ordered.sort_by_key(|c| {
        INSIGHT_PRIORITY
            .iter()
            .position(|p| *p == c.id)
            .unwrap_or(INSIGHT_PRIORITY.len())
    });
    ordered
}

/// Group the store by insight category
pub fn group_by_insight(
    store: &DecisionStore,
    categories: &[InsightCategory],
    filter: &DecisionFilter,
) -> InsightView {
    let decisions = flatten(store);
    let compiled = filter.compile();

    let (claimed, groups) = prioritize(categories).into_iter().fold(
        (HashSet::new(), Vec::new()),
        |(claimed, mut groups), category| {
            let (claimed, selected) = select(category, &decisions, &compiled, claimed);
            if !selected.is_empty() {
                groups.push(InsightGroup {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    decisions: selected,
                });
            }
            (claimed, groups)
        },
    );

    debug!(
        categories = categories.len(),
        candidates = decisions.len(),
        claimed = claimed.len(),
        groups = groups.len(),
        "insight grouping pass"
    );

    InsightView { groups }
}

/// Pick this category's decisions, returning the claimed set grown by them.
///
/// Only selected decisions are claimed: one that fails the filter stays
/// available to lower-priority categories.
fn select(
    category: &InsightCategory,
    decisions: &[&DecisionRecord],
    filter: &CompiledFilter,
    mut claimed: HashSet<u32>,
) -> (HashSet<u32>, Vec<DecisionRecord>) {
    let wanted: HashSet<u32> = category.decisions.iter().copied().collect();
    let mut selected = Vec::new();

    for decision in decisions {
        if !wanted.contains(&decision.id) || claimed.contains(&decision.id) {
            continue;
        }
        if !filter.accepts(decision) {
            continue;
        }
        claimed.insert(decision.id);
        selected.push(decision.placed(&category.id));
    }

    (claimed, selected)
}

/// Convenience wrapper: group by a bare search term
pub fn group_by_insight_search(
    store: &DecisionStore,
    categories: &[InsightCategory],
    search_term: Option<&str>,
) -> InsightView {
    group_by_insight(store, categories, &DecisionFilter::from_search(search_term))
}
