//! Built-in sample board
//!
//! The decision store and insight taxonomy the dashboard ships with.
//! Constructed once at startup and passed by reference into the views.

use crate::types::{
    DecisionRecord, DecisionStore, InsightCategory, Kpi, KpiPoint, QuarterGroup, Stage, Trend,
    YearBucket, YearContent,
};
use chrono::NaiveDate;

/// The built-in decision store
pub fn decision_store() -> DecisionStore {
    DecisionStore {
        decisions: unfiled_decisions(),
        years: vec![year_2023(), year_2024(), year_2022()],
    }
}

/// The built-in insight taxonomy (deliberately not in priority order)
pub fn insight_categories() -> Vec<InsightCategory> {
    vec![
        InsightCategory {
            id: "brand_awareness".to_string(),
            name: "Brand Awareness".to_string(),
            decisions: vec![1, 2, 5, 9, 14],
        },
        InsightCategory {
            id: "customer_engagement".to_string(),
            name: "Customer Engagement".to_string(),
            decisions: vec![3, 6, 8, 11, 12, 42],
        },
        InsightCategory {
            id: "market_share".to_string(),
            name: "Market Share".to_string(),
            decisions: vec![4, 5, 10, 13],
        },
        InsightCategory {
            id: "market_performance".to_string(),
            name: "Market Performance".to_string(),
            decisions: vec![2, 7, 10, 15],
        },
    ]
}

// ============================================================================
// DECISIONS
// ============================================================================

fn unfiled_decisions() -> Vec<DecisionRecord> {
    vec![
        decision(
            1,
            "Launch TV advertising campaign for the spring collection",
            Stage::Effect,
            vec![
                kpi_series(
                    "NGRP",
                    420.0,
                    12.5,
                    Trend::Up,
                    &[("2024-03-01", 310.0), ("2024-04-01", 372.0), ("2024-05-01", 420.0)],
                ),
                kpi("Reach", 68.0, 4.0, Trend::Up),
            ],
        ),
        decision(
            2,
            "Shift 20% of print budget to social video",
            Stage::Approvals,
            vec![
                kpi("Video views (k)", 1250.0, 31.0, Trend::Up),
                kpi("CPM", 7.8, -6.2, Trend::Down),
            ],
        ),
        decision(
            3,
            "Introduce loyalty tier for repeat buyers",
            Stage::Rollout,
            vec![kpi("Repeat purchase rate", 27.4, 2.1, Trend::Up)],
        ),
    ]
}

fn year_2024() -> YearBucket {
    YearBucket {
        year: "2024".to_string(),
        content: YearContent::Quarters(vec![
            QuarterGroup {
                month: "Q2".to_string(),
                decisions: vec![
                    decision(
                        4,
                        "Enter discount segment with a private label",
                        Stage::Approvals,
                        vec![kpi("Market share", 14.2, 0.8, Trend::Up)],
                    ),
                    decision(
                        5,
                        "Sponsor regional football league",
                        Stage::Effect,
                        vec![
                            kpi("Aided awareness", 61.0, 5.5, Trend::Up),
                            kpi("Share of voice", 18.0, 0.0, Trend::Flat),
                        ],
                    ),
                ],
            },
            QuarterGroup {
                month: "Q4".to_string(),
                decisions: vec![
                    decision(
                        6,
                        "Redesign mobile checkout flow",
                        Stage::Rollout,
                        vec![
                            kpi("Conversion rate", 3.9, 0.6, Trend::Up),
                            kpi("Cart abandonment", 61.5, -4.3, Trend::Down),
                        ],
                    ),
                    decision(
                        7,
                        "Raise prices on premium line by 4%",
                        Stage::Effect,
                        vec![kpi("Gross margin", 41.0, 1.9, Trend::Up)],
                    ),
                ],
            },
            QuarterGroup {
                month: "Q1".to_string(),
                decisions: vec![decision(
                    8,
                    "Launch customer newsletter with personalised offers",
                    Stage::Rollout,
                    vec![
                        kpi("Open rate", 34.0, 3.0, Trend::Up),
                        kpi("Unsubscribes", 0.4, 0.0, Trend::Flat),
                    ],
                )],
            },
            QuarterGroup {
                month: "Q3".to_string(),
                decisions: vec![
                    decision(
                        9,
                        "Run influencer campaign for the autumn range",
                        Stage::Approvals,
                        vec![kpi("Engagement rate", 5.2, -0.7, Trend::Down)],
                    ),
                    // Same logical decision as the unfiled loyalty tier
                    decision(
                        3,
                        "Introduce loyalty tier for repeat buyers",
                        Stage::Rollout,
                        vec![kpi("Repeat purchase rate", 27.4, 2.1, Trend::Up)],
                    ),
                ],
            },
        ]),
    }
}

fn year_2023() -> YearBucket {
    YearBucket {
        year: "2023".to_string(),
        content: YearContent::Quarters(vec![
            QuarterGroup {
                month: "Q3 2023".to_string(),
                decisions: vec![decision(
                    10,
                    "Open flagship store in Rotterdam",
                    Stage::Rollout,
                    vec![
                        kpi("Revenue (k EUR)", 880.0, 11.0, Trend::Up),
                        kpi("Market share", 9.6, 1.2, Trend::Up),
                    ],
                )],
            },
            QuarterGroup {
                month: "Q4 2023".to_string(),
                decisions: vec![
                    decision(
                        11,
                        "Add live chat support on product pages",
                        Stage::Effect,
                        vec![kpi("CSAT", 4.4, 0.2, Trend::Up)],
                    ),
                    decision(
                        12,
                        "Pilot same-day delivery in two cities",
                        Stage::Approvals,
                        vec![kpi("Delivery NPS", 52.0, -3.0, Trend::Down)],
                    ),
                ],
            },
        ]),
    }
}

fn year_2022() -> YearBucket {
    YearBucket {
        year: "2022".to_string(),
        content: YearContent::Flat(vec![
            decision(
                13,
                "Acquire regional competitor's online shop",
                Stage::Rollout,
                vec![kpi("Market share", 8.4, 2.6, Trend::Up)],
            ),
            decision(
                14,
                "Refresh brand identity and logo",
                Stage::Effect,
                vec![kpi("Brand recall", 47.0, 0.0, Trend::Flat)],
            ),
            decision(
                15,
                "Consolidate suppliers for packaging",
                Stage::Rollout,
                vec![kpi("Cost per unit", 0.38, -8.0, Trend::Down)],
            ),
        ]),
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

fn decision(id: u32, title: &str, stage: Stage, kpis: Vec<Kpi>) -> DecisionRecord {
    DecisionRecord {
        id,
        unique_id: None,
        title: title.to_string(),
        stage,
        kpis,
    }
}

fn kpi(label: &str, value: f64, change: f64, trend: Trend) -> Kpi {
    Kpi {
        value,
        label: label.to_string(),
        change,
        trend,
        series: vec![],
    }
}

fn kpi_series(label: &str, value: f64, change: f64, trend: Trend, points: &[(&str, f64)]) -> Kpi {
    Kpi {
        series: points
            .iter()
            .filter_map(|(date, value)| {
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .ok()
                    .map(|date| KpiPoint { date, value: *value })
            })
            .collect(),
        ..kpi(label, value, change, trend)
    }
}
