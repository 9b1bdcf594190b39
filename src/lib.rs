//! decision-board - grouping, filtering and search over business decisions
//!
//! Decision records (marketing/business actions with KPIs) are filed under
//! years and quarters and claimed by insight categories. This crate turns
//! a read-only store into the two views a dashboard renders:
//!
//! - **Timeline**: years most recent first, quarters Q4 first
//! - **Insights**: one group per insight category, in priority order, each
//!   decision in at most one group
//!
//! Both views take a search term (and optionally a stage) and drop empty
//! groups, so an empty view is the "no results" signal.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use decision_board::{DecisionBoard, DecisionFilter, ViewMode};
//!
//! let board = DecisionBoard::builtin();
//! let filter = DecisionFilter::from_search(Some("ngrp"));
//!
//! for group in board.insights(&filter).groups {
//!     println!("{}: {} decision(s)", group.name, group.decisions.len());
//! }
//! assert!(board.has_results(ViewMode::Quarters, &filter));
//! ```
//!
//! # Identity
//!
//! `DecisionRecord::id` is business identity and may repeat across
//! contexts. Every record placed into a view gets a fresh
//! `unique_id` of the form `<context>-<id>`; renderers key on that.

pub mod board;
pub mod filter;
pub mod fixtures;
pub mod insights;
pub mod ordering;
pub mod store;
pub mod summary;
pub mod timeline;
pub mod types;

// Core types
pub use board::{BoardStats, DecisionBoard, ViewMode};
pub use filter::{matches, DecisionFilter};
pub use types::*;

// Grouping
pub use insights::{flatten, group_by_insight, group_by_insight_search, INSIGHT_PRIORITY};
pub use ordering::{quarter_rank, sort_quarters, sort_years, year_of};
pub use timeline::{group_by_quarter, group_by_quarter_search};

// Loading and rollups
pub use store::{load_board, resolve_board, save_board, BoardData};
pub use summary::{KpiSummary, StageCounts};
