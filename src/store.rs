//! Board loading
//!
//! A board file is one JSON document holding the decision store and the
//! insight taxonomy. Without one, the built-in fixtures are used.

use crate::fixtures;
use crate::types::{DecisionStore, InsightCategory};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming a board file
pub const STORE_ENV: &str = "DECISION_BOARD_STORE";

/// On-disk board: store fields at the top level plus `insights`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoardData {
    #[serde(flatten)]
    pub store: DecisionStore,
    #[serde(default)]
    pub insights: Vec<InsightCategory>,
}

impl BoardData {
    /// The built-in sample board
    pub fn builtin() -> Self {
        Self {
            store: fixtures::decision_store(),
            insights: fixtures::insight_categories(),
        }
    }
}

/// Load and validate a board file
pub fn load_board(path: &Path) -> Result<BoardData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read board at {:?}", path))?;
    let board: BoardData = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse board at {:?}", path))?;

    validate(&board)?;
    warn_on_shared_ids(&board.store);

    info!(
        path = %path.display(),
        decisions = board.store.decisions.len(),
        years = board.store.years.len(),
        insights = board.insights.len(),
        "board loaded"
    );
    Ok(board)
}

/// Write a board as pretty JSON
pub fn save_board(path: &Path, board: &BoardData) -> Result<()> {
    let json = serde_json::to_string_pretty(board)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write board to {:?}", path))?;
    Ok(())
}

/// Default board location in the user's data directory
pub fn default_board_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("decision-board")
        .join("board.json")
}

/// Pick the board: explicit path, then `env_path`, then the data directory
/// if a board exists there, then the built-in fixtures.
pub fn resolve_board(explicit: Option<&Path>, env_path: Option<&Path>) -> Result<BoardData> {
    if let Some(path) = explicit.or(env_path) {
        return load_board(path);
    }
    let default = default_board_path();
    if default.exists() {
        return load_board(&default);
    }
    Ok(BoardData::builtin())
}

fn validate(board: &BoardData) -> Result<()> {
    for (i, category) in board.insights.iter().enumerate() {
        if category.id.trim().is_empty() {
            bail!("Insight category #{} ('{}') has an empty id", i, category.name);
        }
    }
    Ok(())
}

fn warn_on_shared_ids(store: &DecisionStore) {
    let mut contexts: HashMap<u32, usize> = HashMap::new();
    let all = store
        .decisions
        .iter()
        .chain(store.years.iter().flat_map(|y| y.content.decisions()));
    for decision in all {
        *contexts.entry(decision.id).or_default() += 1;
    }
    let shared = contexts.values().filter(|n| **n > 1).count();
    if shared > 0 {
        warn!(shared, "decision ids appear in more than one context");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::YearContent;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_mixed_year_shapes() {
        let file = write_temp(
            r#"{
                "decisions": [{"id": 1, "title": "Flat", "stage": "Effect"}],
                "years": [
                    {"year": "2024", "content": [{"month": "Q4", "decisions": [{"id": 2, "title": "Nested"}]}]},
                    {"year": "2023", "content": [{"id": 3, "title": "Plain", "kpis": [{"value": 1, "label": "x", "trend": "up"}]}]},
                    {"year": "2022", "content": []}
                ],
                "insights": [{"id": "market_share", "name": "Market Share", "decisions": [1, 99]}]
            }"#,
        );
        let board = load_board(file.path()).unwrap();
        assert_eq!(board.store.decisions.len(), 1);
        assert!(matches!(board.store.years[0].content, YearContent::Quarters(_)));
        assert!(matches!(board.store.years[1].content, YearContent::Flat(_)));
        assert_eq!(board.store.years[2].content, YearContent::Flat(vec![]));
        assert_eq!(board.insights[0].decisions, vec![1, 99]);
    }

    #[test]
    fn test_empty_insight_id_rejected() {
        let file = write_temp(r#"{"insights": [{"id": " ", "name": "Blank", "decisions": []}]}"#);
        let err = load_board(file.path()).unwrap_err();
        assert!(err.to_string().contains("empty id"));
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let file = write_temp("{ not json");
        let err = load_board(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse board"));
    }

    #[test]
    fn test_save_then_load_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        let builtin = BoardData::builtin();
        save_board(&path, &builtin).unwrap();

        let loaded = load_board(&path).unwrap();
        assert_eq!(loaded.insights, builtin.insights);
        assert_eq!(loaded.store.years.len(), builtin.store.years.len());
        for (a, b) in loaded.store.years.iter().zip(&builtin.store.years) {
            assert_eq!(a.year, b.year);
            let ids_a: Vec<u32> = a.content.decisions().map(|d| d.id).collect();
            let ids_b: Vec<u32> = b.content.decisions().map(|d| d.id).collect();
            assert_eq!(ids_a, ids_b);
        }
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = write_temp(r#"{"decisions": [{"id": 5, "title": "Explicit"}]}"#);
        let env = write_temp(r#"{"decisions": []}"#);
        let board = resolve_board(Some(explicit.path()), Some(env.path())).unwrap();
        assert_eq!(board.store.decisions[0].title, "Explicit");

        let board = resolve_board(None, Some(env.path())).unwrap();
        assert!(board.store.decisions.is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_board(&dir.path().join("absent.json")).is_err());
    }
}
