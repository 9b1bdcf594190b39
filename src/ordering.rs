//! Year and quarter ordering
//!
//! Both comparators sort descending (most recent first). Labels that
//! can't be ranked get rank 0 and land last; nothing here fails.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// First run of four digits in a label ("Q3 2023" -> 2023).
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

const QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Numeric year carried by a label, if any
pub fn year_of(label: &str) -> Option<u32> {
    YEAR_RE
        .find(label)
        .and_then(|m| m.as_str().parse().ok())
}

/// Rank of a quarter label: Q1..Q4 -> 1..4, legacy month names -> 1..12, else 0
pub fn quarter_rank(label: &str) -> u32 {
    if let Some(i) = QUARTERS.iter().position(|q| label.contains(q)) {
        return i as u32 + 1;
    }
    MONTHS
        .iter()
        .position(|m| label.contains(m))
        .map(|i| i as u32 + 1)
        .unwrap_or(0)
}

/// Most recent year first; unrecognized labels last
pub fn sort_years(a: &str, b: &str) -> Ordering {
    year_of(b).unwrap_or(0).cmp(&year_of(a).unwrap_or(0))
}

/// Q4 before Q1; unrecognized labels last
pub fn sort_quarters(a: &str, b: &str) -> Ordering {
    quarter_rank(b).cmp(&quarter_rank(a))
}
