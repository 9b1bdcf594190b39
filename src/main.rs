//! decision-board CLI
//!
//! Prints the timeline or insight view of a decision board.
//!
//! Run with: cargo run -- insights campaign --json

use anyhow::Result;
use decision_board::{
    board::{DecisionBoard, ViewMode},
    filter::DecisionFilter,
    store::{self, BoardData},
    summary::KpiSummary,
    types::*,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<String> = std::env::args().collect();
    let json_output = args.iter().any(|a| a == "--json");
    let stage = args
        .iter()
        .find_map(|a| a.strip_prefix("--stage="))
        .map(|s| s.parse::<Stage>())
        .transpose()?;
    let explicit = args
        .iter()
        .find_map(|a| a.strip_prefix("--store="))
        .map(PathBuf::from);
    // Positional words after the command form the search term
    let term: String = args
        .iter()
        .skip(2)
        .filter(|a| !a.starts_with("--"))
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    let filter = DecisionFilter::from_search(Some(term.as_str())).with_stage(stage);

    match args.get(1).map(|s| s.as_str()) {
        Some("--export") => {
            println!("{}", serde_json::to_string_pretty(&BoardData::builtin())?);
            Ok(())
        }
        Some(command) => {
            let board = match &explicit {
                Some(path) => DecisionBoard::open(path)?,
                None => {
                    let env_path = std::env::var_os(store::STORE_ENV).map(PathBuf::from);
                    DecisionBoard::from_data(store::resolve_board(None, env_path.as_deref())?)
                }
            };

            match command {
                "quarters" => run_quarters(&board, &filter, json_output),
                "insights" => run_insights(&board, &filter, json_output),
                "--stats" => run_stats(&board, json_output),
                _ => {
                    print_usage();
                    Ok(())
                }
            }
        }
        None => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  decision-board quarters [term...] [--stage=Effect] [--json] [--store=path]");
    eprintln!("  decision-board insights [term...] [--stage=Effect] [--json] [--store=path]");
    eprintln!("  decision-board --stats [--json] [--store=path]");
    eprintln!("  decision-board --export");
    eprintln!();
    eprintln!("Board file: --store, then ${}, then {:?}", store::STORE_ENV, store::default_board_path());
}

/// Print the year -> quarter view
fn run_quarters(board: &DecisionBoard, filter: &DecisionFilter, json_output: bool) -> Result<()> {
    let view = board.timeline(filter);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.is_empty() {
        print_no_results(filter);
        return Ok(());
    }

    println!("{} decision(s) in {} year(s)\n", view.decision_count(), view.years.len());
    for year in &view.years {
        println!("━━ {} ━━  {}", year.year, KpiSummary::of(year.content.decisions()).headline());
        match &year.content {
            YearViewContent::Quarters(quarters) => {
                for quarter in quarters {
                    println!("  {}", quarter.label);
                    for decision in &quarter.decisions {
                        print_decision(decision, "    ");
                    }
                }
            }
            YearViewContent::Flat(decisions) => {
                for decision in decisions {
                    print_decision(decision, "  ");
                }
            }
        }
        println!();
    }
    Ok(())
}

/// Print the insight view
fn run_insights(board: &DecisionBoard, filter: &DecisionFilter, json_output: bool) -> Result<()> {
    let view = board.insights(filter);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.is_empty() {
        print_no_results(filter);
        return Ok(());
    }

    println!("{} decision(s) in {} insight(s)\n", view.decision_count(), view.groups.len());
    for group in &view.groups {
        println!("━━ {} ━━  {}", group.name, KpiSummary::of(&group.decisions).headline());
        for decision in &group.decisions {
            print_decision(decision, "  ");
        }
        println!();
    }
    Ok(())
}

fn run_stats(board: &DecisionBoard, json_output: bool) -> Result<()> {
    let stats = board.stats();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Decisions: {} unfiled, {} filed under {} year(s)", stats.unfiled, stats.filed, stats.years);
    println!("Insight categories: {} ({} decision id(s) unclaimed)", stats.insight_categories, stats.unclaimed);
    println!("Stages:");
    for stage in Stage::all() {
        println!("   {:<10} {}", stage.name(), stats.stages.get(stage));
    }
    println!("KPIs: {}", stats.kpis.headline());
    Ok(())
}

fn print_decision(decision: &DecisionRecord, indent: &str) {
    println!(
        "{}[{}] {} ({})",
        indent,
        decision.unique_id.as_deref().unwrap_or("-"),
        decision.title,
        decision.stage.name()
    );
    for kpi in &decision.kpis {
        println!(
            "{}   {} {}: {} ({:+.1}%)",
            indent,
            kpi.trend.arrow(),
            kpi.label,
            kpi.value_text(),
            kpi.change
        );
    }
}

fn print_no_results(filter: &DecisionFilter) {
    if filter.is_noop() {
        println!("Board is empty");
        return;
    }
    match (&filter.search, filter.stage) {
        (Some(term), Some(stage)) if !term.is_empty() => {
            println!("No decisions match '{}' in stage {}", term, stage.name())
        }
        (Some(term), _) if !term.is_empty() => println!("No decisions match '{}'", term),
        (_, Some(stage)) => println!("No decisions in stage {}", stage.name()),
        _ => println!("No decisions match"),
    }
}
