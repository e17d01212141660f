//! `leetsync status` — what has been synced so far.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use leetsync_sync::state;

/// Arguments for `leetsync status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusJson {
    problems: usize,
    solutions: usize,
    /// `null` until the first real sync has run.
    last_synced: Option<String>,
    languages: std::collections::BTreeMap<String, usize>,
}

#[derive(Tabled)]
struct LanguageRow {
    #[tabled(rename = "language")]
    language: String,
    #[tabled(rename = "solutions")]
    solutions: usize,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;
        let state = state::load_at(&home).context("failed to load sync state")?;

        if self.json {
            // An empty state carries a freshly-seeded timestamp, not a real
            // sync time; report null instead.
            let last_synced = if state.is_empty() {
                None
            } else {
                Some(state.synced_at.to_rfc3339())
            };
            let json = StatusJson {
                problems: state.problem_count(),
                solutions: state.pair_count(),
                last_synced,
                languages: state.counts_by_language(),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
            return Ok(());
        }

        if state.is_empty() {
            println!("no solutions synced yet — run `leetsync sync`");
            return Ok(());
        }

        let rows: Vec<LanguageRow> = state
            .counts_by_language()
            .into_iter()
            .map(|(language, solutions)| LanguageRow {
                language,
                solutions,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{table}");
        println!(
            "{} {} solutions across {} problems, last synced {}",
            "✓".green(),
            state.pair_count(),
            state.problem_count(),
            state.synced_at.to_rfc3339()
        );
        Ok(())
    }
}
