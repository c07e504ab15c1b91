//! Validate the content of a data directory
//!
//! Builds every catalog with in-memory key stores, runs the finalization pass
//! and reports what would be created.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::session::{self, SessionOptions};

/// Build every catalog in a data directory and report problems
#[derive(Parser)]
pub struct CheckCatalog {
    /// Data directory with modkit.toml and catalogs (defaults to MODKIT_DATA_DIR)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print the finalization report as JSON
    #[arg(long)]
    json: bool,
}

impl CheckCatalog {
    pub fn execute(self) -> Result<()> {
        let (mut db, summary) = session::open(SessionOptions {
            data_dir: self.data_dir,
            keys_dir: None,
        })?;
        let report = db.player_loaded()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("{}", style("=== Catalogs ===").bold().green());
        if summary.is_empty() {
            println!("  {}", style("no catalogs found").dim());
        }
        for (kind, ids) in &summary {
            println!("  {:<8} {} records", style(kind).cyan(), ids.len());
        }

        println!();
        println!("{}", style("=== Deferred text ===").bold().green());
        println!("  resolved: {}", report.resolved);
        for skipped in &report.skipped {
            println!(
                "  {} {} {} `{}`: {:?}",
                style("skipped").yellow(),
                skipped.kind,
                skipped.field,
                skipped.key,
                skipped.reason
            );
        }

        if report.skipped.is_empty() {
            println!();
            println!("{}", style("✓ Content is consistent").green().bold());
        }

        Ok(())
    }
}
