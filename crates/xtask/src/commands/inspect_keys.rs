//! Read and inspect persistent key stores
//!
//! Opens `<kind>_keys.dat` files and displays their bindings.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use database_core::RecordKind;
use runtime::{FileKeyStore, KeyStore};

use crate::session;

/// Show the key → ID bindings of persistent key stores
#[derive(Parser)]
pub struct InspectKeys {
    /// Record kind to inspect (all kinds when omitted)
    #[arg(short, long, value_parser = super::parse_kind)]
    kind: Option<RecordKind>,

    /// Custom key store directory (defaults to MODKIT_KEYS_DIR or the platform location)
    #[arg(long, value_name = "DIR")]
    keys_dir: Option<PathBuf>,

    /// Read zlib-compressed stores (defaults to MODKIT_COMPRESS_KEYS)
    #[arg(long)]
    compressed: Option<bool>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Bindings per kind, ordered by ID
    Summary,
    /// Full JSON output
    Json,
}

impl InspectKeys {
    pub fn execute(self) -> Result<()> {
        let config = session::config(None, self.keys_dir);
        let compressed = self.compressed.unwrap_or(config.compress_keys);
        let kinds = match self.kind {
            Some(kind) => vec![kind],
            None => RecordKind::ALL.to_vec(),
        };

        let mut stores = BTreeMap::new();
        for kind in kinds {
            let store = FileKeyStore::for_kind(&config.keys_dir, kind, compressed)?;
            let bindings = store
                .load_all()
                .with_context(|| format!("Failed to read {}", store.path().display()))?;
            stores.insert(kind, (store, bindings));
        }

        match self.format {
            OutputFormat::Summary => {
                println!(
                    "{} {}",
                    style("Key directory:").bold().cyan(),
                    config.keys_dir.display()
                );
                for (kind, (store, bindings)) in &stores {
                    print_summary(*kind, store, bindings);
                }
            }
            OutputFormat::Json => {
                let json: BTreeMap<String, &BTreeMap<String, u32>> = stores
                    .iter()
                    .map(|(kind, (_, bindings))| (kind.to_string(), bindings))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }

        Ok(())
    }
}

fn print_summary(kind: RecordKind, store: &FileKeyStore, bindings: &BTreeMap<String, u32>) {
    println!();
    println!(
        "{} {}",
        style(format!("=== {kind} ===")).bold().green(),
        style(store.path().display()).dim()
    );

    if bindings.is_empty() {
        println!("  {}", style("no bindings").dim());
        return;
    }

    let mut by_id: Vec<_> = bindings.iter().collect();
    by_id.sort_by_key(|(_, id)| **id);
    for (key, id) in by_id {
        println!("  {:>5}  {}", style(id).yellow(), key);
    }
}
