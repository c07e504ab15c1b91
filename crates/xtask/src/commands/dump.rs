//! Print records built from a data directory

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use database_core::RecordKind;
use runtime::Database;

use crate::session::{self, SessionOptions};

/// Print records built from the catalogs
#[derive(Parser)]
pub struct Dump {
    /// Record kind to dump
    #[arg(value_parser = super::parse_kind)]
    kind: RecordKind,

    /// Only records whose name contains this text
    #[arg(short, long)]
    search: Option<String>,

    /// Data directory with modkit.toml and catalogs (defaults to MODKIT_DATA_DIR)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Allocate IDs from the key stores in this directory instead of memory
    #[arg(long, value_name = "DIR")]
    keys_dir: Option<PathBuf>,
}

impl Dump {
    pub fn execute(self) -> Result<()> {
        let (mut db, _) = session::open(SessionOptions {
            data_dir: self.data_dir,
            keys_dir: self.keys_dir,
        })?;
        db.player_loaded()?;

        let search = self.search.unwrap_or_default();
        let ids = find(&db, self.kind, &search);
        if ids.is_empty() {
            println!("{}", style(format!("No {} found", self.kind)).dim());
            return Ok(());
        }

        for id in ids {
            if let Some(text) = describe(&db, self.kind, id) {
                println!("{text}");
                println!("{}", style("-------").dim());
            }
        }

        Ok(())
    }
}

fn find(db: &Database, kind: RecordKind, search: &str) -> Vec<u32> {
    match kind {
        RecordKind::Actor => db.find_actor(search),
        RecordKind::Class => db.find_class(search),
        RecordKind::Skill => db.find_skill(search),
        RecordKind::Item => db.find_item(search),
        RecordKind::Weapon => db.find_weapon(search),
        RecordKind::Armor => db.find_armor(search),
    }
}

fn describe(db: &Database, kind: RecordKind, id: u32) -> Option<String> {
    match kind {
        RecordKind::Actor => db.describe_actor(id),
        RecordKind::Class => db.describe_class(id),
        RecordKind::Skill => db.describe_skill(id),
        RecordKind::Item => db.describe_item(id),
        RecordKind::Weapon => db.describe_weapon(id),
        RecordKind::Armor => db.describe_armor(id),
    }
}
