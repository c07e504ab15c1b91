//! Mod configuration (`modkit.toml`).
//!
//! ```toml
//! keys_dir = "save/keys"
//! compress_keys = true
//!
//! [symbols]
//! element = [["fire", "flame"], ["ice"]]
//! weapon_type = [["sword"]]
//! ```
//!
//! Each inner list is one new entry: its names share the next free code of the
//! table, in file order.

use std::path::PathBuf;

use database_core::{NewEntry, SymbolTables, TableKind};

/// Names of one new symbol table entry.
pub type EntryNames = Vec<String>;

/// Game-specific entries for the extensible symbol tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SymbolSection {
    pub element: Vec<EntryNames>,
    pub skill_type: Vec<EntryNames>,
    pub weapon_type: Vec<EntryNames>,
    pub armor_type: Vec<EntryNames>,
}

impl SymbolSection {
    fn tables(&self) -> [(TableKind, &Vec<EntryNames>); 4] {
        [
            (TableKind::Element, &self.element),
            (TableKind::SkillType, &self.skill_type),
            (TableKind::WeaponType, &self.weapon_type),
            (TableKind::ArmorType, &self.armor_type),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.tables().iter().all(|(_, entries)| entries.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModConfig {
    /// Overrides the key store directory of the runtime configuration.
    pub keys_dir: Option<PathBuf>,
    /// Overrides whether key stores are zlib compressed.
    pub compress_keys: Option<bool>,
    pub symbols: SymbolSection,
}

impl ModConfig {
    /// Registers the configured entries, in file order.
    ///
    /// Returns one [`NewEntry`] per configured entry so callers can report
    /// names that were already taken.
    pub fn apply_to(&self, symbols: &mut SymbolTables) -> Vec<NewEntry> {
        self.symbols
            .tables()
            .into_iter()
            .flat_map(|(kind, entries)| entries.iter().map(move |names| (kind, names)))
            .map(|(kind, names)| symbols.add_entry(kind, names.iter().cloned()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> EntryNames {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn configured_entries_extend_builtin_tables() {
        let mut config = ModConfig::default();
        config.symbols.element.push(names(&["fire", "flame"]));
        config.symbols.element.push(names(&["ice"]));
        config.symbols.armor_type.push(names(&["robe"]));

        let mut symbols = SymbolTables::builtin();
        let added = config.apply_to(&mut symbols);

        assert!(added.iter().all(NewEntry::is_added));
        let element = symbols.table(TableKind::Element);
        assert_eq!(element.get("fire"), Some(1));
        assert_eq!(element.get("flame"), Some(1));
        assert_eq!(element.get("ice"), Some(2));
        assert_eq!(element.get("none"), Some(0));
        assert_eq!(symbols.table(TableKind::ArmorType).get("robe"), Some(1));
        assert!(!config.symbols.is_empty());
    }

    #[test]
    fn configured_entries_never_remap_builtin_names() {
        let mut config = ModConfig::default();
        config.symbols.element.push(names(&["none"]));
        config.symbols.element.push(names(&["normal_attack", "holy"]));

        let mut symbols = SymbolTables::builtin();
        let added = config.apply_to(&mut symbols);

        assert_eq!(added[0].code, None);
        assert_eq!(added[0].taken, ["none"]);
        assert_eq!(added[1].code, Some(1));
        assert_eq!(added[1].taken, ["normal_attack"]);

        let element = symbols.table(TableKind::Element);
        assert_eq!(element.get("none"), Some(0));
        assert_eq!(element.get("normal_attack"), Some(-1));
        assert_eq!(element.get("holy"), Some(1));
    }
}
