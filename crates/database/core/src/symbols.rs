//! Symbol tables that map readable names onto the numeric codes stored in records.
//!
//! Enum-like fields accept either the raw code or a name from the field's table,
//! e.g. `scope: :all_enemies` and `scope: 2` build identical records. Several
//! names may map onto one code; the first name registered for a code is its
//! canonical name and is used when describing records.
//!
//! The element, skill type, weapon type and armor type tables only ship their
//! engine-defined entries. Everything else in those tables is game specific and
//! is added through [`SymbolTables::add_entry`] or a mod config. Names already
//! present in a table are never remapped.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::BuildError;

/// Identifies one symbol table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::AsRefStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TableKind {
    Element,
    SkillType,
    WeaponType,
    ArmorType,
    EquipType,
    Param,
    ExParam,
    SpParam,
    SpecialFlag,
    CollapseEffect,
    PartyAbility,
    Scope,
    Occasion,
    HitType,
    DamageType,
    ItemType,
}

impl core::fmt::Display for TableKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}_SYMBOLS", self.as_ref())
    }
}

/// Reference to an enum value: either the raw code or a symbolic name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnumRef {
    Raw(i64),
    Named(String),
}

impl From<i64> for EnumRef {
    fn from(code: i64) -> Self {
        Self::Raw(code)
    }
}

impl From<i32> for EnumRef {
    fn from(code: i32) -> Self {
        Self::Raw(i64::from(code))
    }
}

impl From<&str> for EnumRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for EnumRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// One name → code table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolTable {
    kind: TableKind,
    entries: IndexMap<String, i64>,
}

impl SymbolTable {
    /// Creates a table from `(name, code)` pairs. Later duplicates of a name win.
    pub fn new<'a>(kind: TableKind, entries: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        Self {
            kind,
            entries: entries
                .into_iter()
                .map(|(name, code)| (name.to_owned(), code))
                .collect(),
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Looks up the code registered for `name`.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.entries.get(name).copied()
    }

    /// Resolves an enum reference into its numeric code.
    ///
    /// Raw codes pass through unchecked; names must exist in this table.
    pub fn resolve(&self, value: &EnumRef) -> Result<i64, BuildError> {
        match value {
            EnumRef::Raw(code) => Ok(*code),
            EnumRef::Named(name) => self.get(name).ok_or_else(|| BuildError::UnknownSymbol {
                symbol: name.clone(),
                table: self.kind,
            }),
        }
    }

    /// Returns the canonical (first registered) name of `code`.
    pub fn name_of(&self, code: i64) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, value)| **value == code)
            .map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Adds `name` for `code`. Returns false, leaving the table untouched, when
    /// the name is already registered.
    pub fn insert(&mut self, name: impl Into<String>, code: i64) -> bool {
        match self.entries.entry(name.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(code);
                true
            }
        }
    }

    /// The code a new entry receives: one past the highest code in use.
    pub fn next_code(&self) -> i64 {
        self.entries.values().copied().max().map_or(0, |max| max.max(0) + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.entries.iter().map(|(name, code)| (name.as_str(), *code))
    }
}

/// The full set of symbol tables used by one database context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTables {
    tables: HashMap<TableKind, SymbolTable>,
}

impl SymbolTables {
    /// Builds the engine-defined tables.
    pub fn builtin() -> Self {
        let tables = [
            SymbolTable::new(TableKind::Element, [("normal_attack", -1), ("none", 0)]),
            SymbolTable::new(TableKind::SkillType, [("none", 0)]),
            SymbolTable::new(TableKind::WeaponType, [("none", 0)]),
            SymbolTable::new(TableKind::ArmorType, [("none", 0)]),
            SymbolTable::new(
                TableKind::EquipType,
                [
                    ("weapon", 0),
                    ("shield", 1),
                    ("head", 2),
                    ("body", 3),
                    ("accessory", 4),
                ],
            ),
            SymbolTable::new(
                TableKind::Param,
                [
                    ("mhp", 0),
                    ("max_hp", 0),
                    ("max_hit_points", 0),
                    ("max_health", 0),
                    ("mmp", 1),
                    ("max_mp", 1),
                    ("max_mana_points", 1),
                    ("max_mana", 1),
                    ("atk", 2),
                    ("attack", 2),
                    ("attack_power", 2),
                    ("def", 3),
                    ("defense", 3),
                    ("defense_power", 3),
                    ("mat", 4),
                    ("magic_attack", 4),
                    ("magic_attack_power", 4),
                    ("mdf", 5),
                    ("magic_defense", 5),
                    ("magic_defense_power", 5),
                    ("agi", 6),
                    ("agility", 6),
                    ("spd", 6),
                    ("speed", 6),
                    ("luk", 7),
                    ("luck", 7),
                ],
            ),
            SymbolTable::new(
                TableKind::ExParam,
                [
                    ("hit", 0),
                    ("hit_rate", 0),
                    ("eva", 1),
                    ("evasion_rate", 1),
                    ("cri", 2),
                    ("critical_rate", 2),
                    ("cev", 3),
                    ("critical_evasion_rate", 3),
                    ("mev", 4),
                    ("magic_evasion_rate", 4),
                    ("mrf", 5),
                    ("magic_reflection_rate", 5),
                    ("cnt", 6),
                    ("counter_attack_rate", 6),
                    ("hrg", 7),
                    ("hp_regen_rate", 7),
                    ("mrg", 8),
                    ("mp_regen_rate", 8),
                    ("trg", 9),
                    ("tp_regen_rate", 9),
                ],
            ),
            SymbolTable::new(
                TableKind::SpParam,
                [
                    ("trg", 0),
                    ("target_rate", 0),
                    ("grd", 1),
                    ("guard_effect_rate", 1),
                    ("rec", 2),
                    ("recovery_effect_rate", 2),
                    ("pha", 3),
                    ("pharmacology", 3),
                    ("mcr", 4),
                    ("mp_cost_rate", 4),
                    ("tcr", 5),
                    ("tp_charge_rate", 5),
                    ("pdr", 6),
                    ("physical_damage_rate", 6),
                    ("mdr", 7),
                    ("magical_damage_rate", 7),
                    ("fdr", 8),
                    ("floor_damage_rate", 8),
                    ("exr", 9),
                    ("experience_rate", 9),
                ],
            ),
            SymbolTable::new(
                TableKind::SpecialFlag,
                [
                    ("auto_battle", 0),
                    ("guard", 1),
                    ("substitute", 2),
                    ("preserve_tp", 3),
                ],
            ),
            SymbolTable::new(
                TableKind::CollapseEffect,
                [
                    ("normal", 0),
                    ("boss", 1),
                    ("instant", 2),
                    ("not_disappear", 3),
                ],
            ),
            SymbolTable::new(
                TableKind::PartyAbility,
                [
                    ("encounter_half", 0),
                    ("encounter_none", 1),
                    ("cancel_surprise", 2),
                    ("cancel_suprise", 2),
                    ("raise_preemptive", 3),
                    ("raise_preemtive", 3),
                    ("gold_double", 4),
                    ("item_double", 5),
                    ("drop_item_double", 5),
                ],
            ),
            SymbolTable::new(
                TableKind::Scope,
                [
                    ("none", 0),
                    ("one_enemy", 1),
                    ("all_enemies", 2),
                    ("one_random_enemy", 3),
                    ("two_random_enemies", 4),
                    ("three_random_enemies", 5),
                    ("four_random_enemies", 6),
                    ("one_ally", 7),
                    ("all_allies", 8),
                    ("one_ally_dead", 9),
                    ("one_dead_ally", 9),
                    ("all_allies_dead", 10),
                    ("all_dead_allies", 10),
                    ("the_user", 11),
                    ("user", 11),
                    ("self", 11),
                ],
            ),
            SymbolTable::new(
                TableKind::Occasion,
                [
                    ("always", 0),
                    ("only_in_battle", 1),
                    ("battle_only", 1),
                    ("only_from_the_menu", 2),
                    ("menu_only", 2),
                    ("never", 3),
                ],
            ),
            SymbolTable::new(
                TableKind::HitType,
                [
                    ("certain_hit", 0),
                    ("certain", 0),
                    ("physical_attack", 1),
                    ("physical", 1),
                    ("magical_attack", 2),
                    ("magical", 2),
                ],
            ),
            SymbolTable::new(
                TableKind::DamageType,
                [
                    ("none", 0),
                    ("hp_damage", 1),
                    ("mp_damage", 2),
                    ("hp_recover", 3),
                    ("mp_recover", 4),
                    ("hp_drain", 5),
                    ("mp_drain", 6),
                ],
            ),
            SymbolTable::new(TableKind::ItemType, [("normal", 1), ("key_item", 2)]),
        ];

        Self {
            tables: tables.into_iter().map(|table| (table.kind(), table)).collect(),
        }
    }

    /// Returns the table for `kind`.
    pub fn table(&self, kind: TableKind) -> &SymbolTable {
        // Every TableKind is populated by `builtin`, the only constructor.
        &self.tables[&kind]
    }

    /// Resolves `value` against the table for `kind`.
    pub fn resolve(&self, kind: TableKind, value: &EnumRef) -> Result<i64, BuildError> {
        self.table(kind).resolve(value)
    }

    /// Canonical name of `code` in the table for `kind`.
    pub fn name_of(&self, kind: TableKind, code: i64) -> Option<&str> {
        self.table(kind).name_of(code)
    }

    /// Registers an alias for `code`. Names already in the table are refused.
    pub fn insert(&mut self, kind: TableKind, name: impl Into<String>, code: i64) -> bool {
        self.table_mut(kind).insert(name, code)
    }

    /// Registers a new game-specific entry under the next free code.
    ///
    /// Names already present in the table are left out and reported in
    /// [`NewEntry::taken`]. When every name is taken nothing is added and
    /// [`NewEntry::code`] is `None`.
    pub fn add_entry<N: Into<String>>(
        &mut self,
        kind: TableKind,
        names: impl IntoIterator<Item = N>,
    ) -> NewEntry {
        let table = self.table_mut(kind);
        let (taken, fresh): (Vec<String>, Vec<String>) = names
            .into_iter()
            .map(Into::into)
            .partition(|name| table.contains(name));

        if fresh.is_empty() {
            return NewEntry { table: kind, code: None, taken };
        }

        let code = table.next_code();
        for name in fresh {
            table.insert(name, code);
        }
        NewEntry {
            table: kind,
            code: Some(code),
            taken,
        }
    }

    fn table_mut(&mut self, kind: TableKind) -> &mut SymbolTable {
        self.tables
            .entry(kind)
            .or_insert_with(|| SymbolTable::new(kind, std::iter::empty()))
    }
}

/// Result of [`SymbolTables::add_entry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry {
    pub table: TableKind,
    /// Code assigned to the entry; `None` when every name was already taken.
    pub code: Option<i64>,
    /// Names skipped because the table already had them.
    pub taken: Vec<String>,
}

impl NewEntry {
    pub fn is_added(&self) -> bool {
        self.code.is_some()
    }
}

impl Default for SymbolTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_table_kind_is_populated() {
        let tables = SymbolTables::builtin();
        for kind in TableKind::iter() {
            assert!(!tables.table(kind).is_empty(), "{kind} is empty");
        }
    }

    #[test]
    fn aliases_share_codes_and_canonical_name_is_first() {
        let tables = SymbolTables::builtin();

        assert_eq!(tables.resolve(TableKind::Scope, &"all_enemies".into()), Ok(2));
        assert_eq!(tables.resolve(TableKind::Scope, &"self".into()), Ok(11));
        assert_eq!(tables.name_of(TableKind::Scope, 11), Some("the_user"));
        assert_eq!(tables.name_of(TableKind::Param, 6), Some("agi"));
    }

    #[test]
    fn raw_codes_pass_through() {
        let tables = SymbolTables::builtin();
        assert_eq!(tables.resolve(TableKind::Occasion, &EnumRef::Raw(42)), Ok(42));
    }

    #[test]
    fn unknown_name_reports_symbol_and_table() {
        let tables = SymbolTables::builtin();
        let err = tables
            .resolve(TableKind::Element, &"fire".into())
            .unwrap_err();

        assert_eq!(
            err,
            BuildError::UnknownSymbol {
                symbol: "fire".into(),
                table: TableKind::Element,
            }
        );
    }

    #[test]
    fn new_entries_take_the_next_free_code() {
        let mut tables = SymbolTables::builtin();

        let fire = tables.add_entry(TableKind::Element, ["fire", "flame"]);
        let ice = tables.add_entry(TableKind::Element, ["ice"]);

        assert_eq!(fire.code, Some(1));
        assert_eq!(ice.code, Some(2));
        assert_eq!(tables.resolve(TableKind::Element, &"flame".into()), Ok(1));
        assert_eq!(tables.name_of(TableKind::Element, 1), Some("fire"));
        assert_eq!(tables.name_of(TableKind::Element, -1), Some("normal_attack"));
    }

    #[test]
    fn builtin_names_cannot_be_remapped() {
        let mut tables = SymbolTables::builtin();

        assert!(!tables.insert(TableKind::Element, "none", 5));
        let entry = tables.add_entry(TableKind::Element, ["none", "normal_attack"]);

        assert_eq!(entry.code, None);
        assert_eq!(entry.taken, ["none", "normal_attack"]);
        assert_eq!(tables.resolve(TableKind::Element, &"none".into()), Ok(0));
        assert_eq!(tables.resolve(TableKind::Element, &"normal_attack".into()), Ok(-1));
        assert_eq!(tables.table(TableKind::Element).len(), 2);
    }

    #[test]
    fn taken_names_are_dropped_from_a_new_entry() {
        let mut tables = SymbolTables::builtin();

        let entry = tables.add_entry(TableKind::WeaponType, ["none", "sword"]);

        assert_eq!(entry.code, Some(1));
        assert_eq!(entry.taken, ["none"]);
        assert_eq!(tables.resolve(TableKind::WeaponType, &"none".into()), Ok(0));
        assert_eq!(tables.resolve(TableKind::WeaponType, &"sword".into()), Ok(1));
    }
}
