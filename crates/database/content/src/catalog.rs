//! Record catalogs: attribute sets for bulk record creation.
//!
//! A catalog is a list of entries, each carrying an optional unique key and the
//! same keyed attributes `create_*` accepts. Strings given to enum fields are
//! read as symbol names, so `"scope": "all_enemies"` in a catalog behaves like
//! `scope: :all_enemies` in code.
//!
//! ```ron
//! (
//!     entries: [
//!         (
//!             key: Some("mymod:flame_blade"),
//!             attributes: {
//!                 "name": "Flame Blade",
//!                 "wtype": "sword",
//!                 "params": { "atk": 12 },
//!             },
//!         ),
//!         (attributes: { "name": "Stick", "price": 5 }),
//!     ],
//! )
//! ```
//!
//! Feature, effect and learning lists ride along under their own keys; see
//! [`crate::lists`].

use std::ops::{Bound, RangeBounds};

use database_core::{AttrInput, AttrValue, BuildError, FieldKind, RecordSchema, base64};
use indexmap::IndexMap;

use crate::lists::{EntryLists, list_keys};

/// A plain attribute value as written in a catalog file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CatalogValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<CatalogValue>),
    Map(IndexMap<String, CatalogValue>),
}

impl CatalogValue {
    fn into_attr(self) -> AttrValue {
        match self {
            Self::Bool(value) => AttrValue::Bool(value),
            Self::Int(value) => AttrValue::Int(value),
            Self::Float(value) => AttrValue::Float(value),
            Self::Str(value) => AttrValue::Str(value),
            Self::List(values) => AttrValue::list(values.into_iter().map(Self::into_attr)),
            Self::Map(entries) => {
                AttrValue::map(entries.into_iter().map(|(k, v)| (k, v.into_attr())))
            }
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Boolean",
            Self::Int(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Str(_) => "String",
            Self::List(_) => "Array",
            Self::Map(_) => "Hash",
        }
    }
}

/// One record definition.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogEntry {
    /// Unique key for ID allocation; generated from the entry's text when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: IndexMap<String, CatalogValue>,
}

impl CatalogEntry {
    /// String attribute stored for `field`, looked up by field name first and
    /// then by each synonym, the order record creation uses.
    pub fn text(&self, schema: &RecordSchema, field: &str) -> Option<&str> {
        let spec = schema.field(field)?;
        spec.keys()
            .find_map(|key| self.attributes.get(key))
            .and_then(CatalogValue::as_str)
    }

    /// Feature, effect and learning lists of the entry.
    pub fn lists(&self, schema: &RecordSchema) -> Result<EntryLists, BuildError> {
        EntryLists::read(schema.kind(), &self.attributes)
    }

    /// Attribute keys that match no field of `schema` and no list key.
    pub fn unknown_keys<'a>(&'a self, schema: &'a RecordSchema) -> impl Iterator<Item = &'a str> {
        let lists = list_keys(schema.kind());
        self.attributes.keys().map(String::as_str).filter(move |key| {
            !lists.contains(key) && !schema.fields().iter().any(|field| field.answers_to(key))
        })
    }

    /// True when the entry has neither a name nor a description.
    pub fn is_empty(&self, schema: &RecordSchema) -> bool {
        let blank = |field: &str| self.text(schema, field).is_none_or(str::is_empty);
        blank("name") && blank("description")
    }

    /// The explicit key, or one derived from the entry's text.
    ///
    /// Derived keys have the form `"{base64(description[..8] + note[..8])} | {name}"`,
    /// where the slices count characters.
    pub fn unique_key(&self, schema: &RecordSchema) -> String {
        if let Some(key) = &self.key {
            return key.clone();
        }

        let prefix = |field: &str| -> String {
            self.text(schema, field)
                .unwrap_or_default()
                .chars()
                .take(8)
                .collect()
        };
        let seed = prefix("description") + &prefix("note");
        let name = self.text(schema, "name").unwrap_or_default();

        format!("{} | {}", base64::encode(seed), name)
    }

    /// Converts the entry into keyed builder input.
    ///
    /// Top-level strings given to enum fields become symbol references. List
    /// keys are left out.
    pub fn to_input(&self, schema: &RecordSchema) -> AttrInput {
        let lists = list_keys(schema.kind());
        let fields = self.attributes.iter().filter(|(key, _)| !lists.contains(&key.as_str()));
        let entries = fields.map(|(key, value)| {
            let is_enum = schema
                .fields()
                .iter()
                .any(|field| matches!(field.kind, FieldKind::Enum(_)) && field.answers_to(key));
            let value = match value {
                CatalogValue::Str(name) if is_enum => AttrValue::symbol(name.clone()),
                other => other.clone().into_attr(),
            };
            (key.clone(), value)
        });
        AttrInput::keyed(entries)
    }
}

/// Ordered list of record definitions of one kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordCatalog {
    pub entries: Vec<CatalogEntry>,
}

impl RecordCatalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries within `range`, clamped to the catalog.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> &[CatalogEntry] {
        let len = self.entries.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        }
        .clamp(start, len);
        &self.entries[start..end]
    }
}

#[cfg(test)]
mod tests {
    use database_core::RecordKind;

    use super::*;

    fn entry(attributes: &[(&str, CatalogValue)]) -> CatalogEntry {
        CatalogEntry {
            key: None,
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn generated_key_uses_text_prefixes() {
        let schema = RecordSchema::for_kind(RecordKind::Weapon);
        let weapon = entry(&[
            ("name", CatalogValue::Str("Club".into())),
            ("desc", CatalogValue::Str("A heavy club".into())),
            ("note", CatalogValue::Str("<two handed>".into())),
        ]);

        let expected = format!("{} | Club", base64::encode("A heavy <two han"));
        assert_eq!(weapon.unique_key(&schema), expected);
    }

    #[test]
    fn explicit_key_wins() {
        let schema = RecordSchema::for_kind(RecordKind::Item);
        let mut item = entry(&[("name", CatalogValue::Str("Potion".into()))]);
        item.key = Some("mod:potion".into());

        assert_eq!(item.unique_key(&schema), "mod:potion");
    }

    #[test]
    fn empty_entries_have_no_name_or_description() {
        let schema = RecordSchema::for_kind(RecordKind::Armor);
        assert!(entry(&[("price", CatalogValue::Int(3))]).is_empty(&schema));
        assert!(!entry(&[("desc", CatalogValue::Str("Cap".into()))]).is_empty(&schema));
    }

    #[test]
    fn field_name_wins_over_synonym_regardless_of_order() {
        let schema = RecordSchema::for_kind(RecordKind::Weapon);
        let weapon = entry(&[
            ("desc", CatalogValue::Str("synonym".into())),
            ("description", CatalogValue::Str("field".into())),
            ("name", CatalogValue::Str("Club".into())),
        ]);

        assert_eq!(weapon.text(&schema, "description"), Some("field"));
        let expected = format!("{} | Club", base64::encode("field"));
        assert_eq!(weapon.unique_key(&schema), expected);
    }

    #[test]
    fn unknown_keys_exclude_fields_synonyms_and_lists() {
        let schema = RecordSchema::for_kind(RecordKind::Weapon);
        let weapon = entry(&[
            ("name", CatalogValue::Str("Club".into())),
            ("desc", CatalogValue::Str("Heavy".into())),
            ("features", CatalogValue::List(Vec::new())),
            ("effects", CatalogValue::List(Vec::new())),
            ("colour", CatalogValue::Str("red".into())),
        ]);

        let unknown: Vec<_> = weapon.unknown_keys(&schema).collect();
        assert_eq!(unknown, ["effects", "colour"]);

        let AttrInput::Keyed(entries) = weapon.to_input(&schema) else {
            panic!("catalog input is keyed");
        };
        assert!(entries.iter().all(|(key, _)| key != "features"));
    }

    #[test]
    fn slices_clamp_to_the_catalog() {
        let catalog = RecordCatalog {
            entries: (0..4).map(|i| entry(&[("price", CatalogValue::Int(i))])).collect(),
        };

        assert_eq!(catalog.slice(..).len(), 4);
        assert_eq!(catalog.slice(1..3).len(), 2);
        assert_eq!(catalog.slice(2..=9).len(), 2);
        assert!(catalog.slice(6..).is_empty());
        assert_eq!(catalog.slice(1..3)[0], catalog.entries[1]);
    }

    #[test]
    fn enum_strings_become_symbols() {
        let schema = RecordSchema::for_kind(RecordKind::Skill);
        let skill = entry(&[
            ("name", CatalogValue::Str("all_enemies".into())),
            ("scope", CatalogValue::Str("all_enemies".into())),
        ]);

        let AttrInput::Keyed(entries) = skill.to_input(&schema) else {
            panic!("catalog input is keyed");
        };
        assert!(matches!(&entries[0].1, AttrValue::Str(s) if s == "all_enemies"));
        assert!(matches!(&entries[1].1, AttrValue::Symbol(s) if s == "all_enemies"));
    }
}
