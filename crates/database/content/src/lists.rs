//! Feature, effect and learning lists carried by catalog entries.
//!
//! The lists are not schema fields. They are read from the entry's
//! `features`, `effects` and `learnings` keys and replace the matching list of
//! the record once it has been created. Codes are the engine's numeric codes.
//!
//! ```ron
//! "features": [{ "code": 22, "data_id": 0, "value": 0.95 }],
//! "effects": [{ "code": 11, "value1": 0.0, "value2": 500 }],
//! "learnings": [{ "level": 5, "skill_id": 12, "note": "" }],
//! ```

use database_core::{
    Actor, Armor, BuildError, Class, Effect, EffectCode, Feature, FeatureCode, HasEffects,
    HasFeatures, Item, Learning, RecordKind, Skill, Weapon,
};
use indexmap::IndexMap;

use crate::catalog::CatalogValue;

pub const FEATURES: &str = "features";
pub const EFFECTS: &str = "effects";
pub const LEARNINGS: &str = "learnings";

/// List keys accepted by entries of `kind`.
pub fn list_keys(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::Actor | RecordKind::Weapon | RecordKind::Armor => &[FEATURES],
        RecordKind::Class => &[FEATURES, LEARNINGS],
        RecordKind::Skill | RecordKind::Item => &[EFFECTS],
    }
}

/// Lists read from one entry; `None` when the entry does not mention the list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryLists {
    pub features: Option<Vec<Feature>>,
    pub effects: Option<Vec<Effect>>,
    pub learnings: Option<Vec<Learning>>,
}

impl EntryLists {
    /// Reads the lists `kind` accepts from `attributes`.
    pub fn read(
        kind: RecordKind,
        attributes: &IndexMap<String, CatalogValue>,
    ) -> Result<Self, BuildError> {
        let mut lists = Self::default();
        for &key in list_keys(kind) {
            let Some(value) = attributes.get(key) else {
                continue;
            };
            match key {
                FEATURES => lists.features = Some(read_features(value)?),
                EFFECTS => lists.effects = Some(read_effects(value)?),
                _ => lists.learnings = Some(read_learnings(value)?),
            }
        }
        Ok(lists)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_none() && self.effects.is_none() && self.learnings.is_none()
    }
}

/// Records that take the lists of a catalog entry.
pub trait ApplyLists {
    /// Replaces every list the entry mentions; others stay as built.
    fn apply_lists(&mut self, lists: EntryLists);
}

fn replace_features(record: &mut impl HasFeatures, features: Option<Vec<Feature>>) {
    if let Some(features) = features {
        record.clear_features();
        features.into_iter().for_each(|f| record.push_feature(f));
    }
}

fn replace_effects(record: &mut impl HasEffects, effects: Option<Vec<Effect>>) {
    if let Some(effects) = effects {
        record.clear_effects();
        effects.into_iter().for_each(|e| record.push_effect(e));
    }
}

macro_rules! apply_lists {
    ($($record:ty => $replace:ident($list:ident)),* $(,)?) => {
        $(
            impl ApplyLists for $record {
                fn apply_lists(&mut self, lists: EntryLists) {
                    $replace(self, lists.$list);
                }
            }
        )*
    };
}

apply_lists! {
    Actor => replace_features(features),
    Weapon => replace_features(features),
    Armor => replace_features(features),
    Skill => replace_effects(effects),
    Item => replace_effects(effects),
}

impl ApplyLists for Class {
    fn apply_lists(&mut self, lists: EntryLists) {
        replace_features(self, lists.features);
        if let Some(learnings) = lists.learnings {
            self.clear_learnings();
            for learning in learnings {
                self.add_learning(learning.level, learning.skill_id, learning.note);
            }
        }
    }
}

/// Expected shape of one list, for error reporting.
struct Shape {
    field: &'static str,
    expected: &'static str,
}

type Fields = IndexMap<String, CatalogValue>;

impl Shape {
    fn mismatch(&self, found: impl Into<String>) -> BuildError {
        BuildError::ShapeMismatch {
            field: self.field,
            expected: self.expected.to_owned(),
            found: found.into(),
        }
    }

    fn maps<'a>(&self, value: &'a CatalogValue) -> Result<Vec<&'a Fields>, BuildError> {
        let CatalogValue::List(items) = value else {
            return Err(self.mismatch(value.type_name()));
        };
        items
            .iter()
            .map(|item| match item {
                CatalogValue::Map(fields) => Ok(fields),
                other => Err(self.mismatch(format!("an Array containing {}", other.type_name()))),
            })
            .collect()
    }

    fn int(&self, fields: &Fields, key: &str, default: Option<i64>) -> Result<i64, BuildError> {
        match fields.get(key) {
            Some(CatalogValue::Int(value)) => Ok(*value),
            Some(other) => Err(self.mismatch(format!("`{key}` as {}", other.type_name()))),
            None => default.ok_or_else(|| self.mismatch(format!("an entry without `{key}`"))),
        }
    }

    fn float(&self, fields: &Fields, key: &str) -> Result<f64, BuildError> {
        match fields.get(key) {
            Some(CatalogValue::Float(value)) => Ok(*value),
            Some(CatalogValue::Int(value)) => Ok(*value as f64),
            Some(other) => Err(self.mismatch(format!("`{key}` as {}", other.type_name()))),
            None => Ok(0.0),
        }
    }

    fn code<T>(&self, fields: &Fields, from_repr: fn(u8) -> Option<T>) -> Result<T, BuildError> {
        let code = self.int(fields, "code", None)?;
        u8::try_from(code)
            .ok()
            .and_then(from_repr)
            .ok_or_else(|| self.mismatch(format!("unknown code {code}")))
    }
}

fn read_features(value: &CatalogValue) -> Result<Vec<Feature>, BuildError> {
    let shape = Shape {
        field: FEATURES,
        expected: "an Array of { code, data_id, value } Hashes",
    };
    shape
        .maps(value)?
        .into_iter()
        .map(|fields| {
            Ok(Feature::new(
                shape.code(fields, FeatureCode::from_repr)?,
                shape.int(fields, "data_id", Some(0))?,
                shape.float(fields, "value")?,
            ))
        })
        .collect()
}

fn read_effects(value: &CatalogValue) -> Result<Vec<Effect>, BuildError> {
    let shape = Shape {
        field: EFFECTS,
        expected: "an Array of { code, data_id, value1, value2 } Hashes",
    };
    shape
        .maps(value)?
        .into_iter()
        .map(|fields| {
            Ok(Effect::new(
                shape.code(fields, EffectCode::from_repr)?,
                shape.int(fields, "data_id", Some(0))?,
                shape.float(fields, "value1")?,
                shape.float(fields, "value2")?,
            ))
        })
        .collect()
}

fn read_learnings(value: &CatalogValue) -> Result<Vec<Learning>, BuildError> {
    let shape = Shape {
        field: LEARNINGS,
        expected: "an Array of { level, skill_id, note } Hashes",
    };
    shape
        .maps(value)?
        .into_iter()
        .map(|fields| {
            let note = match fields.get("note") {
                Some(CatalogValue::Str(note)) => note.clone(),
                Some(other) => {
                    return Err(shape.mismatch(format!("`note` as {}", other.type_name())));
                }
                None => String::new(),
            };
            Ok(Learning {
                level: shape.int(fields, "level", None)?,
                skill_id: shape.int(fields, "skill_id", None)?,
                note,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(fields: &[(&str, CatalogValue)]) -> CatalogValue {
        CatalogValue::Map(
            fields
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
        )
    }

    fn attributes(key: &str, items: Vec<CatalogValue>) -> Fields {
        [(key.to_owned(), CatalogValue::List(items))].into_iter().collect()
    }

    #[test]
    fn features_read_numeric_codes() {
        let attrs = attributes(
            FEATURES,
            vec![map(&[
                ("code", CatalogValue::Int(22)),
                ("value", CatalogValue::Float(0.95)),
            ])],
        );

        let lists = EntryLists::read(RecordKind::Weapon, &attrs).unwrap();

        assert_eq!(
            lists.features,
            Some(vec![Feature::new(FeatureCode::ExParam, 0, 0.95)])
        );
        assert!(lists.effects.is_none());
    }

    #[test]
    fn lists_outside_the_kind_are_not_read() {
        let attrs = attributes(EFFECTS, vec![map(&[("code", CatalogValue::Int(11))])]);

        assert!(EntryLists::read(RecordKind::Armor, &attrs).unwrap().is_empty());
        assert!(EntryLists::read(RecordKind::Item, &attrs).unwrap().effects.is_some());
    }

    #[test]
    fn unknown_codes_are_shape_errors() {
        let attrs = attributes(FEATURES, vec![map(&[("code", CatalogValue::Int(99))])]);

        let err = EntryLists::read(RecordKind::Actor, &attrs).unwrap_err();

        assert!(matches!(err, BuildError::ShapeMismatch { field: "features", .. }));
    }

    #[test]
    fn learnings_need_level_and_skill() {
        let attrs = attributes(
            LEARNINGS,
            vec![map(&[
                ("level", CatalogValue::Int(5)),
                ("skill_id", CatalogValue::Int(12)),
            ])],
        );
        let mut class = Class::default();
        class.add_learning(1, 1, "");

        class.apply_lists(EntryLists::read(RecordKind::Class, &attrs).unwrap());

        assert_eq!(
            class.learnings,
            [Learning {
                level: 5,
                skill_id: 12,
                note: String::new(),
            }]
        );

        let missing = attributes(LEARNINGS, vec![map(&[("level", CatalogValue::Int(5))])]);
        assert!(EntryLists::read(RecordKind::Class, &missing).is_err());
    }

    #[test]
    fn unmentioned_lists_are_kept() {
        let mut potion = Item::default();
        potion.add_recover_hp(0.0, 500.0);

        potion.apply_lists(EntryLists::default());

        assert_eq!(potion.effects().len(), 1);
    }
}
