use crate::kind::{RecordKind, TextField};
use crate::validate::ValidatedRecord;

use super::{Feature, HasFeatures, Record, Text, any_record_conversions};

/// A playable character.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: u32,
    pub name: Text,
    pub nickname: Text,
    pub class_id: i64,
    pub initial_level: i64,
    pub max_level: i64,
    pub description: Text,
    pub character_name: String,
    pub character_index: i64,
    pub face_name: String,
    pub face_index: i64,
    /// Starting equipment per slot.
    pub equips: Vec<i64>,
    pub features: Vec<Feature>,
    pub note: String,
}

impl Record for Actor {
    const KIND: RecordKind = RecordKind::Actor;

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &Text {
        &self.name
    }

    fn note(&self) -> &str {
        &self.note
    }

    fn text_mut(&mut self, field: TextField) -> Option<&mut Text> {
        match field {
            TextField::Name => Some(&mut self.name),
            TextField::Description => Some(&mut self.description),
            TextField::Nickname => Some(&mut self.nickname),
            TextField::Message1 | TextField::Message2 => None,
        }
    }

    fn from_validated(id: u32, v: &ValidatedRecord) -> Self {
        Self {
            id,
            name: v.text("name"),
            nickname: v.text("nickname"),
            class_id: v.int("class"),
            initial_level: v.int("initial_level"),
            max_level: v.int("max_level"),
            description: v.text("description"),
            character_name: v.string("character_name"),
            character_index: v.int("character_index"),
            face_name: v.string("face_name"),
            face_index: v.int("face_index"),
            equips: v.ints("equips"),
            features: Vec::new(),
            note: v.string("note"),
        }
    }

    any_record_conversions!(Actor);
}

impl HasFeatures for Actor {
    fn features(&self) -> &[Feature] {
        &self.features
    }

    fn features_mut(&mut self) -> &mut Vec<Feature> {
        &mut self.features
    }
}
