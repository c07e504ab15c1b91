use crate::kind::{RecordKind, TextField};
use crate::validate::ValidatedRecord;

use super::{Feature, HasFeatures, Record, Text, any_record_conversions};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub id: u32,
    pub name: Text,
    pub description: Text,
    pub weapon_type: i64,
    /// Flat bonuses to the eight base parameters.
    pub params: Vec<i64>,
    pub icon_index: i64,
    pub animation_id: i64,
    pub price: i64,
    pub features: Vec<Feature>,
    pub note: String,
}

impl Record for Weapon {
    const KIND: RecordKind = RecordKind::Weapon;

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
            _ => None,
        }
    }

    fn from_validated(id: u32, v: &ValidatedRecord) -> Self {
        Self {
            id,
            name: v.text("name"),
            description: v.text("description"),
            weapon_type: v.int("weapon_type"),
            params: v.ints("parameters"),
            icon_index: v.int("icon"),
            animation_id: v.int("animation"),
            price: v.int("price"),
            features: Vec::new(),
            note: v.string("note"),
        }
    }

    any_record_conversions!(Weapon);
}

impl HasFeatures for Weapon {
    fn features(&self) -> &[Feature] {
        &self.features
    }

    fn features_mut(&mut self) -> &mut Vec<Feature> {
        &mut self.features
    }
}
