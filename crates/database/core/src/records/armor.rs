use crate::kind::{RecordKind, TextField};
use crate::validate::ValidatedRecord;

use super::{Feature, HasFeatures, Record, Text, any_record_conversions};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub id: u32,
    pub name: Text,
    pub description: Text,
    pub armor_type: i64,
    /// Equipment slot the armor goes into.
    pub equip_type: i64,
    pub params: Vec<i64>,
    pub icon_index: i64,
    pub price: i64,
    pub features: Vec<Feature>,
    pub note: String,
}

impl Record for Armor {
    const KIND: RecordKind = RecordKind::Armor;

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
            armor_type: v.int("armor_type"),
            equip_type: v.int("equip_type"),
            params: v.ints("parameters"),
            icon_index: v.int("icon"),
            price: v.int("price"),
            features: Vec::new(),
            note: v.string("note"),
        }
    }

    any_record_conversions!(Armor);
}

impl HasFeatures for Armor {
    fn features(&self) -> &[Feature] {
        &self.features
    }

    fn features_mut(&mut self) -> &mut Vec<Feature> {
        &mut self.features
    }
}
