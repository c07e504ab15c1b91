use crate::kind::{RecordKind, TextField};
use crate::validate::ValidatedRecord;

use super::{Damage, Effect, HasEffects, Record, Text, any_record_conversions};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: u32,
    pub name: Text,
    pub description: Text,
    pub icon_index: i64,
    /// 1 for regular items, 2 for key items.
    pub item_type: i64,
    pub price: i64,
    pub consumable: bool,
    pub scope: i64,
    pub occasion: i64,
    pub speed: i64,
    pub success_rate: i64,
    pub repeats: i64,
    pub tp_gain: i64,
    pub hit_type: i64,
    pub animation_id: i64,
    pub damage: Damage,
    pub effects: Vec<Effect>,
    pub note: String,
}

impl Record for Item {
    const KIND: RecordKind = RecordKind::Item;

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
            icon_index: v.int("icon"),
            item_type: v.int("item_type"),
            price: v.int("price"),
            consumable: v.flag("consumable"),
            scope: v.int("scope"),
            occasion: v.int("occasion"),
            speed: v.int("speed"),
            success_rate: v.int("success_rate"),
            repeats: v.int("repeats"),
            tp_gain: v.int("tp_gain"),
            hit_type: v.int("hit_type"),
            animation_id: v.int("animation"),
            damage: Damage::from_validated(v),
            effects: Vec::new(),
            note: v.string("note"),
        }
    }

    any_record_conversions!(Item);
}

impl HasEffects for Item {
    fn effects(&self) -> &[Effect] {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut Vec<Effect> {
        &mut self.effects
    }
}
