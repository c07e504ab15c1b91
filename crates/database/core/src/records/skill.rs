use crate::kind::{RecordKind, TextField};
use crate::validate::ValidatedRecord;

use super::{Effect, HasEffects, Record, Text, any_record_conversions};

/// Damage settings shared by skills and items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Damage {
    pub damage_type: i64,
    pub element_id: i64,
    pub formula: String,
    pub variance: i64,
    pub critical: bool,
}

impl Damage {
    pub(crate) fn from_validated(v: &ValidatedRecord) -> Self {
        Self {
            damage_type: v.int("damage_type"),
            element_id: v.int("damage_element"),
            formula: v.string("formula"),
            variance: v.int("variance"),
            critical: v.flag("critical"),
        }
    }
}

impl Default for Damage {
    fn default() -> Self {
        Self {
            damage_type: 0,
            element_id: 0,
            formula: String::from("0"),
            variance: 20,
            critical: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: u32,
    pub name: Text,
    pub description: Text,
    pub icon_index: i64,
    pub skill_type: i64,
    pub mp_cost: i64,
    pub tp_cost: i64,
    pub scope: i64,
    pub occasion: i64,
    pub speed: i64,
    pub success_rate: i64,
    pub repeats: i64,
    pub tp_gain: i64,
    pub hit_type: i64,
    pub animation_id: i64,
    /// Shown after the user's name when the skill is used.
    pub message1: Text,
    pub message2: Text,
    pub required_weapon_type1: i64,
    pub required_weapon_type2: i64,
    pub damage: Damage,
    pub effects: Vec<Effect>,
    pub note: String,
}

impl Record for Skill {
    const KIND: RecordKind = RecordKind::Skill;

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
            TextField::Message1 => Some(&mut self.message1),
            TextField::Message2 => Some(&mut self.message2),
            TextField::Nickname => None,
        }
    }

    fn from_validated(id: u32, v: &ValidatedRecord) -> Self {
        Self {
            id,
            name: v.text("name"),
            description: v.text("description"),
            icon_index: v.int("icon"),
            skill_type: v.int("skill_type"),
            mp_cost: v.int("mp_cost"),
            tp_cost: v.int("tp_cost"),
            scope: v.int("scope"),
            occasion: v.int("occasion"),
            speed: v.int("speed"),
            success_rate: v.int("success_rate"),
            repeats: v.int("repeats"),
            tp_gain: v.int("tp_gain"),
            hit_type: v.int("hit_type"),
            animation_id: v.int("animation"),
            message1: v.text("message1"),
            message2: v.text("message2"),
            required_weapon_type1: v.int("required_weapon_type1"),
            required_weapon_type2: v.int("required_weapon_type2"),
            damage: Damage::from_validated(v),
            effects: Vec::new(),
            note: v.string("note"),
        }
    }

    any_record_conversions!(Skill);
}

impl HasEffects for Skill {
    fn effects(&self) -> &[Effect] {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut Vec<Effect> {
        &mut self.effects
    }
}
