//! Human-readable record dumps.
//!
//! Each dump is a sequence of `-- Section --` headers followed by values.
//! Enum codes are printed next to their symbol name when the symbol tables
//! know one.

use std::fmt::Write;

use database_core::{
    Actor, Armor, Class, Damage, Effect, Feature, Item, PARAM_COUNT, Skill, TableKind, Weapon,
};

use super::Database;
use crate::collection::Stored;

/// Records that can be dumped as text.
pub trait Describe: Stored {
    fn describe(&self, db: &Database) -> String;
}

impl Database {
    /// Text dump of the record at `id`.
    pub fn describe<R: Describe>(&self, id: u32) -> Option<String> {
        self.get::<R>(id).map(|record| record.describe(self))
    }

    fn symbol_name(&self, table: TableKind, code: i64) -> &str {
        match code {
            0 if matches!(
                table,
                TableKind::Element
                    | TableKind::SkillType
                    | TableKind::WeaponType
                    | TableKind::ArmorType
            ) =>
            {
                "None"
            }
            _ => self.symbols.name_of(table, code).unwrap_or("unknown"),
        }
    }
}

struct Sheet<'a> {
    db: &'a Database,
    out: String,
}

impl<'a> Sheet<'a> {
    fn new(db: &'a Database) -> Self {
        Self {
            db,
            out: String::new(),
        }
    }

    fn section(&mut self, title: &str) -> &mut Self {
        let _ = write!(self.out, "\n-- {title} --");
        self
    }

    fn line(&mut self, value: impl std::fmt::Display) -> &mut Self {
        let _ = write!(self.out, "\n{value}");
        self
    }

    fn field(&mut self, title: &str, value: impl std::fmt::Display) -> &mut Self {
        self.section(title).line(value)
    }

    fn symbol(&mut self, title: &str, table: TableKind, code: i64) -> &mut Self {
        let db = self.db;
        let name = db.symbol_name(table, code);
        self.field(title, format_args!("{code} ({name})"))
    }

    fn params(&mut self, values: &[i64]) -> &mut Self {
        let db = self.db;
        self.section("Parameters");
        for (param, value) in values.iter().enumerate().take(PARAM_COUNT) {
            let name = db.symbol_name(TableKind::Param, param as i64);
            self.line(format_args!("{name}: {value}"));
        }
        self
    }

    fn features(&mut self, features: &[Feature]) -> &mut Self {
        self.section("Features");
        if features.is_empty() {
            return self.line("None");
        }
        for feature in features {
            self.line(format_args!(
                "{}: {}, {}",
                feature.code, feature.data_id, feature.value
            ));
        }
        self
    }

    fn effects(&mut self, effects: &[Effect]) -> &mut Self {
        self.section("Effects");
        if effects.is_empty() {
            return self.line("None");
        }
        for effect in effects {
            self.line(format_args!(
                "{}: {}, {}, {}",
                effect.code, effect.data_id, effect.value1, effect.value2
            ));
        }
        self
    }

    fn damage(&mut self, damage: &Damage) -> &mut Self {
        self.symbol("Damage type", TableKind::DamageType, damage.damage_type)
            .symbol("Damage element", TableKind::Element, damage.element_id)
            .field("Damage formula", &damage.formula)
            .field("Damage variance", damage.variance)
            .field("Damage critical", damage.critical)
    }

    fn finish(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

impl Describe for Actor {
    fn describe(&self, db: &Database) -> String {
        let class_name = u32::try_from(self.class_id)
            .ok()
            .and_then(|id| db.get::<Class>(id))
            .map_or("", |class| class.name.as_str());

        Sheet::new(db)
            .field("ID", self.id)
            .field("Name", &self.name)
            .field("Nickname", &self.nickname)
            .field("Class", format_args!("{} ({class_name})", self.class_id))
            .field("Initial level", self.initial_level)
            .field("Max level", self.max_level)
            .field("Description", &self.description)
            .field(
                "Character",
                format_args!("index: {}\nname: {}", self.character_index, self.character_name),
            )
            .field(
                "Face",
                format_args!("index: {}\nname: {}", self.face_index, self.face_name),
            )
            .field("Starting equipment", format_args!("{:?}", self.equips))
            .features(&self.features)
            .field("Notes", &self.note)
            .finish()
    }
}

const EXP_CURVE_NAMES: [&str; 4] = ["Base value", "Extra value", "Acceleration A", "Acceleration B"];

impl Describe for Class {
    fn describe(&self, db: &Database) -> String {
        let mut sheet = Sheet::new(db);
        sheet.field("ID", self.id).field("Name", &self.name);

        sheet.section("EXP curve");
        for (index, value) in self.exp_params.iter().enumerate() {
            let name = EXP_CURVE_NAMES.get(index).copied().unwrap_or("Unknown curve value");
            sheet.line(format_args!("{name}: {value}"));
        }

        sheet.section("Parameter curve");
        for param in 0..PARAM_COUNT {
            let name = db.symbol_name(TableKind::Param, param as i64);
            let at = |level| self.params.get(param, level).unwrap_or_default();
            sheet.line(format_args!(
                "{name}: Lv 1: {}, Lv 50: {}, Lv 99: {}",
                at(1),
                at(50),
                at(99)
            ));
        }

        sheet.section("Skill learnings");
        for learning in &self.learnings {
            let skill_name = u32::try_from(learning.skill_id)
                .ok()
                .and_then(|id| db.get::<Skill>(id))
                .map_or("", |skill| skill.name.as_str());
            sheet.line(format_args!(
                "Level: {}, skill: {} ({skill_name}), note: {}",
                learning.level, learning.skill_id, learning.note
            ));
        }

        sheet
            .features(&self.features)
            .field("Notes", &self.note)
            .finish()
    }
}

impl Describe for Skill {
    fn describe(&self, db: &Database) -> String {
        Sheet::new(db)
            .field("ID", self.id)
            .field("Name", &self.name)
            .field("Icon index", self.icon_index)
            .field("Description", &self.description)
            .symbol("Skill type", TableKind::SkillType, self.skill_type)
            .field(
                "Cost",
                format_args!("MP: {}\nTP: {}", self.mp_cost, self.tp_cost),
            )
            .symbol("Scope", TableKind::Scope, self.scope)
            .symbol("Occasion", TableKind::Occasion, self.occasion)
            .field("Speed", self.speed)
            .field("Success rate", format_args!("{}%", self.success_rate))
            .field("Repeats", self.repeats)
            .field("TP gain", self.tp_gain)
            .symbol("Hit type", TableKind::HitType, self.hit_type)
            .field("Animation", self.animation_id)
            .field(
                "Use message",
                format_args!(
                    "Message 1: \"(User Name){}\"\nMessage 2: \"{}\"",
                    self.message1, self.message2
                ),
            )
            .symbol(
                "Required weapon type 1",
                TableKind::WeaponType,
                self.required_weapon_type1,
            )
            .symbol(
                "Required weapon type 2",
                TableKind::WeaponType,
                self.required_weapon_type2,
            )
            .damage(&self.damage)
            .effects(&self.effects)
            .field("Notes", &self.note)
            .finish()
    }
}

impl Describe for Item {
    fn describe(&self, db: &Database) -> String {
        Sheet::new(db)
            .field("ID", self.id)
            .field("Name", &self.name)
            .field("Icon index", self.icon_index)
            .field("Description", &self.description)
            .symbol("Item type", TableKind::ItemType, self.item_type)
            .field("Price", self.price)
            .field("Consume", self.consumable)
            .symbol("Scope", TableKind::Scope, self.scope)
            .symbol("Occasion", TableKind::Occasion, self.occasion)
            .field("Speed", self.speed)
            .field("Success rate", format_args!("{}%", self.success_rate))
            .field("Repeats", self.repeats)
            .field("TP gain", self.tp_gain)
            .symbol("Hit type", TableKind::HitType, self.hit_type)
            .field("Animation", self.animation_id)
            .damage(&self.damage)
            .effects(&self.effects)
            .field("Notes", &self.note)
            .finish()
    }
}

impl Describe for Weapon {
    fn describe(&self, db: &Database) -> String {
        Sheet::new(db)
            .field("ID", self.id)
            .field("Name", &self.name)
            .field("Icon index", self.icon_index)
            .field("Description", &self.description)
            .symbol("Weapon type", TableKind::WeaponType, self.weapon_type)
            .params(&self.params)
            .features(&self.features)
            .field("Animation ID", self.animation_id)
            .field("Price", self.price)
            .field("Notes", &self.note)
            .finish()
    }
}

impl Describe for Armor {
    fn describe(&self, db: &Database) -> String {
        Sheet::new(db)
            .field("ID", self.id)
            .field("Name", &self.name)
            .field("Icon index", self.icon_index)
            .field("Description", &self.description)
            .symbol("Armor type", TableKind::ArmorType, self.armor_type)
            .symbol("Equip type", TableKind::EquipType, self.equip_type)
            .params(&self.params)
            .features(&self.features)
            .field("Price", self.price)
            .field("Notes", &self.note)
            .finish()
    }
}
