//! Database record types.
//!
//! Records are plain data: they are produced from a [`ValidatedRecord`] once
//! validation succeeded and are never partially built. Text fields that were
//! given a deferred computation hold [`Text::Pending`] until the finalization
//! pass replaces them.

/// Wires a record type into [`Record`]'s `AnyRecord` conversions.
macro_rules! any_record_conversions {
    ($variant:ident) => {
        fn into_any(self) -> $crate::records::AnyRecord {
            $crate::records::AnyRecord::$variant(self)
        }

        fn from_any(record: $crate::records::AnyRecord) -> Option<Self> {
            match record {
                $crate::records::AnyRecord::$variant(inner) => Some(inner),
                _ => None,
            }
        }
    };
}

pub(crate) use any_record_conversions;

mod actor;
mod armor;
mod class;
mod effect;
mod feature;
mod item;
mod skill;
mod weapon;

pub use actor::Actor;
pub use armor::Armor;
pub use class::{Class, Learning};
pub use effect::{Effect, EffectCode, HasEffects};
pub use feature::{Feature, FeatureCode, HasFeatures};
pub use item::Item;
pub use skill::{Damage, Skill};
pub use weapon::Weapon;

use core::fmt;

use crate::kind::{RecordKind, TextField};
use crate::validate::ValidatedRecord;

/// Value of a text field that may still be waiting for its deferred computation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Text {
    Literal(String),
    /// Filled in during finalization from the computation registered under `key`.
    Pending { key: String },
}

impl Text {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// The literal value; pending text reads as empty.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(value) => value,
            Self::Pending { .. } => "",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn pending_key(&self) -> Option<&str> {
        match self {
            Self::Pending { key } => Some(key),
            Self::Literal(_) => None,
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::Literal(String::new())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

/// Behaviour shared by all record types.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    const KIND: RecordKind;

    fn id(&self) -> u32;

    fn name(&self) -> &Text;

    fn note(&self) -> &str;

    /// Mutable access to a deferred-capable text field, `None` when this kind
    /// has no such field.
    fn text_mut(&mut self, field: TextField) -> Option<&mut Text>;

    /// Builds the record at `id` from validated attributes.
    fn from_validated(id: u32, record: &ValidatedRecord) -> Self;

    fn into_any(self) -> AnyRecord;

    fn from_any(record: AnyRecord) -> Option<Self>;
}

/// A record of any kind, as handed to creation hook listeners.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AnyRecord {
    Actor(Actor),
    Class(Class),
    Skill(Skill),
    Item(Item),
    Weapon(Weapon),
    Armor(Armor),
}

impl AnyRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Actor(_) => RecordKind::Actor,
            Self::Class(_) => RecordKind::Class,
            Self::Skill(_) => RecordKind::Skill,
            Self::Item(_) => RecordKind::Item,
            Self::Weapon(_) => RecordKind::Weapon,
            Self::Armor(_) => RecordKind::Armor,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Self::Actor(r) => r.id,
            Self::Class(r) => r.id,
            Self::Skill(r) => r.id,
            Self::Item(r) => r.id,
            Self::Weapon(r) => r.id,
            Self::Armor(r) => r.id,
        }
    }

    pub fn name(&self) -> &Text {
        match self {
            Self::Actor(r) => &r.name,
            Self::Class(r) => &r.name,
            Self::Skill(r) => &r.name,
            Self::Item(r) => &r.name,
            Self::Weapon(r) => &r.name,
            Self::Armor(r) => &r.name,
        }
    }

    pub fn name_mut(&mut self) -> &mut Text {
        match self {
            Self::Actor(r) => &mut r.name,
            Self::Class(r) => &mut r.name,
            Self::Skill(r) => &mut r.name,
            Self::Item(r) => &mut r.name,
            Self::Weapon(r) => &mut r.name,
            Self::Armor(r) => &mut r.name,
        }
    }
}
