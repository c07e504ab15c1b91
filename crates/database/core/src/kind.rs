//! Record kinds and the text field categories that accept deferred values.

/// The six kinds of database records the builder can create.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RecordKind {
    Actor,
    Class,
    Skill,
    Item,
    Weapon,
    Armor,
}

impl RecordKind {
    /// All kinds in finalization order.
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Actor,
        RecordKind::Class,
        RecordKind::Skill,
        RecordKind::Item,
        RecordKind::Weapon,
        RecordKind::Armor,
    ];

    /// Name of the collection records of this kind are written into.
    pub const fn collection_name(self) -> &'static str {
        match self {
            Self::Actor => "data_actors",
            Self::Class => "data_classes",
            Self::Skill => "data_skills",
            Self::Item => "data_items",
            Self::Weapon => "data_weapons",
            Self::Armor => "data_armors",
        }
    }

    /// Hook event fired after a record of this kind has been materialized.
    pub const fn created_event(self) -> &'static str {
        match self {
            Self::Actor => "on_actor_created",
            Self::Class => "on_class_created",
            Self::Skill => "on_skill_created",
            Self::Item => "on_item_created",
            Self::Weapon => "on_weapon_created",
            Self::Armor => "on_armor_created",
        }
    }

    /// File name of the persistent key store for this kind.
    pub fn key_file_name(self) -> String {
        format!("{}_keys.dat", self.as_ref())
    }

    /// Text fields of this kind that may hold a deferred value, in resolution order.
    pub const fn deferred_fields(self) -> &'static [TextField] {
        match self {
            Self::Actor => &[TextField::Name, TextField::Description, TextField::Nickname],
            Self::Class => &[TextField::Name],
            Self::Skill => &[
                TextField::Name,
                TextField::Description,
                TextField::Message1,
                TextField::Message2,
            ],
            Self::Item | Self::Weapon | Self::Armor => &[TextField::Name, TextField::Description],
        }
    }
}

/// Categories of text fields that can be filled by a deferred computation.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TextField {
    Name,
    Description,
    Nickname,
    Message1,
    Message2,
}

impl TextField {
    /// Schema field name this category is stored under.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Nickname => "nickname",
            Self::Message1 => "message1",
            Self::Message2 => "message2",
        }
    }
}
