//! Traits (features) attached to actors, classes, weapons and armors.

use crate::error::BuildError;
use crate::symbols::{EnumRef, SymbolTables, TableKind};

/// Feature codes as stored by the engine.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "title_case")]
#[repr(u8)]
pub enum FeatureCode {
    ElementRate = 11,
    DebuffRate = 12,
    StateRate = 13,
    StateResist = 14,
    Param = 21,
    ExParam = 22,
    SpParam = 23,
    AttackElement = 31,
    AttackState = 32,
    AttackSpeed = 33,
    AttackTimes = 34,
    AddSkillType = 41,
    SealSkillType = 42,
    AddSkill = 43,
    SealSkill = 44,
    EquipWeapon = 51,
    EquipArmor = 52,
    FixEquip = 53,
    SealEquip = 54,
    SlotType = 55,
    ActionPlus = 61,
    SpecialFlag = 62,
    CollapseEffect = 63,
    PartyAbility = 64,
}

impl FeatureCode {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// One feature entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feature {
    pub code: FeatureCode,
    pub data_id: i64,
    pub value: f64,
}

impl Feature {
    pub fn new(code: FeatureCode, data_id: i64, value: f64) -> Self {
        Self {
            code,
            data_id,
            value,
        }
    }
}

fn percent(value: f64) -> f64 {
    value / 100.0
}

/// Feature builders for records that carry a feature list.
///
/// Ids given by name are resolved through `symbols` and fail with
/// [`BuildError::UnknownSymbol`] when the name is missing. Rates are given in
/// percent and stored as fractions.
pub trait HasFeatures {
    fn features(&self) -> &[Feature];

    fn features_mut(&mut self) -> &mut Vec<Feature>;

    fn clear_features(&mut self) {
        self.features_mut().clear();
    }

    fn push_feature(&mut self, feature: Feature) {
        self.features_mut().push(feature);
    }

    // Rate

    fn add_element_rate(
        &mut self,
        symbols: &SymbolTables,
        element: impl Into<EnumRef>,
        rate: f64,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::Element, &element.into())?;
        self.push_feature(Feature::new(FeatureCode::ElementRate, id, percent(rate)));
        Ok(())
    }

    fn add_debuff_rate(
        &mut self,
        symbols: &SymbolTables,
        param: impl Into<EnumRef>,
        rate: f64,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::Param, &param.into())?;
        self.push_feature(Feature::new(FeatureCode::DebuffRate, id, percent(rate)));
        Ok(())
    }

    fn add_state_rate(&mut self, state_id: i64, rate: f64) {
        self.push_feature(Feature::new(FeatureCode::StateRate, state_id, percent(rate)));
    }

    fn add_state_resist(&mut self, state_id: i64) {
        self.push_feature(Feature::new(FeatureCode::StateResist, state_id, 0.0));
    }

    // Parameter

    fn add_parameter(
        &mut self,
        symbols: &SymbolTables,
        param: impl Into<EnumRef>,
        rate: f64,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::Param, &param.into())?;
        self.push_feature(Feature::new(FeatureCode::Param, id, percent(rate)));
        Ok(())
    }

    fn add_ex_parameter(
        &mut self,
        symbols: &SymbolTables,
        param: impl Into<EnumRef>,
        rate: f64,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::ExParam, &param.into())?;
        self.push_feature(Feature::new(FeatureCode::ExParam, id, percent(rate)));
        Ok(())
    }

    fn add_sp_parameter(
        &mut self,
        symbols: &SymbolTables,
        param: impl Into<EnumRef>,
        rate: f64,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::SpParam, &param.into())?;
        self.push_feature(Feature::new(FeatureCode::SpParam, id, percent(rate)));
        Ok(())
    }

    // Attack

    fn add_attack_element(
        &mut self,
        symbols: &SymbolTables,
        element: impl Into<EnumRef>,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::Element, &element.into())?;
        self.push_feature(Feature::new(FeatureCode::AttackElement, id, 0.0));
        Ok(())
    }

    fn add_attack_state(&mut self, state_id: i64, chance: f64) {
        self.push_feature(Feature::new(FeatureCode::AttackState, state_id, percent(chance)));
    }

    fn add_attack_speed(&mut self, amount: f64) {
        self.push_feature(Feature::new(FeatureCode::AttackSpeed, 0, amount));
    }

    fn add_attack_times(&mut self, amount: f64) {
        self.push_feature(Feature::new(FeatureCode::AttackTimes, 0, amount));
    }

    // Skill

    fn add_skill_type(
        &mut self,
        symbols: &SymbolTables,
        skill_type: impl Into<EnumRef>,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::SkillType, &skill_type.into())?;
        self.push_feature(Feature::new(FeatureCode::AddSkillType, id, 0.0));
        Ok(())
    }

    fn seal_skill_type(
        &mut self,
        symbols: &SymbolTables,
        skill_type: impl Into<EnumRef>,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::SkillType, &skill_type.into())?;
        self.push_feature(Feature::new(FeatureCode::SealSkillType, id, 0.0));
        Ok(())
    }

    fn add_skill(&mut self, skill_id: i64) {
        self.push_feature(Feature::new(FeatureCode::AddSkill, skill_id, 0.0));
    }

    fn seal_skill(&mut self, skill_id: i64) {
        self.push_feature(Feature::new(FeatureCode::SealSkill, skill_id, 0.0));
    }

    // Equip

    fn add_equip_weapon(
        &mut self,
        symbols: &SymbolTables,
        weapon_type: impl Into<EnumRef>,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::WeaponType, &weapon_type.into())?;
        self.push_feature(Feature::new(FeatureCode::EquipWeapon, id, 0.0));
        Ok(())
    }

    fn add_equip_armor(
        &mut self,
        symbols: &SymbolTables,
        armor_type: impl Into<EnumRef>,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::ArmorType, &armor_type.into())?;
        self.push_feature(Feature::new(FeatureCode::EquipArmor, id, 0.0));
        Ok(())
    }

    fn fix_equip(
        &mut self,
        symbols: &SymbolTables,
        equip_type: impl Into<EnumRef>,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::EquipType, &equip_type.into())?;
        self.push_feature(Feature::new(FeatureCode::FixEquip, id, 0.0));
        Ok(())
    }

    fn seal_equip(
        &mut self,
        symbols: &SymbolTables,
        equip_type: impl Into<EnumRef>,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::EquipType, &equip_type.into())?;
        self.push_feature(Feature::new(FeatureCode::SealEquip, id, 0.0));
        Ok(())
    }

    /// 0 is a normal slot layout, 1 is dual wield.
    fn set_slot_type(&mut self, slot_type: i64) {
        self.push_feature(Feature::new(FeatureCode::SlotType, slot_type, 0.0));
    }

    // Other

    fn add_action_times(&mut self, chance: f64) {
        self.push_feature(Feature::new(FeatureCode::ActionPlus, 0, percent(chance)));
    }

    fn add_special_flag(
        &mut self,
        symbols: &SymbolTables,
        flag: impl Into<EnumRef>,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::SpecialFlag, &flag.into())?;
        self.push_feature(Feature::new(FeatureCode::SpecialFlag, id, 0.0));
        Ok(())
    }

    fn add_collapse_effect(
        &mut self,
        symbols: &SymbolTables,
        effect: impl Into<EnumRef>,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::CollapseEffect, &effect.into())?;
        self.push_feature(Feature::new(FeatureCode::CollapseEffect, id, 0.0));
        Ok(())
    }

    fn add_party_ability(
        &mut self,
        symbols: &SymbolTables,
        ability: impl Into<EnumRef>,
    ) -> Result<(), BuildError> {
        let id = symbols.resolve(TableKind::PartyAbility, &ability.into())?;
        self.push_feature(Feature::new(FeatureCode::PartyAbility, id, 0.0));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Weapon;

    #[test]
    fn rates_are_stored_as_fractions() {
        let symbols = SymbolTables::builtin();
        let mut weapon = Weapon::default();

        weapon.add_parameter(&symbols, "atk", 150.0).unwrap();
        weapon.add_state_rate(4, 50.0);
        weapon.add_attack_times(1.0);

        assert_eq!(
            weapon.features(),
            &[
                Feature::new(FeatureCode::Param, 2, 1.5),
                Feature::new(FeatureCode::StateRate, 4, 0.5),
                Feature::new(FeatureCode::AttackTimes, 0, 1.0),
            ]
        );
    }

    #[test]
    fn unknown_names_leave_features_untouched() {
        let symbols = SymbolTables::builtin();
        let mut weapon = Weapon::default();

        let err = weapon.add_element_rate(&symbols, "fire", 200.0).unwrap_err();

        assert!(matches!(err, BuildError::UnknownSymbol { table: TableKind::Element, .. }));
        assert!(weapon.features().is_empty());
    }

    #[test]
    fn misspelled_party_ability_aliases_still_resolve() {
        let symbols = SymbolTables::builtin();
        let mut weapon = Weapon::default();

        weapon.add_party_ability(&symbols, "cancel_suprise").unwrap();
        weapon.add_party_ability(&symbols, "cancel_surprise").unwrap();
        assert_eq!(weapon.features()[0], weapon.features()[1]);

        weapon.clear_features();
        assert!(weapon.features().is_empty());
    }
}
