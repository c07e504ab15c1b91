//! Use effects of skills and items.

/// Effect codes as stored by the engine.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "title_case")]
#[repr(u8)]
pub enum EffectCode {
    RecoverHp = 11,
    RecoverMp = 12,
    GainTp = 13,
    AddState = 21,
    RemoveState = 22,
    AddBuff = 31,
    AddDebuff = 32,
    RemoveBuff = 33,
    RemoveDebuff = 34,
    Special = 41,
    Grow = 42,
    LearnSkill = 43,
    CommonEvent = 44,
}

impl EffectCode {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub code: EffectCode,
    pub data_id: i64,
    pub value1: f64,
    pub value2: f64,
}

impl Effect {
    pub fn new(code: EffectCode, data_id: i64, value1: f64, value2: f64) -> Self {
        Self {
            code,
            data_id,
            value1,
            value2,
        }
    }
}

/// Effect builders for usable records.
pub trait HasEffects {
    fn effects(&self) -> &[Effect];

    fn effects_mut(&mut self) -> &mut Vec<Effect>;

    fn clear_effects(&mut self) {
        self.effects_mut().clear();
    }

    fn push_effect(&mut self, effect: Effect) {
        self.effects_mut().push(effect);
    }

    /// `rate` is a fraction of max HP, `amount` a flat value.
    fn add_recover_hp(&mut self, rate: f64, amount: f64) {
        self.push_effect(Effect::new(EffectCode::RecoverHp, 0, rate, amount));
    }

    fn add_recover_mp(&mut self, rate: f64, amount: f64) {
        self.push_effect(Effect::new(EffectCode::RecoverMp, 0, rate, amount));
    }

    fn add_gain_tp(&mut self, amount: f64) {
        self.push_effect(Effect::new(EffectCode::GainTp, 0, amount, 0.0));
    }

    /// `chance` in percent.
    fn add_state(&mut self, state_id: i64, chance: f64) {
        self.push_effect(Effect::new(EffectCode::AddState, state_id, chance / 100.0, 0.0));
    }

    fn remove_state(&mut self, state_id: i64, chance: f64) {
        self.push_effect(Effect::new(
            EffectCode::RemoveState,
            state_id,
            chance / 100.0,
            0.0,
        ));
    }

    fn add_buff(&mut self, param_id: i64, turns: f64) {
        self.push_effect(Effect::new(EffectCode::AddBuff, param_id, turns, 0.0));
    }

    fn add_debuff(&mut self, param_id: i64, turns: f64) {
        self.push_effect(Effect::new(EffectCode::AddDebuff, param_id, turns, 0.0));
    }

    fn remove_buff(&mut self, param_id: i64) {
        self.push_effect(Effect::new(EffectCode::RemoveBuff, param_id, 0.0, 0.0));
    }

    fn remove_debuff(&mut self, param_id: i64) {
        self.push_effect(Effect::new(EffectCode::RemoveDebuff, param_id, 0.0, 0.0));
    }

    fn add_special(&mut self, special_id: i64) {
        self.push_effect(Effect::new(EffectCode::Special, special_id, 0.0, 0.0));
    }

    fn add_grow(&mut self, param_id: i64, amount: f64) {
        self.push_effect(Effect::new(EffectCode::Grow, param_id, amount, 0.0));
    }

    fn learn_skill(&mut self, skill_id: i64) {
        self.push_effect(Effect::new(EffectCode::LearnSkill, skill_id, 0.0, 0.0));
    }

    fn trigger_common_event(&mut self, event_id: i64) {
        self.push_effect(Effect::new(EffectCode::CommonEvent, event_id, 0.0, 0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Item;

    #[test]
    fn state_chance_is_a_fraction() {
        let mut potion = Item::default();
        potion.add_recover_hp(0.0, 500.0);
        potion.remove_state(2, 100.0);

        assert_eq!(potion.effects()[1], Effect::new(EffectCode::RemoveState, 2, 1.0, 0.0));
        assert_eq!(EffectCode::RemoveState.code(), 22);

        potion.clear_effects();
        assert!(potion.effects().is_empty());
    }
}
