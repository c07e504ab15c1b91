use crate::curves::ParamCurves;
use crate::kind::{RecordKind, TextField};
use crate::validate::ValidatedRecord;

use super::{Feature, HasFeatures, Record, Text, any_record_conversions};

/// A skill learned by a class when reaching `level`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Learning {
    pub level: i64,
    pub skill_id: i64,
    pub note: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Class {
    pub id: u32,
    pub name: Text,
    /// Base value, extra value, acceleration A, acceleration B.
    pub exp_params: Vec<i64>,
    pub params: ParamCurves,
    pub learnings: Vec<Learning>,
    pub features: Vec<Feature>,
    pub note: String,
}

impl Class {
    pub fn add_learning(&mut self, level: i64, skill_id: i64, note: impl Into<String>) {
        self.learnings.push(Learning {
            level,
            skill_id,
            note: note.into(),
        });
    }

    pub fn clear_learnings(&mut self) {
        self.learnings.clear();
    }
}

impl Record for Class {
    const KIND: RecordKind = RecordKind::Class;

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
            _ => None,
        }
    }

    fn from_validated(id: u32, v: &ValidatedRecord) -> Self {
        Self {
            id,
            name: v.text("name"),
            exp_params: v.ints("exp_curve"),
            params: v.curves("parameter_curves"),
            learnings: Vec::new(),
            features: Vec::new(),
            note: v.string("note"),
        }
    }

    any_record_conversions!(Class);
}

impl HasFeatures for Class {
    fn features(&self) -> &[Feature] {
        &self.features
    }

    fn features_mut(&mut self) -> &mut Vec<Feature> {
        &mut self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learnings_keep_insertion_order() {
        let mut class = Class::default();
        class.add_learning(1, 3, "");
        class.add_learning(10, 7, "<boss>");

        let skills: Vec<_> = class.learnings.iter().map(|l| l.skill_id).collect();
        assert_eq!(skills, [3, 7]);

        class.clear_learnings();
        assert!(class.learnings.is_empty());
    }
}
