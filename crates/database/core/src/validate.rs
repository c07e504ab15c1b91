//! Attribute normalization and per-field validation.
//!
//! Building a record is split in two steps that never branch on the calling
//! form again once the first has run:
//!
//! 1. [`Attributes::normalize`] maps keyed or positional input onto the
//!    schema's field names.
//! 2. [`validate`] checks every field in schema order, resolves symbols and
//!    defaults, and collects deferred values.
//!
//! The result is a [`ValidatedRecord`] from which the record types are built.
//! Nothing is written anywhere until validation of every field succeeded.

use std::collections::HashMap;

use crate::curves::{CurveFormula, PARAM_COUNT, ParamCurves};
use crate::error::BuildError;
use crate::kind::{RecordKind, TextField};
use crate::records::Text;
use crate::schema::{FieldDefault, FieldKind, FieldSpec, RecordSchema};
use crate::symbols::{SymbolTables, TableKind};
use crate::value::{AttrInput, AttrValue, Deferred};

/// Attributes keyed by schema field name, independent of the calling form.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    values: HashMap<&'static str, AttrValue>,
}

impl Attributes {
    /// Maps `input` onto the fields of `schema`.
    ///
    /// Keyed input is read by field name first, then by each synonym in order;
    /// keys that match no field are ignored. Positional input is read in field
    /// order and fails with [`BuildError::ArgumentCount`] when it is longer than
    /// the schema. `Nil` values count as absent in both forms.
    pub fn normalize(schema: &RecordSchema, input: AttrInput) -> Result<Self, BuildError> {
        let mut values = HashMap::new();

        match input {
            AttrInput::Keyed(mut entries) => {
                for field in schema.fields() {
                    let found = field.keys().find_map(|key| {
                        entries
                            .iter()
                            .position(|(k, v)| k == key && !v.is_nil())
                    });
                    if let Some(index) = found {
                        let (_, value) = entries.swap_remove(index);
                        values.insert(field.name, value);
                    }
                }
            }
            AttrInput::Positional(args) => {
                if args.len() > schema.arity() {
                    return Err(BuildError::ArgumentCount {
                        kind: schema.kind(),
                        got: args.len(),
                        max: schema.arity(),
                    });
                }
                for (field, value) in schema.fields().iter().zip(args) {
                    if !value.is_nil() {
                        values.insert(field.name, value);
                    }
                }
            }
        }

        Ok(Self { values })
    }

    pub fn get(&self, field: &str) -> Option<&AttrValue> {
        self.values.get(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A fully validated field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(Text),
    Int(i64),
    Bool(bool),
    Ints(Vec<i64>),
    Curves(ParamCurves),
}

/// Output of [`validate`]: one concrete value per field plus pending computations.
#[derive(Clone, Debug)]
pub struct ValidatedRecord {
    kind: RecordKind,
    key: String,
    values: HashMap<&'static str, FieldValue>,
    deferred: Vec<(TextField, Deferred)>,
}

impl ValidatedRecord {
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Unique key the record is being built for.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Text value of `field`; empty when the field is not text.
    pub fn text(&self, field: &str) -> Text {
        match self.values.get(field) {
            Some(FieldValue::Text(text)) => text.clone(),
            _ => Text::default(),
        }
    }

    /// Literal string value of `field`; empty when the field is not text.
    pub fn string(&self, field: &str) -> String {
        match self.values.get(field) {
            Some(FieldValue::Text(Text::Literal(value))) => value.clone(),
            _ => String::new(),
        }
    }

    pub fn int(&self, field: &str) -> i64 {
        match self.values.get(field) {
            Some(FieldValue::Int(value)) => *value,
            _ => 0,
        }
    }

    pub fn flag(&self, field: &str) -> bool {
        matches!(self.values.get(field), Some(FieldValue::Bool(true)))
    }

    pub fn ints(&self, field: &str) -> Vec<i64> {
        match self.values.get(field) {
            Some(FieldValue::Ints(values)) => values.clone(),
            _ => Vec::new(),
        }
    }

    pub fn curves(&self, field: &str) -> ParamCurves {
        match self.values.get(field) {
            Some(FieldValue::Curves(curves)) => curves.clone(),
            _ => ParamCurves::default(),
        }
    }

    /// Deferred computations collected for this record, in schema order.
    pub fn deferred(&self) -> &[(TextField, Deferred)] {
        &self.deferred
    }
}

/// Validates normalized attributes against `schema`.
///
/// Fields are checked in schema order and the first failure aborts validation.
pub fn validate(
    schema: &RecordSchema,
    attributes: &Attributes,
    symbols: &SymbolTables,
    key: &str,
) -> Result<ValidatedRecord, BuildError> {
    let mut values = HashMap::with_capacity(schema.arity());
    let mut deferred = Vec::new();

    for field in schema.fields() {
        let value = match attributes.get(field.name) {
            None => default_value(field),
            Some(value) => check_field(field, value, symbols, key, &mut deferred)?,
        };
        values.insert(field.name, value);
    }

    Ok(ValidatedRecord {
        kind: schema.kind(),
        key: key.to_owned(),
        values,
        deferred,
    })
}

fn default_value(field: &FieldSpec) -> FieldValue {
    match field.default {
        FieldDefault::Text(text) => FieldValue::Text(Text::Literal(text.to_owned())),
        FieldDefault::Int(value) => FieldValue::Int(value),
        FieldDefault::Bool(value) => FieldValue::Bool(value),
        FieldDefault::Ints(values) => FieldValue::Ints(values.to_vec()),
        FieldDefault::Curves => FieldValue::Curves(ParamCurves::default()),
    }
}

fn type_mismatch(field: &FieldSpec, value: &AttrValue) -> BuildError {
    BuildError::TypeMismatch {
        field: field.name,
        expected: field.kind.expected(),
        found: value.type_name(),
    }
}

fn check_field(
    field: &FieldSpec,
    value: &AttrValue,
    symbols: &SymbolTables,
    key: &str,
    deferred: &mut Vec<(TextField, Deferred)>,
) -> Result<FieldValue, BuildError> {
    match (field.kind, value) {
        (FieldKind::Text | FieldKind::LazyText(_), AttrValue::Str(text)) => {
            Ok(FieldValue::Text(Text::Literal(text.clone())))
        }
        (FieldKind::LazyText(category), AttrValue::Lazy(compute)) => {
            deferred.push((category, compute.clone()));
            Ok(FieldValue::Text(Text::Pending {
                key: key.to_owned(),
            }))
        }
        (FieldKind::Int, AttrValue::Int(value)) => Ok(FieldValue::Int(*value)),
        (FieldKind::Bool, AttrValue::Bool(value)) => Ok(FieldValue::Bool(*value)),
        (FieldKind::Enum(table), value) => match value.as_enum_ref() {
            Some(reference) => symbols.resolve(table, &reference).map(FieldValue::Int),
            None => Err(type_mismatch(field, value)),
        },
        (FieldKind::IntArray(len), value) => int_array(field, value, len).map(FieldValue::Ints),
        (FieldKind::Params, AttrValue::Map(entries)) => {
            expand_params(field, entries, symbols).map(FieldValue::Ints)
        }
        (FieldKind::Params, value) => int_array(field, value, PARAM_COUNT).map(FieldValue::Ints),
        (FieldKind::Curves, AttrValue::Curves(curves)) => Ok(FieldValue::Curves(curves.clone())),
        (FieldKind::Curves, AttrValue::List(formulas)) => {
            curves_from_formulas(field, formulas).map(FieldValue::Curves)
        }
        (_, value) => Err(type_mismatch(field, value)),
    }
}

fn describe_shape(value: &AttrValue) -> String {
    match value {
        AttrValue::List(values) => {
            let types: Vec<_> = values.iter().map(AttrValue::type_name).collect();
            format!("an Array of {} [{}]", values.len(), types.join(", "))
        }
        other => other.type_name().to_owned(),
    }
}

fn int_array(field: &FieldSpec, value: &AttrValue, len: usize) -> Result<Vec<i64>, BuildError> {
    let shape_error = || BuildError::ShapeMismatch {
        field: field.name,
        expected: format!("an Array of {len} Integers"),
        found: describe_shape(value),
    };

    let AttrValue::List(values) = value else {
        return Err(shape_error());
    };
    if values.len() != len {
        return Err(shape_error());
    }
    values
        .iter()
        .map(|value| match value {
            AttrValue::Int(value) => Ok(*value),
            _ => Err(shape_error()),
        })
        .collect()
}

/// Expands `{ atk: 20, agi: -5 }` into the eight-slot parameter array.
fn expand_params(
    field: &FieldSpec,
    entries: &[(String, AttrValue)],
    symbols: &SymbolTables,
) -> Result<Vec<i64>, BuildError> {
    let mut params = vec![0; PARAM_COUNT];
    for (name, value) in entries {
        let index = symbols
            .table(TableKind::Param)
            .get(name)
            .and_then(|index| usize::try_from(index).ok())
            .filter(|index| *index < PARAM_COUNT)
            .ok_or_else(|| BuildError::UnknownSymbol {
                symbol: name.clone(),
                table: TableKind::Param,
            })?;
        params[index] = match value {
            AttrValue::Int(value) => *value,
            other => {
                return Err(BuildError::ShapeMismatch {
                    field: field.name,
                    expected: format!("Integer values in the parameter Hash (`{name}`)"),
                    found: other.type_name().to_owned(),
                });
            }
        };
    }
    Ok(params)
}

fn curves_from_formulas(
    field: &FieldSpec,
    formulas: &[AttrValue],
) -> Result<ParamCurves, BuildError> {
    if formulas.len() != PARAM_COUNT {
        return Err(BuildError::ShapeMismatch {
            field: field.name,
            expected: format!("an Array of {PARAM_COUNT} formulas"),
            found: format!("an Array of {}", formulas.len()),
        });
    }

    let mut parsed = CurveFormula::default_set();
    for (slot, value) in parsed.iter_mut().zip(formulas) {
        let AttrValue::Str(source) = value else {
            return Err(BuildError::ShapeMismatch {
                field: field.name,
                expected: format!("an Array of {PARAM_COUNT} formula Strings"),
                found: format!("an element of type {}", value.type_name()),
            });
        };
        *slot = source.parse().map_err(|e: crate::curves::CurveError| {
            BuildError::InvalidFormula {
                field: field.name,
                formula: source.clone(),
                reason: e.to_string(),
            }
        })?;
    }

    ParamCurves::from_formulas(&parsed).map_err(|e| BuildError::InvalidFormula {
        field: field.name,
        formula: String::from("<curve table>"),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(kind: RecordKind, input: AttrInput) -> Result<ValidatedRecord, BuildError> {
        let schema = RecordSchema::for_kind(kind);
        let attributes = Attributes::normalize(&schema, input)?;
        validate(&schema, &attributes, &SymbolTables::builtin(), "test:key")
    }

    #[test]
    fn absent_fields_take_defaults() {
        let record = build(RecordKind::Item, AttrInput::default()).unwrap();

        assert_eq!(record.text("name"), Text::Literal("Item".into()));
        assert_eq!(record.int("scope"), 7);
        assert!(record.flag("consumable"));
        assert_eq!(record.string("formula"), "0");
        assert!(record.deferred().is_empty());
    }

    #[test]
    fn synonyms_are_read_in_keyed_form() {
        let record = build(
            RecordKind::Weapon,
            AttrInput::keyed([
                ("desc", "Sharp".into()),
                ("wtype", AttrValue::Int(2)),
                ("icon_index", AttrValue::Int(14)),
                ("bogus", AttrValue::Int(1)),
            ]),
        )
        .unwrap();

        assert_eq!(record.string("description"), "Sharp");
        assert_eq!(record.int("weapon_type"), 2);
        assert_eq!(record.int("icon"), 14);
    }

    #[test]
    fn field_name_wins_over_synonym() {
        let record = build(
            RecordKind::Actor,
            AttrInput::keyed([("class_id", 3.into()), ("class", 5.into())]),
        )
        .unwrap();
        assert_eq!(record.int("class"), 5);
    }

    #[test]
    fn positional_values_follow_field_order() {
        let record = build(
            RecordKind::Armor,
            AttrInput::positional([
                "Cap".into(),
                AttrValue::Nil,
                AttrValue::Int(1),
                AttrValue::symbol("head"),
            ]),
        )
        .unwrap();

        assert_eq!(record.string("name"), "Cap");
        assert_eq!(record.string("description"), "");
        assert_eq!(record.int("armor_type"), 1);
        assert_eq!(record.int("equip_type"), 2);
    }

    #[test]
    fn too_many_positional_values_fail() {
        let err = build(
            RecordKind::Class,
            AttrInput::positional(std::iter::repeat_n(AttrValue::Nil, 5)),
        )
        .unwrap_err();

        assert_eq!(
            err,
            BuildError::ArgumentCount {
                kind: RecordKind::Class,
                got: 5,
                max: 4,
            }
        );
    }

    #[test]
    fn wrong_text_type_names_field_and_type() {
        let err = build(RecordKind::Skill, AttrInput::keyed([("name", 42.into())])).unwrap_err();

        assert_eq!(
            err,
            BuildError::TypeMismatch {
                field: "name",
                expected: "a String or Proc",
                found: "Integer",
            }
        );
    }

    #[test]
    fn lazy_values_only_for_lazy_fields() {
        let record = build(
            RecordKind::Skill,
            AttrInput::keyed([
                ("name", AttrValue::lazy(|| "Fire".into())),
                ("message2", AttrValue::lazy(|| "burns!".into())),
            ]),
        )
        .unwrap();

        assert_eq!(
            record.text("name"),
            Text::Pending {
                key: "test:key".into()
            }
        );
        let categories: Vec<_> = record.deferred().iter().map(|(c, _)| *c).collect();
        assert_eq!(categories, [TextField::Name, TextField::Message2]);

        let err = build(
            RecordKind::Skill,
            AttrInput::keyed([("note", AttrValue::lazy(String::new))]),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::TypeMismatch { field: "note", found: "Proc", .. }));
    }

    #[test]
    fn enum_symbols_match_raw_codes() {
        let by_symbol = build(
            RecordKind::Skill,
            AttrInput::keyed([("scope", AttrValue::symbol("all_enemies"))]),
        )
        .unwrap();
        let by_code = build(RecordKind::Skill, AttrInput::keyed([("scope", 2.into())])).unwrap();

        assert_eq!(by_symbol.int("scope"), by_code.int("scope"));
    }

    #[test]
    fn unknown_symbol_names_table() {
        let err = build(
            RecordKind::Item,
            AttrInput::keyed([("occasion", AttrValue::symbol("sometimes"))]),
        )
        .unwrap_err();

        assert_eq!(
            err,
            BuildError::UnknownSymbol {
                symbol: "sometimes".into(),
                table: TableKind::Occasion,
            }
        );
    }

    #[test]
    fn enum_rejects_strings() {
        let err = build(
            RecordKind::Item,
            AttrInput::keyed([("scope", "all_enemies".into())]),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::TypeMismatch { field: "scope", found: "String", .. }));
    }

    #[test]
    fn parameter_map_expands_by_index() {
        let record = build(
            RecordKind::Weapon,
            AttrInput::keyed([(
                "parameters",
                AttrValue::map([("atk", 20.into()), ("agi", (-5).into())]),
            )]),
        )
        .unwrap();

        assert_eq!(record.ints("parameters"), [0, 0, 20, 0, 0, 0, -5, 0]);
    }

    #[test]
    fn parameter_map_rejects_unknown_names_and_values() {
        let unknown = build(
            RecordKind::Armor,
            AttrInput::keyed([("params", AttrValue::map([("str", 1.into())]))]),
        )
        .unwrap_err();
        assert!(matches!(unknown, BuildError::UnknownSymbol { table: TableKind::Param, .. }));

        let bad_value = build(
            RecordKind::Armor,
            AttrInput::keyed([("params", AttrValue::map([("def", "high".into())]))]),
        )
        .unwrap_err();
        assert!(matches!(bad_value, BuildError::ShapeMismatch { field: "parameters", .. }));
    }

    #[test]
    fn fixed_arrays_check_length_and_elements() {
        let short = build(
            RecordKind::Actor,
            AttrInput::keyed([("equips", vec![1, 2, 3].into())]),
        )
        .unwrap_err();
        assert!(matches!(short, BuildError::ShapeMismatch { field: "equips", .. }));

        let mixed = build(
            RecordKind::Class,
            AttrInput::keyed([(
                "exp_curve",
                AttrValue::list([1.into(), 2.into(), "3".into(), 4.into()]),
            )]),
        )
        .unwrap_err();
        assert!(matches!(mixed, BuildError::ShapeMismatch { field: "exp_curve", .. }));

        let ok = build(
            RecordKind::Actor,
            AttrInput::keyed([("equips", vec![1, 0, 0, 0, 2].into())]),
        )
        .unwrap();
        assert_eq!(ok.ints("equips"), [1, 0, 0, 0, 2]);
    }

    #[test]
    fn booleans_reject_other_types() {
        let err = build(RecordKind::Item, AttrInput::keyed([("consume", 1.into())])).unwrap_err();
        assert!(matches!(err, BuildError::TypeMismatch { field: "consumable", .. }));

        let record = build(RecordKind::Item, AttrInput::keyed([("consumable", false.into())])).unwrap();
        assert!(!record.flag("consumable"));
    }

    #[test]
    fn class_curves_accept_formula_strings() {
        let formulas: Vec<AttrValue> = std::iter::repeat_n("10+lvl*2", 8).map(Into::into).collect();
        let record = build(
            RecordKind::Class,
            AttrInput::keyed([("params", AttrValue::List(formulas))]),
        )
        .unwrap();
        assert_eq!(record.curves("parameter_curves").get(3, 5), Some(20));

        let err = build(
            RecordKind::Class,
            AttrInput::keyed([(
                "parameter_curves",
                AttrValue::list(std::iter::repeat_n(AttrValue::from("lvl**2"), 8)),
            )]),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::InvalidFormula { .. }));
    }
}
