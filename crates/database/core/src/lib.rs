//! Record schemas, validation and record types for game database mods.
//!
//! `database-core` turns loosely typed attributes (keyed or positional) into
//! fully validated records. It knows the field layout of every record kind, the
//! symbol tables used by enum fields and the rules each field is checked
//! against. It performs no I/O: ID allocation, persistence and hook dispatch
//! live in `runtime`, which drives [`validate::validate`] and builds records
//! through [`Record::from_validated`].
pub mod base64;
pub mod curves;
pub mod error;
pub mod kind;
pub mod records;
pub mod schema;
pub mod symbols;
pub mod validate;
pub mod value;
pub mod version;

pub use base64::Base64Error;
pub use curves::{CurveError, CurveFormula, LEVEL_ROWS, PARAM_COUNT, ParamCurves};
pub use error::{BuildError, ErrorSeverity, ModError};
pub use kind::{RecordKind, TextField};
pub use records::{
    Actor, AnyRecord, Armor, Class, Damage, Effect, EffectCode, Feature, FeatureCode, HasEffects,
    HasFeatures, Item, Learning, Record, Skill, Text, Weapon,
};
pub use schema::{FieldDefault, FieldKind, FieldSpec, RecordSchema, SchemaSet};
pub use symbols::{EnumRef, NewEntry, SymbolTable, SymbolTables, TableKind};
pub use validate::{Attributes, FieldValue, ValidatedRecord, validate};
pub use value::{AttrInput, AttrValue, Deferred};
pub use version::{ImportRegistry, compare_versions};
