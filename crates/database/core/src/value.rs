//! Attribute values accepted by the record builder.
//!
//! Callers describe a record either as a keyed mapping or as positional values.
//! Both shapes carry [`AttrValue`]s, a tagged union over every value type the
//! builder understands. Validation decides per field which variants are valid.

use std::fmt;
use std::sync::Arc;

use crate::curves::ParamCurves;
use crate::symbols::EnumRef;

/// A zero-argument computation producing a text value later on.
///
/// Deferred values are used for names and descriptions that depend on data
/// which is not available while the record is built (translations, other
/// records). They are evaluated during the finalization pass.
#[derive(Clone)]
pub struct Deferred(Arc<dyn Fn() -> String + Send + Sync>);

impl Deferred {
    pub fn new(compute: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(compute))
    }

    /// Runs the computation.
    pub fn resolve(&self) -> String {
        (self.0)()
    }

    /// True when both handles share the same computation.
    pub fn same_as(&self, other: &Deferred) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred(..)")
    }
}

/// One attribute value.
#[derive(Clone, Debug)]
pub enum AttrValue {
    /// Explicitly absent. Behaves like a missing key.
    Nil,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// A symbolic name, resolved against the field's symbol table.
    Symbol(String),
    Lazy(Deferred),
    List(Vec<AttrValue>),
    /// Ordered key/value pairs, e.g. `{ atk: 20, agi: -5 }`.
    Map(Vec<(String, AttrValue)>),
    Curves(ParamCurves),
}

impl AttrValue {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    pub fn lazy(compute: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Lazy(Deferred::new(compute))
    }

    pub fn list(values: impl IntoIterator<Item = AttrValue>) -> Self {
        Self::List(values.into_iter().collect())
    }

    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, AttrValue)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Name of the value's type, used in mismatch messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Int(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Bool(_) => "Boolean",
            Self::Str(_) => "String",
            Self::Symbol(_) => "Symbol",
            Self::Lazy(_) => "Proc",
            Self::List(_) => "Array",
            Self::Map(_) => "Hash",
            Self::Curves(_) => "Table",
        }
    }

    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Reads the value as an enum reference, if it has a compatible type.
    pub fn as_enum_ref(&self) -> Option<EnumRef> {
        match self {
            Self::Int(code) => Some(EnumRef::Raw(*code)),
            Self::Symbol(name) => Some(EnumRef::Named(name.clone())),
            _ => None,
        }
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Deferred> for AttrValue {
    fn from(value: Deferred) -> Self {
        Self::Lazy(value)
    }
}

impl From<ParamCurves> for AttrValue {
    fn from(value: ParamCurves) -> Self {
        Self::Curves(value)
    }
}

impl From<EnumRef> for AttrValue {
    fn from(value: EnumRef) -> Self {
        match value {
            EnumRef::Raw(code) => Self::Int(code),
            EnumRef::Named(name) => Self::Symbol(name),
        }
    }
}

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

/// The attributes passed to a `create_*` call, in either calling form.
#[derive(Clone, Debug)]
pub enum AttrInput {
    /// Read by field name (synonyms allowed).
    Keyed(Vec<(String, AttrValue)>),
    /// Read by the record type's positional field order.
    Positional(Vec<AttrValue>),
}

impl AttrInput {
    pub fn keyed<K: Into<String>>(entries: impl IntoIterator<Item = (K, AttrValue)>) -> Self {
        Self::Keyed(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn positional(values: impl IntoIterator<Item = AttrValue>) -> Self {
        Self::Positional(values.into_iter().collect())
    }

    /// Detects the calling form from raw variadic arguments.
    ///
    /// A mapping in first position selects the keyed form and the remaining
    /// arguments are ignored; anything else is read positionally.
    pub fn from_args(mut args: Vec<AttrValue>) -> Self {
        if matches!(args.first(), Some(AttrValue::Map(_)))
            && let AttrValue::Map(entries) = args.swap_remove(0)
        {
            return Self::Keyed(entries);
        }
        Self::Positional(args)
    }

    /// Adds a keyed entry. A positional input is left untouched.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        if let Self::Keyed(entries) = &mut self {
            entries.push((key.into(), value.into()));
        }
        self
    }
}

impl Default for AttrInput {
    fn default() -> Self {
        Self::Positional(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_mapping_selects_keyed_form() {
        let input = AttrInput::from_args(vec![
            AttrValue::map([("name", "Sword".into())]),
            AttrValue::Int(3),
        ]);

        match input {
            AttrInput::Keyed(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].0, "name");
            }
            AttrInput::Positional(_) => panic!("expected keyed input"),
        }
    }

    #[test]
    fn other_leading_values_select_positional_form() {
        let input = AttrInput::from_args(vec!["Sword".into(), AttrValue::map([("atk", 3.into())])]);
        assert!(matches!(input, AttrInput::Positional(values) if values.len() == 2));
    }

    #[test]
    fn deferred_values_resolve_on_demand() {
        let value = AttrValue::lazy(|| "Hero".to_owned());
        let AttrValue::Lazy(deferred) = value else {
            panic!("expected lazy value");
        };

        assert_eq!(deferred.resolve(), "Hero");
        assert!(deferred.same_as(&deferred.clone()));
        assert_eq!(AttrValue::from(None::<i64>).type_name(), "nil");
    }
}
