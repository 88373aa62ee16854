//! Composite types: a descriptor plus an ordered list of fields
//!
//! A composite is kept as a fixed-size record of optional fields. Trailing
//! absent fields are only dropped when the record is turned into a [`List`]
//! for encoding, so a record built from `k` arguments encodes exactly like
//! one built from all of its fields with the remainder left absent.

use std::fmt::Display;

use serde::{de, ser};

use crate::{
    __constants::{DESCRIBED_LIST, DESCRIPTOR},
    described::Described,
    descriptor::{descriptor_code, Descriptor},
    list::List,
    primitives::Symbol,
    value::Value,
    Error,
};

/// Name and optionality of one field of a composite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name
    pub name: &'static str,

    /// Whether the field must be present
    pub mandatory: bool,
}

impl FieldSpec {
    /// An optional field
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            mandatory: false,
        }
    }

    /// A mandatory field
    pub const fn mandatory(name: &'static str) -> Self {
        Self {
            name,
            mandatory: true,
        }
    }
}

/// Static metadata of a composite type
#[derive(Debug, PartialEq, Eq)]
pub struct CompositeType {
    /// Symbolic descriptor, e.g. `amqp:released:list`
    pub name: &'static str,

    /// Numeric descriptor code
    pub code: u64,

    /// Fields in wire order
    pub fields: &'static [FieldSpec],
}

impl CompositeType {
    /// Declares a composite type from a domain id and descriptor id
    pub const fn new(
        name: &'static str,
        domain: u32,
        id: u32,
        fields: &'static [FieldSpec],
    ) -> Self {
        Self {
            name,
            code: descriptor_code(domain, id),
            fields,
        }
    }

    /// Number of declared fields
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// The descriptor written on the wire
    pub fn descriptor(&self) -> Descriptor {
        Descriptor::Code(self.code)
    }

    /// The symbolic descriptor
    pub fn symbol(&self) -> Symbol {
        Symbol::from(self.name)
    }

    /// Whether `descriptor` identifies this type, by code or by name
    pub fn matches(&self, descriptor: &Descriptor) -> bool {
        match descriptor {
            Descriptor::Code(code) => *code == self.code,
            Descriptor::Name(name) => name.as_str() == self.name,
        }
    }

    /// The short type name, e.g. `released` for `amqp:released:list`
    pub fn short_name(&self) -> &'static str {
        self.name.split(':').nth(1).unwrap_or(self.name)
    }
}

/// The field values of one composite, always exactly as long as its type
/// declares. `None` marks an absent field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    ty: &'static CompositeType,
    values: Vec<Option<Value>>,
}

impl Fields {
    /// All fields absent
    pub fn new(ty: &'static CompositeType) -> Self {
        Self {
            ty,
            values: vec![None; ty.arity()],
        }
    }

    /// Builds the record from positional arguments.
    ///
    /// Fewer arguments than fields pad the rest with absent values and an
    /// explicit null counts as absent. More arguments than fields, or a
    /// mandatory field left absent, fail with [`Error::Argument`].
    pub fn from_positional(
        ty: &'static CompositeType,
        args: impl IntoIterator<Item = Option<Value>>,
    ) -> Result<Self, Error> {
        let mut values: Vec<Option<Value>> = args
            .into_iter()
            .map(|arg| arg.filter(|value| !value.is_null()))
            .collect();

        if values.len() > ty.arity() {
            return Err(Error::argument(format!(
                "{} takes at most {} fields, found {}",
                ty.name,
                ty.arity(),
                values.len()
            )));
        }
        values.resize(ty.arity(), None);

        let fields = Self { ty, values };
        fields.check_mandatory()?;
        Ok(fields)
    }

    /// Builds the record from values already typed by a [`Composite`]
    /// implementation, one per declared field. Mandatory fields are not
    /// checked; untrusted input goes through [`Fields::from_positional`].
    pub fn from_values(
        ty: &'static CompositeType,
        values: impl IntoIterator<Item = Option<Value>>,
    ) -> Self {
        let mut values: Vec<Option<Value>> = values
            .into_iter()
            .map(|value| value.filter(|value| !value.is_null()))
            .collect();
        debug_assert_eq!(values.len(), ty.arity(), "{} arity", ty.name);
        values.resize(ty.arity(), None);
        Self { ty, values }
    }

    /// Builds the record from a decoded field list
    pub fn from_list(ty: &'static CompositeType, list: List) -> Result<Self, Error> {
        Self::from_positional(ty, list.into_iter().map(Some))
    }

    fn check_mandatory(&self) -> Result<(), Error> {
        for (spec, value) in self.ty.fields.iter().zip(self.values.iter()) {
            if spec.mandatory && value.is_none() {
                return Err(Error::argument(format!(
                    "{} is missing mandatory field {}",
                    self.ty.name, spec.name
                )));
            }
        }
        Ok(())
    }

    /// The composite type
    pub fn composite_type(&self) -> &'static CompositeType {
        self.ty
    }

    /// Number of fields, which is always the declared arity
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the type declares no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the field at `index`
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Set the field at `index`. A null value marks the field absent.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<(), Error> {
        let arity = self.ty.arity();
        let slot = self.values.get_mut(index).ok_or(Error::Index { index, len: arity })?;
        let value = value.into();
        *slot = match value.is_null() {
            true => None,
            false => Some(value),
        };
        Ok(())
    }

    /// Take the raw field at `index`, leaving it absent
    pub fn take(&mut self, index: usize) -> Option<Value> {
        self.values.get_mut(index).and_then(Option::take)
    }

    /// Take the field at `index` and convert it
    pub fn take_as<T>(&mut self, index: usize) -> Result<Option<T>, Error>
    where
        T: TryFrom<Value, Error = Value>,
    {
        self.take_with(index, T::try_from)
    }

    /// Take the field at `index` and convert it with `convert`, which hands
    /// back the value it could not convert
    pub fn take_with<T, F>(&mut self, index: usize, convert: F) -> Result<Option<T>, Error>
    where
        F: FnOnce(Value) -> Result<T, Value>,
    {
        match self.take(index) {
            Some(value) => convert(value).map(Some).map_err(|found| {
                Error::validation(
                    format!("{} field {}", self.ty.name, self.field_name(index)),
                    found,
                )
            }),
            None => Ok(None),
        }
    }

    /// Take a mandatory field and convert it
    pub fn take_required<T>(&mut self, index: usize) -> Result<T, Error>
    where
        T: TryFrom<Value, Error = Value>,
    {
        self.take_as(index)?.ok_or_else(|| {
            Error::argument(format!(
                "{} is missing mandatory field {}",
                self.ty.name,
                self.field_name(index)
            ))
        })
    }

    fn field_name(&self, index: usize) -> &'static str {
        self.ty.fields.get(index).map(|f| f.name).unwrap_or("?")
    }

    /// The field list as encoded: trailing absent fields are dropped and
    /// interior absent fields become null
    pub fn to_list(&self) -> List {
        self.clone().into_list()
    }

    /// Consumes the record into its encoded field list
    pub fn into_list(self) -> List {
        let mut values = self.values;
        while let Some(None) = values.last() {
            values.pop();
        }
        values
            .into_iter()
            .map(|value| value.unwrap_or(Value::Null))
            .collect()
    }

    /// Consumes the record into a described list
    pub fn into_described(self) -> Described<Value> {
        Described::new(self.ty.descriptor(), Value::List(self.into_list()))
    }
}

impl Display for Fields {
    /// `short-name(v0, v1, ...)` with trailing absent fields left out
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_list().fmt_with_name(self.ty.short_name(), f)
    }
}

impl ser::Serialize for Fields {
    /// Written as a described list, with trailing absent fields dropped
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        use ser::SerializeStruct;

        let list = self.to_list();
        let mut state = serializer.serialize_struct(DESCRIBED_LIST, list.len() + 1)?;
        state.serialize_field(DESCRIPTOR, &self.ty.descriptor())?;
        for (index, value) in list.iter().enumerate() {
            state.serialize_field(self.field_name(index), value)?;
        }
        state.end()
    }
}

/// Reads a described list and converts it with
/// [`Composite::try_from_described`]
pub fn deserialize_composite<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Composite,
    D: de::Deserializer<'de>,
{
    let described = <Described<Value> as de::Deserialize>::deserialize(deserializer)?;
    T::try_from_described(described).map_err(de::Error::custom)
}

/// Implements `Serialize` and `Deserialize` for types implementing both
/// [`Composite`] and `Clone`
#[macro_export]
macro_rules! impl_composite_serde {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::serde::Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: $crate::serde::Serializer,
                {
                    let fields = $crate::composite::Composite::into_fields(self.clone());
                    $crate::serde::Serialize::serialize(&fields, serializer)
                }
            }

            impl<'de> $crate::serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: $crate::serde::Deserializer<'de>,
                {
                    $crate::composite::deserialize_composite(deserializer)
                }
            }
        )*
    };
}

/// A Rust type that maps onto a composite type
pub trait Composite: Sized {
    /// Descriptor and field layout
    const TYPE: &'static CompositeType;

    /// Splits the value into its fields
    fn into_fields(self) -> Fields;

    /// Rebuilds the value from its fields
    fn from_fields(fields: Fields) -> Result<Self, Error>;

    /// Converts into a described [`Value`]
    fn into_value(self) -> Value {
        Value::Described(Box::new(self.into_fields().into_described()))
    }

    /// Converts from a described list whose descriptor matches [`Self::TYPE`]
    fn try_from_described(described: Described<Value>) -> Result<Self, Error> {
        if !Self::TYPE.matches(&described.descriptor) {
            return Err(Error::validation(Self::TYPE.name, &described.descriptor));
        }
        match described.value {
            Value::List(list) => Self::from_fields(Fields::from_list(Self::TYPE, list)?),
            other => Err(Error::validation(
                format!("{} field list", Self::TYPE.name),
                other,
            )),
        }
    }

    /// Converts from a described [`Value`]
    fn try_from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Described(described) => Self::try_from_described(*described),
            other => Err(Error::validation(Self::TYPE.name, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser::to_vec;

    const PAIR_FIELDS: &[FieldSpec] = &[
        FieldSpec::mandatory("first"),
        FieldSpec::optional("second"),
        FieldSpec::optional("third"),
    ];
    static PAIR: CompositeType = CompositeType::new("test:pair:list", 0x0000_0000, 0x0000_00f0, PAIR_FIELDS);

    #[test]
    fn trailing_absent_fields_encode_identically() {
        let short = Fields::from_positional(&PAIR, [Some(Value::Long(1))]).unwrap();
        let full = Fields::from_positional(
            &PAIR,
            [Some(Value::Long(1)), None, Some(Value::Null)],
        )
        .unwrap();

        assert_eq!(short, full);
        let short = to_vec(&Value::from(short.into_described())).unwrap();
        let full = to_vec(&Value::from(full.into_described())).unwrap();
        assert_eq!(short, full);
    }

    #[test]
    fn interior_absent_field_becomes_null() {
        let fields =
            Fields::from_positional(&PAIR, [Some(Value::Long(1)), None, Some(Value::Bool(true))])
                .unwrap();
        assert_eq!(
            fields.to_list(),
            List::from_values([Value::Long(1), Value::Null, Value::Bool(true)])
        );
    }

    #[test]
    fn excess_arguments_are_rejected() {
        let args = vec![Some(Value::Long(1)); 4];
        assert!(matches!(
            Fields::from_positional(&PAIR, args),
            Err(Error::Argument(_))
        ));
    }

    #[test]
    fn missing_mandatory_field_is_rejected() {
        assert!(matches!(
            Fields::from_positional(&PAIR, [None, Some(Value::Long(2))]),
            Err(Error::Argument(_))
        ));
    }

    #[test]
    fn fields_serialize_like_their_described_value() {
        let fields =
            Fields::from_positional(&PAIR, [Some(Value::Long(1)), None, Some(Value::Bool(true))])
                .unwrap();
        let direct = to_vec(&fields).unwrap();
        let via_value = to_vec(&Value::from(fields.into_described())).unwrap();
        assert_eq!(direct, via_value);
        assert_eq!(&direct[..3], &[0x00, 0x53, 0xf0]);
    }

    #[test]
    fn empty_fields_serialize_as_list0() {
        let fields = Fields::new(&PAIR);
        assert_eq!(to_vec(&fields).unwrap(), vec![0x00, 0x53, 0xf0, 0x45]);
    }

    #[test]
    fn composite_display_uses_short_name() {
        let fields = Fields::from_positional(&PAIR, [Some(Value::Long(1))]).unwrap();
        assert_eq!(fields.to_string(), "pair(long(1))");
    }
}
