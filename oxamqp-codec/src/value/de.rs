//! Deserialize impl for [`Value`]
//!
//! The variant is chosen by the format code of the next item, which the
//! variant then reads in full.

use ordered_float::OrderedFloat;
use serde::de;
use serde_bytes::ByteBuf;

use crate::{__constants::VALUE, described::Described, format_code::EncodingCodes};

use super::Value;

const VARIANTS: &[&str] = &[
    "Described",
    "Null",
    "Bool",
    "UByte",
    "UShort",
    "UInt",
    "ULong",
    "Byte",
    "Short",
    "Int",
    "Long",
    "Float",
    "Double",
    "Decimal32",
    "Decimal64",
    "Decimal128",
    "Char",
    "Timestamp",
    "Uuid",
    "Binary",
    "String",
    "Symbol",
    "List",
    "Map",
    "Array",
];

enum Field {
    Described,
    Null,
    Bool,
    UByte,
    UShort,
    UInt,
    ULong,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal32,
    Decimal64,
    Decimal128,
    Char,
    Timestamp,
    Uuid,
    Binary,
    String,
    Symbol,
    List,
    Map,
    Array,
}

impl From<EncodingCodes> for Field {
    fn from(code: EncodingCodes) -> Self {
        match code {
            EncodingCodes::DescribedType => Field::Described,
            EncodingCodes::Null => Field::Null,
            EncodingCodes::Boolean | EncodingCodes::BooleanTrue | EncodingCodes::BooleanFalse => {
                Field::Bool
            }
            EncodingCodes::UByte => Field::UByte,
            EncodingCodes::UShort => Field::UShort,
            EncodingCodes::UInt | EncodingCodes::SmallUInt | EncodingCodes::UInt0 => Field::UInt,
            EncodingCodes::ULong | EncodingCodes::SmallULong | EncodingCodes::ULong0 => {
                Field::ULong
            }
            EncodingCodes::Byte => Field::Byte,
            EncodingCodes::Short => Field::Short,
            EncodingCodes::Int | EncodingCodes::SmallInt => Field::Int,
            EncodingCodes::Long | EncodingCodes::SmallLong => Field::Long,
            EncodingCodes::Float => Field::Float,
            EncodingCodes::Double => Field::Double,
            EncodingCodes::Decimal32 => Field::Decimal32,
            EncodingCodes::Decimal64 => Field::Decimal64,
            EncodingCodes::Decimal128 => Field::Decimal128,
            EncodingCodes::Char => Field::Char,
            EncodingCodes::Timestamp => Field::Timestamp,
            EncodingCodes::Uuid => Field::Uuid,
            EncodingCodes::VBin8 | EncodingCodes::VBin32 => Field::Binary,
            EncodingCodes::Str8 | EncodingCodes::Str32 => Field::String,
            EncodingCodes::Sym8 | EncodingCodes::Sym32 => Field::Symbol,
            EncodingCodes::List0 | EncodingCodes::List8 | EncodingCodes::List32 => Field::List,
            EncodingCodes::Map8 | EncodingCodes::Map32 => Field::Map,
            EncodingCodes::Array8 | EncodingCodes::Array32 => Field::Array,
        }
    }
}

struct FieldVisitor;

impl<'de> de::Visitor<'de> for FieldVisitor {
    type Value = Field;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a valid format code")
    }

    fn visit_u8<E>(self, v: u8) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        EncodingCodes::try_from(v)
            .map(Field::from)
            .map_err(de::Error::custom)
    }
}

impl<'de> de::Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_identifier(FieldVisitor)
    }
}

struct Visitor;

impl<'de> de::Visitor<'de> for Visitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("enum Value")
    }

    fn visit_enum<A>(self, data: A) -> Result<Self::Value, A::Error>
    where
        A: de::EnumAccess<'de>,
    {
        use de::VariantAccess;

        let (field, de) = data.variant()?;
        let value = match field {
            Field::Described => {
                let described: Described<Value> = de.newtype_variant()?;
                Value::Described(Box::new(described))
            }
            Field::Null => {
                de.newtype_variant::<()>()?;
                Value::Null
            }
            Field::Bool => Value::Bool(de.newtype_variant()?),
            Field::UByte => Value::UByte(de.newtype_variant()?),
            Field::UShort => Value::UShort(de.newtype_variant()?),
            Field::UInt => Value::UInt(de.newtype_variant()?),
            Field::ULong => Value::ULong(de.newtype_variant()?),
            Field::Byte => Value::Byte(de.newtype_variant()?),
            Field::Short => Value::Short(de.newtype_variant()?),
            Field::Int => Value::Int(de.newtype_variant()?),
            Field::Long => Value::Long(de.newtype_variant()?),
            Field::Float => {
                let val: f32 = de.newtype_variant()?;
                Value::Float(OrderedFloat::from(val))
            }
            Field::Double => {
                let val: f64 = de.newtype_variant()?;
                Value::Double(OrderedFloat::from(val))
            }
            Field::Decimal32 => Value::Decimal32(de.newtype_variant()?),
            Field::Decimal64 => Value::Decimal64(de.newtype_variant()?),
            Field::Decimal128 => Value::Decimal128(de.newtype_variant()?),
            Field::Char => Value::Char(de.newtype_variant()?),
            Field::Timestamp => Value::Timestamp(de.newtype_variant()?),
            Field::Uuid => Value::Uuid(de.newtype_variant()?),
            Field::Binary => Value::Binary(de.newtype_variant::<ByteBuf>()?),
            Field::String => Value::String(de.newtype_variant()?),
            Field::Symbol => Value::Symbol(de.newtype_variant()?),
            Field::List => Value::List(de.newtype_variant()?),
            Field::Map => Value::Map(de.newtype_variant()?),
            Field::Array => Value::Array(de.newtype_variant()?),
        };
        Ok(value)
    }
}

impl<'de> de::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_enum(VALUE, VARIANTS, Visitor)
    }
}
