//! Value type for untyped AMQP1.0 data structures.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde_bytes::ByteBuf;
use std::collections::BTreeMap;
use std::fmt::Display;

use crate::{
    described::Described,
    format_code::EncodingCodes,
    list::List,
    primitives::{
        Array, Dec128, Dec32, Dec64, Native, OrderedMap, PrimitiveKind, Symbol, Timestamp, Uuid,
    },
    Error,
};

mod de;
mod ser;

/// Primitive type definitions
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    /// Described type
    ///
    /// Box is used to reduce the memory size of the Value type.
    Described(Box<Described<Value>>),

    /// Indicates an empty value
    ///
    /// encoding code = 0x40,
    /// category = fixed, width = 0,
    /// label = "the null value"
    Null,

    /// Represents a true or false value
    ///
    /// encoding code = 0x56
    /// category = fixed, width = 1
    /// label = "boolean with the octet 0x00 being false and octet 0x01 being true"
    ///
    /// encoding name = "true", encoding code = 0x41
    /// category = fixed, width = 0
    /// label = "the boolean value true"
    ///
    /// encoding name = "false", encoding code = 0x42
    /// category = fixed, width = 0
    /// label = "the boolean value false"
    Bool(bool),

    /// Integer in the range 0 to 2^8-1 inclusive
    ///
    /// encoding code = 0x50,
    /// category = fixed, width = 1
    /// label = "8-bit unsigned integer"
    UByte(u8),

    /// Integer in the range 0 to 2^16-1 inclusive
    ///
    /// encoding code = 0x60,
    /// category = fixed, width = 2
    /// label = "16-bit unsigned integer in network byte order"
    UShort(u16),

    /// Integer in the range 0 to 2^32-1 inclusive
    ///
    /// encoding code = 0x70,
    /// category = fixed, width = 4
    /// label = "32-bit unsigned integer in network byte order"
    ///
    /// encoding name = "smalluint", encoding code = 0x52
    /// category = fixed, width = 1
    /// label = "unsigned integer value in the range 0 to 255 inclusive"
    ///
    /// encoding name = "uint0", encoding code = 0x43
    /// category = fixed, width = 0
    /// label = "the uint value 0"
    UInt(u32),

    /// Integer in the range 0 to 2^64-1 inclusive
    ///
    /// encoding code = 0x80,
    /// category = fixed, width = 8
    /// label = "64-bit unsigned integer in network byte order"
    ///
    /// encoding name = "smallulong", encoding code = 0x53
    /// category = fixed, width = 1
    /// label = "unsigned long value in the range 0 to 255 inclusive"
    ///
    /// encoding name = "ulong0", encoding code = 0x44
    /// category = fixed, width = 0
    /// label = "the ulong value 0"
    ULong(u64),

    /// Integer in the range -(2^7) to 2^7-1 inclusive
    ///
    /// encoding code = 0x51,
    /// category = fixed, width = 1
    /// label = "8-bit two's-complement integer"
    Byte(i8),

    /// Integer in the range -(2^15) to 2^15-1 inclusive
    ///
    /// encoding code = 0x61,
    /// category = fixed, width = 2
    /// label = "16-bit two’s-complement integer in network byte order"
    Short(i16),

    /// Integer in the range -(2^31) to 2^31-1 inclusive
    ///
    /// encoding code = 0x71,
    /// category = fixed, width = 4
    /// label = "32-bit two’s-complement integer in network byte order"
    ///
    /// encoding name = "smallint", encoding code = 0x54
    /// category = fixed, width = 1
    /// label = "8-bit two’s-complement integer"
    Int(i32),

    /// Integer in the range -(2^63) to 2^63-1 inclusive
    ///
    /// encoding code = 0x81,
    /// category = fixed, width = 8
    /// label = "64-bit two’s-complement integer in network byte order"
    ///
    /// encoding name = "smalllong", encoding code = 0x55
    /// category = fixed, width = 1
    /// label = "8-bit two’s-complement integer"
    Long(i64),

    /// 32-bit floating point number (IEEE 754-2008 binary32)
    ///
    /// encoding name = "ieee-754", encoding code = 0x72
    /// category = fixed, width = 4
    /// label = "IEEE 754-2008 binary32"
    Float(OrderedFloat<f32>),

    /// 64-bit floating point number (IEEE 754-2008 binary64).
    ///
    /// encoding name = "ieee-754", encoding code = 0x82
    /// category = fixed, width = 8
    /// label = "IEEE 754-2008 binary64"
    Double(OrderedFloat<f64>),

    /// 32-bit decimal number (IEEE 754-2008 decimal32).
    Decimal32(Dec32),

    /// 64-bit decimal number (IEEE 754-2008 decimal64).
    Decimal64(Dec64),

    /// 128-bit decimal number (IEEE 754-2008 decimal128).
    Decimal128(Dec128),

    /// A single Unicode character
    ///
    /// encoding name = "utf32", encoding code = 0x73
    /// category = fixed, width = 4,
    /// label = "a UTF-32BE encoded Unicode character"
    Char(char),

    /// An absolute point in time
    Timestamp(Timestamp),

    /// A universally unique identifier as defined by RFC-4122 in section 4.1.2
    Uuid(Uuid),

    /// A sequence of octets.
    Binary(ByteBuf),

    /// A sequence of Unicode characters.
    ///
    /// encoding name = "str8-utf8", encoding code = 0xa1,
    /// category = variable, width = 1
    /// label = "up to 2^8 - 1 octets worth of UTF-8 Unicode (with no byte order mark)"
    ///
    /// encoding name = "str32-utf8", encoding code = 0xb1
    /// category = variable, width = 4
    /// label="up to 2^32 - 1 octets worth of UTF-8 Unicode (with no byte order mark)"
    String(String),

    /// Symbolic values from a constrained domain.
    Symbol(Symbol),

    /// A sequence of polymorphic values.
    List(List),

    /// A polymorphic mapping from distinct keys to values.
    ///
    /// encoding name = "map8", encoding code = 0xc1,
    /// category = compound, width = 1
    /// label="up to 2^8 - 1 octets of encoded map data"
    ///
    /// encoding name = "map32", encoding code = 0xd1,
    /// category = compound, width = 4
    /// label="up to 2^32 - 1 octets of encoded map data
    ///
    /// Maps are ordered: two maps that only differ in the order of their
    /// key-value pairs are not equal.
    Map(OrderedMap<Value, Value>),

    /// A sequence of values of a single type.
    Array(Array<Value>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

macro_rules! narrow {
    ($native:ident, $i:expr, $ty:ty, $variant:ident, $expected:literal) => {
        <$ty>::try_from($i)
            .map(Value::$variant)
            .map_err(|_| Error::validation($expected, $native.describe()))
    };
}

impl Value {
    /// Get the widest format code of the value type
    pub fn format_code(&self) -> u8 {
        let code = match *self {
            Value::Described(_) => EncodingCodes::DescribedType,
            Value::Null => EncodingCodes::Null,
            Value::Bool(_) => EncodingCodes::Boolean,
            Value::UByte(_) => EncodingCodes::UByte,
            Value::UShort(_) => EncodingCodes::UShort,
            Value::UInt(_) => EncodingCodes::UInt,
            Value::ULong(_) => EncodingCodes::ULong,
            Value::Byte(_) => EncodingCodes::Byte,
            Value::Short(_) => EncodingCodes::Short,
            Value::Int(_) => EncodingCodes::Int,
            Value::Long(_) => EncodingCodes::Long,
            Value::Float(_) => EncodingCodes::Float,
            Value::Double(_) => EncodingCodes::Double,
            Value::Decimal32(_) => EncodingCodes::Decimal32,
            Value::Decimal64(_) => EncodingCodes::Decimal64,
            Value::Decimal128(_) => EncodingCodes::Decimal128,
            Value::Char(_) => EncodingCodes::Char,
            Value::Timestamp(_) => EncodingCodes::Timestamp,
            Value::Uuid(_) => EncodingCodes::Uuid,
            Value::Binary(_) => EncodingCodes::VBin32,
            Value::String(_) => EncodingCodes::Str32,
            Value::Symbol(_) => EncodingCodes::Sym32,
            Value::List(_) => EncodingCodes::List32,
            Value::Map(_) => EncodingCodes::Map32,
            Value::Array(_) => EncodingCodes::Array32,
        };
        code as u8
    }

    /// The AMQP type name of the value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Described(_) => "described",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::UByte(_) => "ubyte",
            Value::UShort(_) => "ushort",
            Value::UInt(_) => "uint",
            Value::ULong(_) => "ulong",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Decimal32(_) => "decimal32",
            Value::Decimal64(_) => "decimal64",
            Value::Decimal128(_) => "decimal128",
            Value::Char(_) => "char",
            Value::Timestamp(_) => "timestamp",
            Value::Uuid(_) => "uuid",
            Value::Binary(_) => "binary",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Array(_) => "array",
        }
    }

    /// Whether the value is [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Creates a value of the given kind, checking the native value's kind and range
    ///
    /// # Example
    ///
    /// ```rust
    /// use oxamqp_codec::{primitives::{Native, PrimitiveKind}, Value};
    ///
    /// assert_eq!(Value::try_new(PrimitiveKind::UShort, 456), Ok(Value::UShort(456)));
    /// assert!(Value::try_new(PrimitiveKind::UShort, 65536).is_err());
    /// assert!(Value::try_new(PrimitiveKind::UShort, "456").is_err());
    /// ```
    pub fn try_new(kind: PrimitiveKind, native: impl Into<Native>) -> Result<Self, Error> {
        let native = native.into();
        let value = match (kind, &native) {
            (PrimitiveKind::Null, Native::Null) => Value::Null,
            (PrimitiveKind::Boolean, Native::Bool(b)) => Value::Bool(*b),
            (PrimitiveKind::UByte, Native::Int(i)) => {
                narrow!(native, *i, u8, UByte, "ubyte (0..=255)")?
            }
            (PrimitiveKind::UShort, Native::Int(i)) => {
                narrow!(native, *i, u16, UShort, "ushort (0..=65535)")?
            }
            (PrimitiveKind::UInt, Native::Int(i)) => {
                narrow!(native, *i, u32, UInt, "uint (0..=4294967295)")?
            }
            (PrimitiveKind::ULong, Native::Int(i)) => {
                narrow!(native, *i, u64, ULong, "ulong (0..=18446744073709551615)")?
            }
            (PrimitiveKind::Byte, Native::Int(i)) => {
                narrow!(native, *i, i8, Byte, "byte (-128..=127)")?
            }
            (PrimitiveKind::Short, Native::Int(i)) => {
                narrow!(native, *i, i16, Short, "short (-32768..=32767)")?
            }
            (PrimitiveKind::Int, Native::Int(i)) => {
                narrow!(native, *i, i32, Int, "int (-2147483648..=2147483647)")?
            }
            (PrimitiveKind::Long, Native::Int(i)) => narrow!(
                native,
                *i,
                i64,
                Long,
                "long (-9223372036854775808..=9223372036854775807)"
            )?,
            (PrimitiveKind::Timestamp, Native::Int(i)) => i64::try_from(*i)
                .map(|ms| Value::Timestamp(Timestamp::from_milliseconds(ms)))
                .map_err(|_| {
                    Error::validation("timestamp (signed 64-bit milliseconds)", native.describe())
                })?,
            (PrimitiveKind::Float, Native::Float(f)) => {
                let narrowed = *f as f32;
                if f.is_finite() && narrowed.is_infinite() {
                    return Err(Error::validation(
                        "float (IEEE 754 binary32)",
                        native.describe(),
                    ));
                }
                Value::Float(OrderedFloat(narrowed))
            }
            (PrimitiveKind::Double, Native::Float(f)) => Value::Double(OrderedFloat(*f)),
            (PrimitiveKind::Decimal32, Native::Bytes(b)) => {
                Value::Decimal32(Dec32::try_from(b.as_slice())?)
            }
            (PrimitiveKind::Decimal64, Native::Bytes(b)) => {
                Value::Decimal64(Dec64::try_from(b.as_slice())?)
            }
            (PrimitiveKind::Decimal128, Native::Bytes(b)) => {
                Value::Decimal128(Dec128::try_from(b.as_slice())?)
            }
            (PrimitiveKind::Char, Native::Char(c)) => Value::Char(*c),
            (PrimitiveKind::Char, Native::Int(i)) => u32::try_from(*i)
                .ok()
                .and_then(char::from_u32)
                .map(Value::Char)
                .ok_or_else(|| {
                    Error::validation("char (unicode scalar value)", native.describe())
                })?,
            (PrimitiveKind::Uuid, Native::Bytes(b)) => Value::Uuid(Uuid::try_from(b.as_slice())?),
            (PrimitiveKind::Binary, Native::Bytes(b)) => Value::Binary(ByteBuf::from(b.clone())),
            (PrimitiveKind::String, Native::Str(s)) => Value::String(s.clone()),
            (PrimitiveKind::Symbol, Native::Str(s)) => Value::Symbol(Symbol::try_new(s.as_str())?),
            (kind, native) => return Err(Error::validation(kind, native.describe())),
        };
        Ok(value)
    }

    /// Maps a native value to its default AMQP width.
    ///
    /// Integers become `long` (`ulong` above `i64::MAX`), floats become
    /// `double`, strings become `string` and bytes become `binary`. The value
    /// is never narrowed; use [`Value::try_new`] for narrower widths.
    pub fn from_native(native: impl Into<Native>) -> Result<Self, Error> {
        let native = native.into();
        let value = match native {
            Native::Null => Value::Null,
            Native::Bool(b) => Value::Bool(b),
            Native::Int(i) => match i64::try_from(i) {
                Ok(long) => Value::Long(long),
                Err(_) => u64::try_from(i).map(Value::ULong).map_err(|_| {
                    Error::validation(
                        "integer (-9223372036854775808..=18446744073709551615)",
                        native.describe(),
                    )
                })?,
            },
            Native::Float(f) => Value::Double(OrderedFloat(f)),
            Native::Char(c) => Value::Char(c),
            Native::Str(s) => Value::String(s),
            Native::Bytes(b) => Value::Binary(ByteBuf::from(b)),
        };
        Ok(value)
    }
}

fn write_hex(f: &mut std::fmt::Formatter<'_>, bytes: &[u8]) -> std::fmt::Result {
    for byte in bytes {
        write!(f, "{:02x}", byte)?;
    }
    Ok(())
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.type_name();
        match self {
            Value::Described(described) => write!(f, "{}", described),
            Value::Null => f.write_str(name),
            Value::Bool(v) => write!(f, "{}({})", name, v),
            Value::UByte(v) => write!(f, "{}({})", name, v),
            Value::UShort(v) => write!(f, "{}({})", name, v),
            Value::UInt(v) => write!(f, "{}({})", name, v),
            Value::ULong(v) => write!(f, "{}({})", name, v),
            Value::Byte(v) => write!(f, "{}({})", name, v),
            Value::Short(v) => write!(f, "{}({})", name, v),
            Value::Int(v) => write!(f, "{}({})", name, v),
            Value::Long(v) => write!(f, "{}({})", name, v),
            Value::Float(v) => write!(f, "{}({})", name, v),
            Value::Double(v) => write!(f, "{}({})", name, v),
            Value::Decimal32(v) => {
                write!(f, "{}(0x", name)?;
                write_hex(f, v.as_bytes())?;
                f.write_str(")")
            }
            Value::Decimal64(v) => {
                write!(f, "{}(0x", name)?;
                write_hex(f, v.as_bytes())?;
                f.write_str(")")
            }
            Value::Decimal128(v) => {
                write!(f, "{}(0x", name)?;
                write_hex(f, v.as_bytes())?;
                f.write_str(")")
            }
            Value::Char(v) => write!(f, "{}({:?})", name, v),
            Value::Timestamp(v) => write!(f, "{}({})", name, v.milliseconds()),
            Value::Uuid(v) => write!(f, "{}({})", name, v),
            Value::Binary(v) => {
                write!(f, "{}(", name)?;
                write_hex(f, v)?;
                f.write_str(")")
            }
            Value::String(v) => write!(f, "{}({:?})", name, v),
            Value::Symbol(v) => write!(f, "{}({:?})", name, v.as_str()),
            Value::List(list) => write!(f, "{}", list),
            Value::Map(map) => {
                write!(f, "{}({{", name)?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("})")
            }
            Value::Array(array) => {
                write!(f, "{}([", name)?;
                for (i, value) in array.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("])")
            }
        }
    }
}

macro_rules! impl_from_for_value {
    ($variant:ident, $variant_ty:ty) => {
        impl From<$variant_ty> for Value {
            fn from(val: $variant_ty) -> Self {
                Self::$variant(val)
            }
        }
    };

    ($($variant:ident, $variant_ty:ty),*) => {
        $(impl_from_for_value!($variant, $variant_ty);)*
    }
}

impl_from_for_value! {
    Bool, bool,
    UByte, u8,
    UShort, u16,
    UInt, u32,
    ULong, u64,
    Byte, i8,
    Short, i16,
    Int, i32,
    Long, i64,
    Float, OrderedFloat<f32>,
    Double, OrderedFloat<f64>,
    Decimal32, Dec32,
    Decimal64, Dec64,
    Decimal128, Dec128,
    Char, char,
    Timestamp, Timestamp,
    Uuid, Uuid,
    Binary, ByteBuf,
    String, String,
    Symbol, Symbol,
    List, List
}

impl From<Described<Value>> for Value {
    fn from(value: Described<Value>) -> Self {
        Self::Described(Box::new(value))
    }
}

impl From<f32> for Value {
    fn from(val: f32) -> Self {
        Self::Float(OrderedFloat::from(val))
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Self::Double(OrderedFloat::from(val))
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Self::String(val.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

impl<T> From<Array<T>> for Value
where
    T: Into<Value>,
{
    fn from(values: Array<T>) -> Self {
        let v = values.0.into_iter().map(Into::into).collect();
        Self::Array(Array(v))
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(values: Vec<T>) -> Self {
        Value::List(List::from_values(values))
    }
}

impl<K, V> From<BTreeMap<K, V>> for Value
where
    K: Into<Value>,
    V: Into<Value>,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        let map: IndexMap<_, _> = map.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Value::Map(OrderedMap::from(map))
    }
}

impl<K, V> From<OrderedMap<K, V>> for Value
where
    K: Into<Value>,
    V: Into<Value>,
{
    fn from(map: OrderedMap<K, V>) -> Self {
        let map = map.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Value::Map(map)
    }
}

macro_rules! impl_try_from_for_value_variant {
    ($variant:ident, $variant_ty:ty) => {
        impl TryFrom<Value> for $variant_ty {
            type Error = Value;

            fn try_from(val: Value) -> Result<Self, Self::Error> {
                match val {
                    Value::$variant(inner) => Ok(inner),
                    _ => Err(val)
                }
            }
        }
    };

    ($($variant:ident, $variant_ty:ty),*) => {
        $(impl_try_from_for_value_variant!($variant, $variant_ty);)*
    }
}

impl_try_from_for_value_variant! {
    Bool, bool,
    UByte, u8,
    UShort, u16,
    UInt, u32,
    ULong, u64,
    Byte, i8,
    Short, i16,
    Int, i32,
    Long, i64,
    Float, OrderedFloat<f32>,
    Double, OrderedFloat<f64>,
    Decimal32, Dec32,
    Decimal64, Dec64,
    Decimal128, Dec128,
    Char, char,
    Timestamp, Timestamp,
    Uuid, Uuid,
    Binary, ByteBuf,
    String, String,
    Symbol, Symbol,
    List, List,
    Map, OrderedMap<Value, Value>,
    Array, Array<Value>
}

impl TryFrom<Value> for f32 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(val) => Ok(val.0),
            _ => Err(value),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Double(val) => Ok(val.0),
            _ => Err(value),
        }
    }
}

impl TryFrom<Value> for Described<Value> {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Described(val) => Ok(*val),
            _ => Err(value),
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(long) = n.as_i64() {
                    Value::Long(long)
                } else if let Some(ulong) = n.as_u64() {
                    Value::ULong(ulong)
                } else {
                    Value::Double(OrderedFloat::from(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(a) => Value::List(a.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(o) => {
                let map = o
                    .into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from(v)))
                    .collect();
                Value::Map(map)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ordered_float::OrderedFloat;

    use serde_bytes::ByteBuf;

    use crate::described::Described;
    use crate::descriptor::Descriptor;
    use crate::primitives::{Array, PrimitiveKind, Symbol, Timestamp};
    use crate::{from_slice, to_vec, Error, List, Value};

    #[test]
    fn test_value_try_new_checks_range() {
        assert_eq!(
            Value::try_new(PrimitiveKind::UShort, 456),
            Ok(Value::UShort(456))
        );
        assert_eq!(
            Value::try_new(PrimitiveKind::UShort, 65536),
            Err(Error::Validation {
                expected: "ushort (0..=65535)".into(),
                found: "integer 65536".into()
            })
        );
        assert!(Value::try_new(PrimitiveKind::UByte, -1).is_err());
        assert!(Value::try_new(PrimitiveKind::Byte, -128).is_ok());
        assert!(Value::try_new(PrimitiveKind::ULong, u64::MAX).is_ok());
    }

    #[test]
    fn test_value_try_new_checks_kind() {
        let err = Value::try_new(PrimitiveKind::Int, "12").unwrap_err();
        assert_eq!(
            err,
            Error::Validation {
                expected: "int".into(),
                found: "string \"12\"".into()
            }
        );
        assert!(Value::try_new(PrimitiveKind::Symbol, "naïve").is_err());
        assert!(Value::try_new(PrimitiveKind::Char, 0xD800u32).is_err());
        assert_eq!(
            Value::try_new(PrimitiveKind::Char, 0x41u32),
            Ok(Value::Char('A'))
        );
    }

    #[test]
    fn test_value_try_new_timestamp_is_signed_64() {
        assert_eq!(
            Value::try_new(PrimitiveKind::Timestamp, i64::MIN),
            Ok(Value::Timestamp(Timestamp::from_milliseconds(i64::MIN)))
        );
        assert!(Value::try_new(PrimitiveKind::Timestamp, i128::from(i64::MAX) + 1).is_err());
    }

    #[test]
    fn test_value_try_new_float_range() {
        assert_eq!(
            Value::try_new(PrimitiveKind::Float, 1.5f64),
            Ok(Value::Float(OrderedFloat(1.5)))
        );
        assert!(Value::try_new(PrimitiveKind::Float, f64::MAX).is_err());
    }

    #[test]
    fn test_value_from_native_never_narrows() {
        assert_eq!(Value::from_native(7u8), Ok(Value::Long(7)));
        assert_eq!(Value::from_native(1.5f32), Ok(Value::Double(OrderedFloat(1.5))));
        assert_eq!(Value::from_native(u64::MAX), Ok(Value::ULong(u64::MAX)));
        assert_eq!(Value::from_native("hi"), Ok(Value::String("hi".into())));
        assert!(Value::from_native(i128::MAX).is_err());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::UShort(456).to_string(), "ushort(456)");
        assert_eq!(Value::from("hello").to_string(), "string(\"hello\")");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(
            Value::Symbol(Symbol::from("amqp")).to_string(),
            "symbol(\"amqp\")"
        );
        let list = List::from_values([Value::Long(1), Value::Null]);
        assert_eq!(Value::List(list).to_string(), "List(long(1), null)");
    }

    #[test]
    fn test_value_serde_keeps_variant() {
        let values = vec![
            Value::Float(OrderedFloat(-0.5)),
            Value::Double(OrderedFloat(3.25)),
            Value::Binary(ByteBuf::from(vec![1u8, 2, 3])),
            Value::Symbol(Symbol::from("amqp:accepted:list")),
            Value::UInt(0),
            Value::Char('λ'),
            Value::Array(Array::from(vec![Value::Short(-1), Value::Short(2)])),
            Value::Described(Box::new(Described::new(
                Descriptor::Code(0x24),
                Value::List(List::new()),
            ))),
        ];
        for value in values {
            let buf = to_vec(&value).unwrap();
            assert_eq!(from_slice::<Value>(&buf).unwrap(), value);
        }
    }

    #[test]
    fn test_value_rejects_unknown_format_code() {
        assert!(from_slice::<Value>(&[0x10]).is_err());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_value_from_json() {
        let json = serde_json::json!({"a": 1, "b": [true, null]});
        let value = Value::from(json);
        let map = match value {
            Value::Map(map) => map,
            _ => panic!("expecting map"),
        };
        assert_eq!(map.get(&Value::from("a")), Some(&Value::Long(1)));
    }
}
