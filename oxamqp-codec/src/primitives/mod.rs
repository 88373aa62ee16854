//! Definition of the primitive types

mod array;
mod decimal;
mod map;
mod symbol;
mod timestamp;
mod uuid;

use std::fmt::Display;

pub use crate::primitives::array::*;
pub use crate::primitives::decimal::*;
pub use crate::primitives::map::*;
pub use crate::primitives::symbol::*;
pub use crate::primitives::timestamp::*;
pub use crate::primitives::uuid::*;

use serde_bytes::ByteBuf;

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
pub type Boolean = bool;

/// Integer in the range 0 to 2^8-1 inclusive
///
/// encoding code = 0x50,
/// category = fixed, width = 1
/// label = "8-bit unsigned integer"
pub type UByte = u8;

/// Integer in the range 0 to 2^16-1 inclusive
///
/// encoding code = 0x60,
/// category = fixed, width = 2
/// label = "16-bit unsigned integer in network byte order"
pub type UShort = u16;

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
pub type UInt = u32;

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
pub type ULong = u64;

/// Integer in the range -(2^7) to 2^7-1 inclusive
///
/// encoding code = 0x51,
/// category = fixed, width = 1
/// label = "8-bit two's-complement integer"
pub type Byte = i8;

/// Integer in the range -(2^15) to 2^15-1 inclusive
///
/// encoding code = 0x61,
/// category = fixed, width = 2
/// label = "16-bit two’s-complement integer in network byte order"
pub type Short = i16;

/// Integer in the range -(2^31) to 2^31-1 inclusive
///
/// encoding code = 0x71,
/// category = fixed, width = 4
/// label = "32-bit two’s-complement integer in network byte order"
///
/// encoding name = "smallint", encoding code = 0x54
/// category = fixed, width = 1
/// label = "8-bit two’s-complement integer"
pub type Int = i32;

/// Integer in the range -(2^63) to 2^63-1 inclusive
///
/// encoding code = 0x81,
/// category = fixed, width = 8
/// label = "64-bit two’s-complement integer in network byte order"
///
/// encoding name = "smalllong", encoding code = 0x55
/// category = fixed, width = 1
/// label = "8-bit two’s-complement integer"
pub type Long = i64;

/// 32-bit floating point number (IEEE 754-2008 binary32)
pub type Float = f32;

/// 64-bit floating point number (IEEE 754-2008 binary64).
pub type Double = f64;

/// A sequence of octets.
///
/// encoding name = "vbin8", encoding code = 0xa0
/// category = variable, width = 1
/// label = "up to 2^8 - 1 octets of binary data"
///
/// encoding name = "vbin32", encoding code = 0xb0,
/// category = variable, width = 4,
/// label="up to 2^32 - 1 octets of binary data"
pub type Binary = ByteBuf;

/// The scalar kinds a [`Native`] value can be validated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PrimitiveKind {
    Null,
    Boolean,
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
}

impl PrimitiveKind {
    /// The AMQP type name
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Null => "null",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::UByte => "ubyte",
            PrimitiveKind::UShort => "ushort",
            PrimitiveKind::UInt => "uint",
            PrimitiveKind::ULong => "ulong",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Decimal32 => "decimal32",
            PrimitiveKind::Decimal64 => "decimal64",
            PrimitiveKind::Decimal128 => "decimal128",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Timestamp => "timestamp",
            PrimitiveKind::Uuid => "uuid",
            PrimitiveKind::Binary => "binary",
            PrimitiveKind::String => "string",
            PrimitiveKind::Symbol => "symbol",
        }
    }
}

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An ergonomic native value that has not been given an AMQP width yet.
///
/// Integers are carried as `i128` so that both the full `ulong` and `long`
/// ranges can be checked without loss.
#[derive(Debug, Clone, PartialEq)]
pub enum Native {
    /// No value
    Null,

    /// A boolean
    Bool(bool),

    /// Any integer
    Int(i128),

    /// Any floating point number
    Float(f64),

    /// A single character
    Char(char),

    /// A string
    Str(String),

    /// A byte string
    Bytes(Vec<u8>),
}

impl Native {
    pub(crate) fn describe(&self) -> String {
        match self {
            Native::Null => String::from("null"),
            Native::Bool(b) => format!("bool {}", b),
            Native::Int(i) => format!("integer {}", i),
            Native::Float(v) => format!("float {}", v),
            Native::Char(c) => format!("char {:?}", c),
            Native::Str(s) => format!("string {:?}", s),
            Native::Bytes(b) => format!("{} bytes", b.len()),
        }
    }
}

impl From<()> for Native {
    fn from(_: ()) -> Self {
        Native::Null
    }
}

impl From<bool> for Native {
    fn from(val: bool) -> Self {
        Native::Bool(val)
    }
}

macro_rules! impl_from_int_for_native {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Native {
                fn from(val: $ty) -> Self {
                    Native::Int(i128::from(val))
                }
            }
        )*
    };
}

impl_from_int_for_native!(u8, u16, u32, u64, i8, i16, i32, i64, i128);

impl From<f32> for Native {
    fn from(val: f32) -> Self {
        Native::Float(f64::from(val))
    }
}

impl From<f64> for Native {
    fn from(val: f64) -> Self {
        Native::Float(val)
    }
}

impl From<char> for Native {
    fn from(val: char) -> Self {
        Native::Char(val)
    }
}

impl From<&str> for Native {
    fn from(val: &str) -> Self {
        Native::Str(val.to_string())
    }
}

impl From<String> for Native {
    fn from(val: String) -> Self {
        Native::Str(val)
    }
}

impl From<Vec<u8>> for Native {
    fn from(val: Vec<u8>) -> Self {
        Native::Bytes(val)
    }
}

impl From<&[u8]> for Native {
    fn from(val: &[u8]) -> Self {
        Native::Bytes(val.to_vec())
    }
}
