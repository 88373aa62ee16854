//! Descriptors of described types

use std::fmt::Display;

use serde::{de, ser};

use crate::{__constants::DESCRIPTOR, format_code::EncodingCodes, primitives::Symbol};

/// Descriptor of a described type
///
/// On the wire a descriptor is either a symbol or a `ulong` code. The code
/// is formed from a 32-bit domain id and a 32-bit descriptor id.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Descriptor {
    /// Symbolic name
    Name(Symbol),

    /// Numeric code
    Code(u64),
}

impl Descriptor {
    /// Creates a [`Descriptor::Name`]
    pub fn name(name: impl Into<Symbol>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a [`Descriptor::Code`]
    pub fn code(code: u64) -> Self {
        Self::Code(code)
    }

    /// Creates a [`Descriptor::Code`] from a domain id and a descriptor id
    pub fn from_domain(domain: u32, id: u32) -> Self {
        Self::Code(descriptor_code(domain, id))
    }
}

/// Combines a domain id and a descriptor id into a 64-bit descriptor code
pub const fn descriptor_code(domain: u32, id: u32) -> u64 {
    ((domain as u64) << 32) | id as u64
}

impl From<Symbol> for Descriptor {
    fn from(val: Symbol) -> Self {
        Self::Name(val)
    }
}

impl From<u64> for Descriptor {
    fn from(val: u64) -> Self {
        Self::Code(val)
    }
}

impl Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Descriptor::Name(name) => write!(f, "{}", name),
            Descriptor::Code(code) => {
                write!(f, "0x{:08x}:0x{:08x}", code >> 32, code & 0xffff_ffff)
            }
        }
    }
}

impl ser::Serialize for Descriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            Descriptor::Name(value) => {
                serializer.serialize_newtype_variant(DESCRIPTOR, 0, "Name", value)
            }
            Descriptor::Code(value) => {
                serializer.serialize_newtype_variant(DESCRIPTOR, 1, "Code", value)
            }
        }
    }
}

// The variant is picked from the format code that follows the 0x00
enum Field {
    Name,
    Code,
}

struct FieldVisitor;

impl<'de> de::Visitor<'de> for FieldVisitor {
    type Value = Field;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("variant identifier")
    }

    fn visit_u8<E>(self, v: u8) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match EncodingCodes::try_from(v).map_err(de::Error::custom)? {
            EncodingCodes::Sym8 | EncodingCodes::Sym32 => Ok(Field::Name),
            EncodingCodes::ULong | EncodingCodes::SmallULong | EncodingCodes::ULong0 => {
                Ok(Field::Code)
            }
            code => Err(de::Error::custom(format!(
                "Invalid descriptor format code {}",
                code
            ))),
        }
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
    type Value = Descriptor;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("enum Descriptor")
    }

    fn visit_enum<A>(self, data: A) -> Result<Self::Value, A::Error>
    where
        A: de::EnumAccess<'de>,
    {
        use de::VariantAccess;
        let (field, variant) = data.variant()?;
        match field {
            Field::Name => variant.newtype_variant().map(Descriptor::Name),
            Field::Code => variant.newtype_variant().map(Descriptor::Code),
        }
    }
}

impl<'de> de::Deserialize<'de> for Descriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        const VARIANTS: &[&str] = &["Name", "Code"];
        deserializer.deserialize_enum(DESCRIPTOR, VARIANTS, Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::Descriptor;

    #[test]
    fn domain_and_id_form_the_code() {
        assert_eq!(
            Descriptor::from_domain(0x0000_0000, 0x0000_0026),
            Descriptor::Code(0x26)
        );
        assert_eq!(
            Descriptor::from_domain(0x0000_0137, 0x0000_0001),
            Descriptor::Code(0x0000_0137_0000_0001)
        );
        assert_eq!(
            Descriptor::Code(0x26).to_string(),
            "0x00000000:0x00000026"
        );
    }
}
