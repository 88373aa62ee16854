//! Custom structs that hold bytes for decimal types

use std::convert::TryFrom;

use serde::{de, ser};

use crate::__constants::{DECIMAL128, DECIMAL32, DECIMAL64};
use crate::error::Error;
use crate::fixed_width::{DECIMAL128_WIDTH, DECIMAL32_WIDTH, DECIMAL64_WIDTH};

macro_rules! impl_decimal {
    ($(#[$attr:meta])* $name:ident, $width:ident, $magic:ident, $label:literal) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; $width]);

        impl $name {
            /// Consume the wrapper into the inner bytes
            pub fn into_inner(self) -> [u8; $width] {
                self.0
            }

            /// Get a reference to the inner bytes
            pub fn as_bytes(&self) -> &[u8; $width] {
                &self.0
            }
        }

        impl From<[u8; $width]> for $name {
            fn from(val: [u8; $width]) -> Self {
                Self(val)
            }
        }

        impl From<$name> for [u8; $width] {
            fn from(val: $name) -> Self {
                val.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = Error;

            fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
                let buf = <[u8; $width]>::try_from(value).map_err(|_| {
                    Error::validation(
                        concat!($label, " (", stringify!($width), ")"),
                        format!("{} bytes", value.len()),
                    )
                })?;
                Ok(Self(buf))
            }
        }

        impl ser::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ser::Serializer,
            {
                serializer.serialize_newtype_struct($magic, serde_bytes::Bytes::new(&self.0))
            }
        }

        impl<'de> de::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: de::Deserializer<'de>,
            {
                struct Visitor;

                impl<'de> de::Visitor<'de> for Visitor {
                    type Value = $name;

                    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                        formatter.write_str(concat!("struct ", stringify!($name)))
                    }

                    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
                    where
                        E: de::Error,
                    {
                        $name::try_from(v).map_err(de::Error::custom)
                    }
                }

                deserializer.deserialize_newtype_struct($magic, Visitor)
            }
        }
    };
}

impl_decimal!(
    /// 32-bit decimal number (IEEE 754-2008 decimal32).
    ///
    /// encoding name = "ieee-754", encoding code = 0x74
    /// category = fixed, width = 4
    /// label = "IEEE 754-2008 decimal32 using the Binary Integer Decimal encoding"
    Dec32,
    DECIMAL32_WIDTH,
    DECIMAL32,
    "decimal32 bytes"
);

impl_decimal!(
    /// 64-bit decimal number (IEEE 754-2008 decimal64).
    ///
    /// encoding name = "ieee-754", encoding code = 0x84
    /// category = fixed, width = 8
    /// label = "IEEE 754-2008 decimal64 using the Binary Integer Decimal encoding"
    Dec64,
    DECIMAL64_WIDTH,
    DECIMAL64,
    "decimal64 bytes"
);

impl_decimal!(
    /// 128-bit decimal number (IEEE 754-2008 decimal128).
    ///
    /// encoding name = "ieee-754", encoding code = 0x94
    /// category = fixed, width = 16
    /// label = "IEEE 754-2008 decimal128 using the Binary Integer Decimal encoding"
    Dec128,
    DECIMAL128_WIDTH,
    DECIMAL128,
    "decimal128 bytes"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_rejects_wrong_width() {
        assert!(Dec32::try_from(&[1u8, 2, 3, 4][..]).is_ok());
        let err = Dec64::try_from(&[1u8, 2, 3][..]).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
