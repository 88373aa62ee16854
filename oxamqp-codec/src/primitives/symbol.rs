use std::borrow::Borrow;
use std::fmt::Display;
use std::ops::Deref;

use serde::{de, ser};

use crate::{__constants::SYMBOL, error::Error};

/// Symbolic values from a constrained domain.
///
/// encoding name = "sym8", encoding code = 0xa3,
/// category = variable, width = 1
/// label="up to 2^8 - 1 seven bit ASCII characters representing a symbolic value"
///
/// encoding name = "sym32", encoding code = 0xb3
/// category = variable, width = 4
/// label="up to 2^32 - 1 seven bit ASCII characters representing a symbolic value"
///
/// The `From` conversions do not check the character set so that symbols can be
/// written inline. The charset is checked by [`Symbol::try_new`] and again when the
/// symbol is encoded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(pub String);

impl Symbol {
    /// Creates a new [`Symbol`] without checking the character set
    pub fn new(val: impl Into<String>) -> Self {
        Self(val.into())
    }

    /// Creates a new [`Symbol`], failing if `val` contains non-ASCII characters
    pub fn try_new(val: impl Into<String>) -> Result<Self, Error> {
        let symbol = Self(val.into());
        symbol.validate()?;
        Ok(symbol)
    }

    /// Check that the symbol only holds seven bit ASCII characters
    pub fn validate(&self) -> Result<(), Error> {
        match self.0.is_ascii() {
            true => Ok(()),
            false => Err(Error::validation(
                "symbol (seven bit ASCII)",
                format!("{:?}", self.0),
            )),
        }
    }

    /// Consume the wrapper into the inner string
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the inner value as str
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Symbol {
    fn from(val: String) -> Self {
        Self(val)
    }
}

impl From<&str> for Symbol {
    fn from(val: &str) -> Self {
        Self(val.into())
    }
}

impl Deref for Symbol {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ser::Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_newtype_struct(SYMBOL, self.as_str())
    }
}

struct Visitor;

impl<'de> de::Visitor<'de> for Visitor {
    type Value = Symbol;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("struct Symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Symbol::try_new(v).map_err(de::Error::custom)
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Symbol::try_new(v).map_err(de::Error::custom)
    }
}

impl<'de> de::Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_newtype_struct(SYMBOL, Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::Symbol;

    #[test]
    fn non_ascii_symbol_is_rejected() {
        assert!(Symbol::try_new("x-opt-ok").is_ok());
        assert!(Symbol::try_new("x-opt-é").is_err());
    }
}
