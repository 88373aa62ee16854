use std::fmt::Display;

use oxamqp_codec::{primitives::Binary, Error, Value};

use super::{described_section, section_body, Section, SectionKind};

/// 3.2.6 Data
/// <type name="data" class="restricted" source="binary" provides="section">
///     <descriptor name="amqp:data:binary" code="0x00000000:0x00000075"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Data(pub Binary);

impl Data {
    /// Creates a data section holding `bytes`
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Binary::from(bytes.into()))
    }
}

impl From<Vec<u8>> for Data {
    fn from(value: Vec<u8>) -> Self {
        Self(Binary::from(value))
    }
}

impl From<Binary> for Data {
    fn from(value: Binary) -> Self {
        Self(value)
    }
}

impl Display for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Data(Binary(len={}))", self.0.len())
    }
}

impl Section for Data {
    const KIND: SectionKind = SectionKind::Data;

    fn into_section_value(self) -> Result<Value, Error> {
        Ok(described_section(Self::KIND, Value::Binary(self.0)))
    }

    fn from_section_value(value: Value) -> Result<Self, Error> {
        match section_body(Self::KIND, value)? {
            Value::Binary(bytes) => Ok(Self(bytes)),
            other => Err(Error::Validation {
                expected: "binary".to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }
}
