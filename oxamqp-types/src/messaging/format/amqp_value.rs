use std::fmt::Display;

use oxamqp_codec::{Error, Value};

use super::{described_section, section_body, Section, SectionKind};

/// 3.2.8 AMQP Value
/// <type name="amqp-value" class="restricted" source="*" provides="section">
///     <descriptor name="amqp:amqp-value:*" code="0x00000000:0x00000077"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AmqpValue(pub Value);

impl<T: Into<Value>> From<T> for AmqpValue {
    fn from(value: T) -> Self {
        Self(value.into())
    }
}

impl Display for AmqpValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AmqpValue({})", self.0)
    }
}

impl Section for AmqpValue {
    const KIND: SectionKind = SectionKind::AmqpValue;

    fn into_section_value(self) -> Result<Value, Error> {
        Ok(described_section(Self::KIND, self.0))
    }

    fn from_section_value(value: Value) -> Result<Self, Error> {
        section_body(Self::KIND, value).map(Self)
    }
}
