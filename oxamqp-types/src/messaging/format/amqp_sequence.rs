use std::fmt::Display;

use oxamqp_codec::{list::List, Error, Value};

use super::{described_section, section_body, Section, SectionKind};

/// 3.2.7 AMQP Sequence
/// <type name="amqp-sequence" class="restricted" source="list" provides="section">
///     <descriptor name="amqp:amqp-sequence:list" code="0x00000000:0x00000076"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AmqpSequence(pub List);

impl AmqpSequence {
    /// Creates a sequence section from its items
    pub fn new<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self(List::from_values(items))
    }
}

impl From<List> for AmqpSequence {
    fn from(value: List) -> Self {
        Self(value)
    }
}

impl Display for AmqpSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt_with_name("AmqpSequence", f)
    }
}

impl Section for AmqpSequence {
    const KIND: SectionKind = SectionKind::AmqpSequence;

    fn into_section_value(self) -> Result<Value, Error> {
        Ok(described_section(Self::KIND, Value::List(self.0)))
    }

    fn from_section_value(value: Value) -> Result<Self, Error> {
        match section_body(Self::KIND, value)? {
            Value::List(list) => Ok(Self(list)),
            other => Err(Error::Validation {
                expected: "list".to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AmqpSequence;

    #[test]
    fn test_display_amqp_sequence() {
        let sequence = AmqpSequence::new([1i32, 2]);
        assert_eq!(sequence.to_string(), "AmqpSequence(int(1), int(2))");
    }
}
