use std::ops::{Deref, DerefMut};

use oxamqp_codec::{
    described::Described,
    primitives::{Binary, OrderedMap, Symbol, Uuid},
    value::Value,
    Error,
};

pub mod map_builder;
use map_builder::MapBuilder;

mod section;
pub use section::{Section, SectionKind};

/// 3.2.1 Header
pub mod header;
pub use header::{Header, Priority};

/// 3.2.4 Properties
pub mod properties;
pub use properties::Properties;

/// 3.2.6 - 3.2.8 Body sections
mod data;
pub use data::Data;

mod amqp_sequence;
pub use amqp_sequence::AmqpSequence;

mod amqp_value;
pub use amqp_value::AmqpValue;

/// 3.2.10 Annotations
/// <type name="annotations" class="restricted" source="map"/>
pub type Annotations = OrderedMap<Symbol, Value>;

/// Unwraps a described section value, checking its descriptor
pub(crate) fn section_body(kind: SectionKind, value: Value) -> Result<Value, Error> {
    match value {
        Value::Described(described) if kind.matches(&described.descriptor) => Ok(described.value),
        Value::Described(described) => Err(Error::Validation {
            expected: kind.name().to_string(),
            found: described.descriptor.to_string(),
        }),
        other => Err(Error::Validation {
            expected: kind.name().to_string(),
            found: other.to_string(),
        }),
    }
}

pub(crate) fn described_section(kind: SectionKind, value: Value) -> Value {
    Value::from(Described::new(kind.descriptor(), value))
}

fn map_from_value<K>(
    kind: SectionKind,
    value: Value,
    key: impl Fn(Value) -> Result<K, Value>,
) -> Result<OrderedMap<K, Value>, Error>
where
    K: std::hash::Hash + Eq,
{
    let invalid = |found: Value| Error::Validation {
        expected: format!("{} entry", kind.name()),
        found: found.to_string(),
    };
    match section_body(kind, value)? {
        Value::Map(map) => map
            .into_iter()
            .map(|(k, v)| key(k).map(|k| (k, v)).map_err(invalid))
            .collect(),
        other => Err(invalid(other)),
    }
}

macro_rules! map_section {
    (
        $(#[$attr:meta])*
        $name:ident($key:ty), $kind:ident, $key_variant:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name(pub OrderedMap<$key, Value>);

        impl $name {
            /// Creates a builder
            pub fn builder() -> MapBuilder<$key, Value, Self> {
                MapBuilder::new()
            }
        }

        impl From<OrderedMap<$key, Value>> for $name {
            fn from(map: OrderedMap<$key, Value>) -> Self {
                Self(map)
            }
        }

        impl Deref for $name {
            type Target = OrderedMap<$key, Value>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl Section for $name {
            const KIND: SectionKind = SectionKind::$kind;

            fn into_section_value(self) -> Result<Value, Error> {
                check_entries(Self::KIND, &self.0)?;
                let map = self
                    .0
                    .into_iter()
                    .map(|(k, v)| (Value::$key_variant(k.into()), v))
                    .collect();
                Ok(described_section(Self::KIND, Value::Map(map)))
            }

            fn from_section_value(value: Value) -> Result<Self, Error> {
                map_from_value(Self::KIND, value, |key| match key {
                    Value::$key_variant(key) => Ok(key.into()),
                    other => Err(other),
                })
                .map(Self)
            }
        }
    };
}

/// Application properties only carry simple values. Annotation values are
/// unrestricted.
fn check_entries<K>(kind: SectionKind, map: &OrderedMap<K, Value>) -> Result<(), Error> {
    if kind != SectionKind::ApplicationProperties {
        return Ok(());
    }
    for value in map.values() {
        if matches!(
            value,
            Value::Described(_) | Value::List(_) | Value::Map(_) | Value::Array(_)
        ) {
            return Err(Error::Validation {
                expected: "application property of a simple type".to_string(),
                found: value.type_name().to_string(),
            });
        }
    }
    Ok(())
}

map_section! {
    /// 3.2.2 Delivery Annotations
    /// <type name="delivery-annotations" class="restricted" source="annotations" provides="section">
    ///     <descriptor name="amqp:delivery-annotations:map" code="0x00000000:0x00000071"/>
    /// </type>
    DeliveryAnnotations(Symbol), DeliveryAnnotations, Symbol
}

map_section! {
    /// 3.2.3 Message Annotations
    /// <type name="message-annotations" class="restricted" source="annotations" provides="section">
    ///     <descriptor name="amqp:message-annotations:map" code="0x00000000:0x00000072"/>
    /// </type>
    MessageAnnotations(Symbol), MessageAnnotations, Symbol
}

map_section! {
    /// 3.2.5 Application Properties
    /// <type name="application-properties" class="restricted" source="map" provides="section">
    ///     <descriptor name="amqp:application-properties:map" code="0x00000000:0x00000074"/>
    /// </type>
    ApplicationProperties(String), ApplicationProperties, String
}

map_section! {
    /// 3.2.9 Footer
    /// Transport footers for a message.
    /// <type name="footer" class="restricted" source="annotations" provides="section">
    ///     <descriptor name="amqp:footer:map" code="0x00000000:0x00000078"/>
    /// </type>
    ///
    /// Entries keep their insertion order.
    Footer(Symbol), Footer, Symbol
}

/// 3.2.11 - 3.2.14 Message ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageId {
    /// 3.2.11 Message ID ULong
    /// <type name="message-id-ulong" class="restricted" source="ulong" provides="message-id"/>
    ULong(u64),

    /// 3.2.12 Message ID UUID
    /// <type name="message-id-uuid" class="restricted" source="uuid" provides="message-id"/>
    Uuid(Uuid),

    /// 3.2.13 Message ID Binary
    /// <type name="message-id-binary" class="restricted" source="binary" provides="message-id"/>
    Binary(Binary),

    /// 3.2.14 Message ID String
    /// <type name="message-id-string" class="restricted" source="string" provides="message-id"/>
    String(String),
}

impl From<u64> for MessageId {
    fn from(value: u64) -> Self {
        Self::ULong(value)
    }
}

impl From<Uuid> for MessageId {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<Binary> for MessageId {
    fn from(value: Binary) -> Self {
        Self::Binary(value)
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<MessageId> for Value {
    fn from(value: MessageId) -> Self {
        match value {
            MessageId::ULong(v) => Value::ULong(v),
            MessageId::Uuid(v) => Value::Uuid(v),
            MessageId::Binary(v) => Value::Binary(v),
            MessageId::String(v) => Value::String(v),
        }
    }
}

impl TryFrom<Value> for MessageId {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::ULong(v) => Ok(MessageId::ULong(v)),
            Value::Uuid(v) => Ok(MessageId::Uuid(v)),
            Value::Binary(v) => Ok(MessageId::Binary(v)),
            Value::String(v) => Ok(MessageId::String(v)),
            other => Err(other),
        }
    }
}

/// 3.2.15 Address String
/// Address of a node.
/// <type name="address-string" class="restricted" source="string" provides="address"/>
pub type Address = String;

/// 3.2.16 CONSTANTS
pub const MESSAGE_FORMAT: u32 = 0;

#[cfg(test)]
mod tests {
    use oxamqp_codec::{format_code::EncodingCodes, from_slice, to_vec, Value};

    use super::{ApplicationProperties, Footer, MessageAnnotations, Section};

    #[test]
    fn test_footer_keeps_insertion_order() {
        let footer = Footer::builder()
            .insert("z", Value::Long(1))
            .insert("a", Value::Long(2))
            .build();
        let keys: Vec<_> = footer.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn test_serialize_message_annotations() {
        let annotations = MessageAnnotations::builder()
            .insert("x-opt-a", Value::Bool(true))
            .build();
        let buf = to_vec(&annotations.into_section_value().unwrap()).unwrap();
        let mut expected = vec![
            EncodingCodes::DescribedType as u8,
            EncodingCodes::SmallULong as u8,
            0x72,
            EncodingCodes::Map8 as u8,
            11,
            2,
            EncodingCodes::Sym8 as u8,
            7,
        ];
        expected.extend_from_slice(b"x-opt-a");
        expected.push(EncodingCodes::BooleanTrue as u8);
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_application_properties_round_trip() {
        let props = ApplicationProperties::builder()
            .insert("count", Value::Int(3))
            .insert("name", Value::from("x"))
            .build();
        let buf = to_vec(&props.clone().into_section_value().unwrap()).unwrap();
        let decoded = ApplicationProperties::from_section_value(from_slice(&buf).unwrap()).unwrap();
        assert_eq!(props, decoded);
    }

    #[test]
    fn test_application_properties_reject_compound_values() {
        let props = ApplicationProperties::builder()
            .insert("list", Value::from(vec![1i64]))
            .build();
        assert!(props.into_section_value().is_err());
    }

    #[test]
    fn test_section_with_other_descriptor_is_rejected() {
        let footer = Footer::default().into_section_value().unwrap();
        assert!(MessageAnnotations::from_section_value(footer).is_err());
    }
}
