//! Immutable properties of the message

use oxamqp_codec::{
    composite::{Composite, CompositeType, FieldSpec, Fields},
    primitives::{Binary, Symbol, Timestamp},
    Error, Value,
};

use crate::definitions::SequenceNo;

use super::{Address, MessageId, Section, SectionKind};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("message-id"),
    FieldSpec::optional("user-id"),
    FieldSpec::optional("to"),
    FieldSpec::optional("subject"),
    FieldSpec::optional("reply-to"),
    FieldSpec::optional("correlation-id"),
    FieldSpec::optional("content-type"),
    FieldSpec::optional("content-encoding"),
    FieldSpec::optional("absolute-expiry-time"),
    FieldSpec::optional("creation-time"),
    FieldSpec::optional("group-id"),
    FieldSpec::optional("group-sequence"),
    FieldSpec::optional("reply-to-group-id"),
];

/// 3.2.4 Properties
/// Immutable properties of the message.
/// <type name="properties" class="composite" source="list" provides="section">
///     <descriptor name="amqp:properties:list" code="0x00000000:0x00000073"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    /// <field name="message-id" type="*" requires="message-id"/>
    pub message_id: Option<MessageId>,

    /// <field name="user-id" type="binary"/>
    pub user_id: Option<Binary>,

    /// <field name="to" type="*" requires="address"/>
    pub to: Option<Address>,

    /// <field name="subject" type="string"/>
    pub subject: Option<String>,

    /// <field name="reply-to" type="*" requires="address"/>
    pub reply_to: Option<Address>,

    /// <field name="correlation-id" type="*" requires="message-id"/>
    pub correlation_id: Option<MessageId>,

    /// <field name="content-type" type="symbol"/>
    pub content_type: Option<Symbol>,

    /// <field name="content-encoding" type="symbol"/>
    pub content_encoding: Option<Symbol>,

    /// <field name="absolute-expiry-time" type="timestamp"/>
    pub absolute_expiry_time: Option<Timestamp>,

    /// <field name="creation-time" type="timestamp"/>
    pub creation_time: Option<Timestamp>,

    /// <field name="group-id" type="string"/>
    pub group_id: Option<String>,

    /// <field name="group-sequence" type="sequence-no"/>
    pub group_sequence: Option<SequenceNo>,

    /// <field name="reply-to-group-id" type="string"/>
    pub reply_to_group_id: Option<String>,
}

impl Properties {
    /// Creates a builder for [`Properties`]
    pub fn builder() -> Builder {
        Builder::new()
    }
}

impl Composite for Properties {
    const TYPE: &'static CompositeType =
        &CompositeType::new("amqp:properties:list", 0x0000_0000, 0x0000_0073, FIELDS);

    fn into_fields(self) -> Fields {
        Fields::from_values(
            Self::TYPE,
            [
                self.message_id.map(Value::from),
                self.user_id.map(Value::Binary),
                self.to.map(Value::String),
                self.subject.map(Value::String),
                self.reply_to.map(Value::String),
                self.correlation_id.map(Value::from),
                self.content_type.map(Value::Symbol),
                self.content_encoding.map(Value::Symbol),
                self.absolute_expiry_time.map(Value::Timestamp),
                self.creation_time.map(Value::Timestamp),
                self.group_id.map(Value::String),
                self.group_sequence.map(Value::UInt),
                self.reply_to_group_id.map(Value::String),
            ],
        )
    }

    fn from_fields(mut fields: Fields) -> Result<Self, Error> {
        Ok(Self {
            message_id: fields.take_as(0)?,
            user_id: fields.take_as(1)?,
            to: fields.take_as(2)?,
            subject: fields.take_as(3)?,
            reply_to: fields.take_as(4)?,
            correlation_id: fields.take_as(5)?,
            content_type: fields.take_as(6)?,
            content_encoding: fields.take_as(7)?,
            absolute_expiry_time: fields.take_as(8)?,
            creation_time: fields.take_as(9)?,
            group_id: fields.take_as(10)?,
            group_sequence: fields.take_as(11)?,
            reply_to_group_id: fields.take_as(12)?,
        })
    }
}

impl Section for Properties {
    const KIND: SectionKind = SectionKind::Properties;

    fn into_section_value(self) -> Result<Value, Error> {
        Ok(self.into_value())
    }

    fn from_section_value(value: Value) -> Result<Self, Error> {
        Self::try_from_value(value)
    }
}

/// Builder for [`Properties`]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    inner: Properties,
}

impl Builder {
    /// Creates a new builder for [`Properties`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field `message_id`
    pub fn message_id(mut self, message_id: impl Into<MessageId>) -> Self {
        self.inner.message_id = Some(message_id.into());
        self
    }

    /// Set the field `user_id`
    pub fn user_id(mut self, user_id: impl Into<Vec<u8>>) -> Self {
        self.inner.user_id = Some(Binary::from(user_id.into()));
        self
    }

    /// Set the field `to`
    pub fn to(mut self, to: impl Into<Address>) -> Self {
        self.inner.to = Some(to.into());
        self
    }

    /// Set the field `subject`
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.inner.subject = Some(subject.into());
        self
    }

    /// Set the field `reply_to`
    pub fn reply_to(mut self, reply_to: impl Into<Address>) -> Self {
        self.inner.reply_to = Some(reply_to.into());
        self
    }

    /// Set the field `correlation_id`
    pub fn correlation_id(mut self, correlation_id: impl Into<MessageId>) -> Self {
        self.inner.correlation_id = Some(correlation_id.into());
        self
    }

    /// Set the field `content_type`
    pub fn content_type(mut self, content_type: impl Into<Symbol>) -> Self {
        self.inner.content_type = Some(content_type.into());
        self
    }

    /// Set the field `content_encoding`
    pub fn content_encoding(mut self, content_encoding: impl Into<Symbol>) -> Self {
        self.inner.content_encoding = Some(content_encoding.into());
        self
    }

    /// Set the field `absolute_expiry_time`
    pub fn absolute_expiry_time(mut self, time: impl Into<Timestamp>) -> Self {
        self.inner.absolute_expiry_time = Some(time.into());
        self
    }

    /// Set the field `creation_time`
    pub fn creation_time(mut self, time: impl Into<Timestamp>) -> Self {
        self.inner.creation_time = Some(time.into());
        self
    }

    /// Set the field `group_id`
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.inner.group_id = Some(group_id.into());
        self
    }

    /// Set the field `group_sequence`
    pub fn group_sequence(mut self, group_sequence: SequenceNo) -> Self {
        self.inner.group_sequence = Some(group_sequence);
        self
    }

    /// Set the field `reply_to_group_id`
    pub fn reply_to_group_id(mut self, reply_to_group_id: impl Into<String>) -> Self {
        self.inner.reply_to_group_id = Some(reply_to_group_id.into());
        self
    }

    /// Builds [`Properties`]
    pub fn build(self) -> Properties {
        self.inner
    }
}

impl From<Builder> for Properties {
    fn from(builder: Builder) -> Self {
        builder.build()
    }
}

oxamqp_codec::impl_composite_serde!(Properties);

#[cfg(test)]
mod tests {
    use oxamqp_codec::{composite::Composite, from_slice, to_vec, Value};

    use crate::messaging::MessageId;

    use super::Properties;

    #[test]
    fn test_properties_round_trip() {
        let properties = Properties::builder()
            .message_id(7u64)
            .to("queue-a")
            .content_type("text/plain")
            .group_sequence(3)
            .build();
        let buf = to_vec(&properties.clone().into_value()).unwrap();
        let decoded = Properties::try_from_value(from_slice(&buf).unwrap()).unwrap();
        assert_eq!(properties, decoded);
    }

    #[test]
    fn test_only_set_fields_are_encoded() {
        let properties = Properties::builder().message_id("abc").build();
        let fields = properties.into_fields().into_list();
        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields.get(0).unwrap(),
            &Value::from(MessageId::String("abc".to_string()))
        );
    }
}
