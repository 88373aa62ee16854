//! Implementation of Message as defined in AMQP 1.0 protocol Part 3.2

use oxamqp_codec::{de::Decoder, Error, Value};

use super::{
    AmqpSequence, AmqpValue, ApplicationProperties, Data, DeliveryAnnotations, Footer, Header,
    MessageAnnotations, Properties, Section, SectionKind,
};

mod body;
pub use body::{Body, BodySection, IntoBody};

mod assembler;
pub use assembler::{AssembledMessage, Assembler, FooterCallback};

/// AMQP 1.0 Message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Transport headers for a message.
    pub header: Option<Header>,

    /// The delivery-annotations section is used for delivery-specific
    /// non-standard properties at the head of the message.
    pub delivery_annotations: Option<DeliveryAnnotations>,

    /// The message-annotations section is used for properties of the message
    /// which are aimed at the infrastructure and SHOULD be propagated across
    /// every delivery step
    pub message_annotations: Option<MessageAnnotations>,

    /// Immutable properties of the message.
    pub properties: Option<Properties>,

    /// Structured application data
    pub application_properties: Option<ApplicationProperties>,

    /// The body consists of one of the following three choices: one or more
    /// data sections, one or more amqp-sequence sections, or a single
    /// amqp-value section.
    pub body: Body,

    /// Transport footers for a message.
    pub footer: Option<Footer>,
}

impl Message {
    /// Creates a builder for [`Message`]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Creates a message with only a body
    pub fn new(body: impl IntoBody) -> Result<Self, Error> {
        Self::builder().body(body).build()
    }

    /// The kinds of the sections present, in transmission order
    pub fn section_kinds(&self) -> Vec<SectionKind> {
        let mut kinds = Vec::new();
        if self.header.is_some() {
            kinds.push(SectionKind::Header);
        }
        if self.delivery_annotations.is_some() {
            kinds.push(SectionKind::DeliveryAnnotations);
        }
        if self.message_annotations.is_some() {
            kinds.push(SectionKind::MessageAnnotations);
        }
        if self.properties.is_some() {
            kinds.push(SectionKind::Properties);
        }
        if self.application_properties.is_some() {
            kinds.push(SectionKind::ApplicationProperties);
        }
        match &self.body {
            Body::Data(data) => kinds.extend(data.iter().map(|_| SectionKind::Data)),
            Body::Sequence(seq) => kinds.extend(seq.iter().map(|_| SectionKind::AmqpSequence)),
            Body::Value(_) => kinds.push(SectionKind::AmqpValue),
        }
        if self.footer.is_some() {
            kinds.push(SectionKind::Footer);
        }
        kinds
    }

    /// Converts every section before the footer into its described value,
    /// in transmission order
    pub(crate) fn into_bare_sections(self) -> Result<Vec<(SectionKind, Value)>, Error> {
        fn push<S: Section>(
            sections: &mut Vec<(SectionKind, Value)>,
            section: Option<S>,
        ) -> Result<(), Error> {
            if let Some(section) = section {
                sections.push((S::KIND, section.into_section_value()?));
            }
            Ok(())
        }

        let mut sections = Vec::new();
        push(&mut sections, self.header)?;
        push(&mut sections, self.delivery_annotations)?;
        push(&mut sections, self.message_annotations)?;
        push(&mut sections, self.properties)?;
        push(&mut sections, self.application_properties)?;
        for section in self.body.into_sections() {
            let kind = section.kind();
            sections.push((kind, section.into_section_value()?));
        }
        Ok(sections)
    }

    /// Decodes a message from the concatenated encoding of its sections.
    ///
    /// Sections must appear in transmission order. Only `data` and
    /// `amqp-sequence` may repeat.
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let mut builder = Builder::new();
        let mut body = Vec::new();
        let mut last: Option<SectionKind> = None;

        for value in Decoder::new(bytes) {
            let value = value?;
            let kind = match &value {
                Value::Described(described) => SectionKind::from_descriptor(&described.descriptor)
                    .ok_or_else(|| {
                        Error::Argument(format!("unknown message section {}", described.descriptor))
                    })?,
                other => {
                    return Err(Error::Argument(format!(
                        "expecting a message section, found {}",
                        other
                    )))
                }
            };

            if let Some(last) = last {
                let repeats = matches!(kind, SectionKind::Data | SectionKind::AmqpSequence);
                if kind < last || (kind == last && !repeats) {
                    return Err(Error::Argument(format!(
                        "{} cannot follow {}",
                        kind.name(),
                        last.name()
                    )));
                }
            }
            last = Some(kind);

            match kind {
                SectionKind::Header => builder.header = Some(Header::from_section_value(value)?),
                SectionKind::DeliveryAnnotations => {
                    builder.delivery_annotations =
                        Some(DeliveryAnnotations::from_section_value(value)?)
                }
                SectionKind::MessageAnnotations => {
                    builder.message_annotations =
                        Some(MessageAnnotations::from_section_value(value)?)
                }
                SectionKind::Properties => {
                    builder.properties = Some(Properties::from_section_value(value)?)
                }
                SectionKind::ApplicationProperties => {
                    builder.application_properties =
                        Some(ApplicationProperties::from_section_value(value)?)
                }
                SectionKind::Data | SectionKind::AmqpSequence | SectionKind::AmqpValue => {
                    body.push(BodySection::from_section_value(kind, value)?)
                }
                SectionKind::Footer => builder.footer = Some(Footer::from_section_value(value)?),
            }
        }

        builder.body = Some(Body::try_from_sections(body));
        builder.build()
    }
}

/// Builder for [`Message`]
#[derive(Debug, Default)]
pub struct Builder {
    header: Option<Header>,
    delivery_annotations: Option<DeliveryAnnotations>,
    message_annotations: Option<MessageAnnotations>,
    properties: Option<Properties>,
    application_properties: Option<ApplicationProperties>,
    body: Option<Result<Body, Error>>,
    footer: Option<Footer>,
}

impl Builder {
    /// Creates a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body. Conversion errors are reported by [`Builder::build`].
    pub fn body(mut self, body: impl IntoBody) -> Self {
        self.body = Some(body.into_body());
        self
    }

    /// Set the body to a single data section
    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.body = Some(Ok(Body::from(Data::new(data))));
        self
    }

    /// Set the body to a single amqp-value section
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.body = Some(Ok(Body::Value(AmqpValue(value.into()))));
        self
    }

    /// Set the body to a single amqp-sequence section
    pub fn sequence<T: Into<Value>>(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.body = Some(Ok(Body::from(AmqpSequence::new(values))));
        self
    }

    /// Set the header
    pub fn header(mut self, header: impl Into<Option<Header>>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the delivery annotations
    pub fn delivery_annotations(
        mut self,
        delivery_annotations: impl Into<Option<DeliveryAnnotations>>,
    ) -> Self {
        self.delivery_annotations = delivery_annotations.into();
        self
    }

    /// Set the message annotations
    pub fn message_annotations(
        mut self,
        message_annotations: impl Into<Option<MessageAnnotations>>,
    ) -> Self {
        self.message_annotations = message_annotations.into();
        self
    }

    /// Set the properties
    pub fn properties(mut self, properties: impl Into<Option<Properties>>) -> Self {
        self.properties = properties.into();
        self
    }

    /// Set the application properties
    pub fn application_properties(
        mut self,
        application_properties: impl Into<Option<ApplicationProperties>>,
    ) -> Self {
        self.application_properties = application_properties.into();
        self
    }

    /// Set the footer
    pub fn footer(mut self, footer: impl Into<Option<Footer>>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Builds the [`Message`]. A body is required.
    pub fn build(self) -> Result<Message, Error> {
        let body = self
            .body
            .ok_or_else(|| Error::Argument("a message needs a body".into()))??;
        Ok(Message {
            header: self.header,
            delivery_annotations: self.delivery_annotations,
            message_annotations: self.message_annotations,
            properties: self.properties,
            application_properties: self.application_properties,
            body,
            footer: self.footer,
        })
    }
}

#[cfg(test)]
mod tests {
    use oxamqp_codec::{composite::Composite, ser::write_value, Value};

    use crate::messaging::{Footer, Header, Released, Section};

    use super::{Body, Message};

    fn encode(values: &[Value]) -> Vec<u8> {
        let mut buf = Vec::new();
        for value in values {
            write_value(&mut buf, value).unwrap();
        }
        buf
    }

    #[test]
    fn test_build_without_body_fails() {
        let err = Message::builder().build().unwrap_err();
        assert!(matches!(err, oxamqp_codec::Error::Argument(_)));
    }

    #[test]
    fn test_decode_message() {
        let header = Header::builder().durable(true).build();
        let footer = Footer::builder().insert("x-opt-a", Value::Bool(true)).build();
        let buf = encode(&[
            header.clone().into_section_value().unwrap(),
            crate::messaging::Data::new("a").into_section_value().unwrap(),
            crate::messaging::Data::new("b").into_section_value().unwrap(),
            footer.clone().into_section_value().unwrap(),
        ]);

        let message = Message::decode(&buf).unwrap();
        assert_eq!(message.header, Some(header));
        assert!(matches!(message.body, Body::Data(ref data) if data.len() == 2));
        assert_eq!(message.footer, Some(footer));
    }

    #[test]
    fn test_decode_out_of_order_sections_fails() {
        let buf = encode(&[
            crate::messaging::AmqpValue(Value::Null).into_section_value().unwrap(),
            Header::default().into_section_value().unwrap(),
        ]);
        assert!(Message::decode(&buf).is_err());
    }

    #[test]
    fn test_decode_non_section_fails() {
        let buf = encode(&[Released {}.into_value()]);
        let err = Message::decode(&buf).unwrap_err();
        assert!(matches!(err, oxamqp_codec::Error::Argument(_)));
    }
}
