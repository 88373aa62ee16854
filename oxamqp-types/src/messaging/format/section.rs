use oxamqp_codec::{descriptor::Descriptor, Error, Value};

/// The nine message sections in the order they appear in a bare or
/// annotated message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    /// amqp:header:list
    Header,
    /// amqp:delivery-annotations:map
    DeliveryAnnotations,
    /// amqp:message-annotations:map
    MessageAnnotations,
    /// amqp:properties:list
    Properties,
    /// amqp:application-properties:map
    ApplicationProperties,
    /// amqp:data:binary
    Data,
    /// amqp:amqp-sequence:list
    AmqpSequence,
    /// amqp:amqp-value:*
    AmqpValue,
    /// amqp:footer:map
    Footer,
}

impl SectionKind {
    const ALL: [SectionKind; 9] = [
        SectionKind::Header,
        SectionKind::DeliveryAnnotations,
        SectionKind::MessageAnnotations,
        SectionKind::Properties,
        SectionKind::ApplicationProperties,
        SectionKind::Data,
        SectionKind::AmqpSequence,
        SectionKind::AmqpValue,
        SectionKind::Footer,
    ];

    /// Descriptor code
    pub fn code(&self) -> u64 {
        0x70 + *self as u64
    }

    /// Symbolic descriptor
    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Header => "amqp:header:list",
            SectionKind::DeliveryAnnotations => "amqp:delivery-annotations:map",
            SectionKind::MessageAnnotations => "amqp:message-annotations:map",
            SectionKind::Properties => "amqp:properties:list",
            SectionKind::ApplicationProperties => "amqp:application-properties:map",
            SectionKind::Data => "amqp:data:binary",
            SectionKind::AmqpSequence => "amqp:amqp-sequence:list",
            SectionKind::AmqpValue => "amqp:amqp-value:*",
            SectionKind::Footer => "amqp:footer:map",
        }
    }

    /// The descriptor written on the wire
    pub fn descriptor(&self) -> Descriptor {
        Descriptor::Code(self.code())
    }

    /// Whether `descriptor` identifies this section, by code or by name
    pub fn matches(&self, descriptor: &Descriptor) -> bool {
        match descriptor {
            Descriptor::Code(code) => *code == self.code(),
            Descriptor::Name(name) => name.as_str() == self.name(),
        }
    }

    /// Looks up the section a descriptor belongs to
    pub fn from_descriptor(descriptor: &Descriptor) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.matches(descriptor))
    }

    /// Whether this is one of the three body sections
    pub fn is_body(&self) -> bool {
        matches!(
            self,
            SectionKind::Data | SectionKind::AmqpSequence | SectionKind::AmqpValue
        )
    }
}

/// A message section that can be turned into and recovered from its
/// described wire value
pub trait Section: Sized {
    /// Which section this is
    const KIND: SectionKind;

    /// Converts into the described value
    fn into_section_value(self) -> Result<Value, Error>;

    /// Converts from the described value
    fn from_section_value(value: Value) -> Result<Self, Error>;
}
