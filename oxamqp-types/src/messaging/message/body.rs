use std::fmt::Display;

use oxamqp_codec::{primitives::Binary, Error, Value};

use crate::messaging::{AmqpSequence, AmqpValue, Data, Section, SectionKind};

/// One body section of any of the three kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySection {
    /// A `data` section
    Data(Data),

    /// An `amqp-sequence` section
    Sequence(AmqpSequence),

    /// An `amqp-value` section
    Value(AmqpValue),
}

impl BodySection {
    /// Which section this is
    pub fn kind(&self) -> SectionKind {
        match self {
            BodySection::Data(_) => SectionKind::Data,
            BodySection::Sequence(_) => SectionKind::AmqpSequence,
            BodySection::Value(_) => SectionKind::AmqpValue,
        }
    }

    pub(crate) fn into_section_value(self) -> Result<Value, Error> {
        match self {
            BodySection::Data(data) => data.into_section_value(),
            BodySection::Sequence(sequence) => sequence.into_section_value(),
            BodySection::Value(value) => value.into_section_value(),
        }
    }

    pub(crate) fn from_section_value(kind: SectionKind, value: Value) -> Result<Self, Error> {
        match kind {
            SectionKind::Data => Data::from_section_value(value).map(BodySection::Data),
            SectionKind::AmqpSequence => {
                AmqpSequence::from_section_value(value).map(BodySection::Sequence)
            }
            SectionKind::AmqpValue => AmqpValue::from_section_value(value).map(BodySection::Value),
            other => Err(Error::Argument(format!(
                "{} is not a body section",
                other.name()
            ))),
        }
    }
}

impl From<Data> for BodySection {
    fn from(value: Data) -> Self {
        BodySection::Data(value)
    }
}

impl From<AmqpSequence> for BodySection {
    fn from(value: AmqpSequence) -> Self {
        BodySection::Sequence(value)
    }
}

impl From<AmqpValue> for BodySection {
    fn from(value: AmqpValue) -> Self {
        BodySection::Value(value)
    }
}

/// The body consists of one of the following three choices: one or more data
/// sections, one or more amqp-sequence sections, or a single amqp-value section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// One or more data sections
    Data(Vec<Data>),

    /// One or more sequence sections
    Sequence(Vec<AmqpSequence>),

    /// A single value section
    Value(AmqpValue),
}

impl Body {
    /// Whether the body is made of data sections
    pub fn is_data(&self) -> bool {
        matches!(self, Body::Data(_))
    }

    /// Whether the body is made of sequence sections
    pub fn is_sequence(&self) -> bool {
        matches!(self, Body::Sequence(_))
    }

    /// Whether the body is a single value section
    pub fn is_value(&self) -> bool {
        matches!(self, Body::Value(_))
    }

    /// Builds a body from its sections.
    ///
    /// Fails with [`Error::Argument`] if `sections` is empty, mixes section
    /// kinds, or holds more than one `amqp-value`.
    pub fn try_from_sections(sections: Vec<BodySection>) -> Result<Self, Error> {
        let mut sections = sections.into_iter();
        let first = sections
            .next()
            .ok_or_else(|| Error::Argument("a message body needs at least one section".into()))?;

        match first {
            BodySection::Data(data) => {
                let mut all = vec![data];
                for section in sections {
                    match section {
                        BodySection::Data(data) => all.push(data),
                        other => return Err(mixed(SectionKind::Data, other.kind())),
                    }
                }
                Ok(Body::Data(all))
            }
            BodySection::Sequence(sequence) => {
                let mut all = vec![sequence];
                for section in sections {
                    match section {
                        BodySection::Sequence(sequence) => all.push(sequence),
                        other => return Err(mixed(SectionKind::AmqpSequence, other.kind())),
                    }
                }
                Ok(Body::Sequence(all))
            }
            BodySection::Value(value) => match sections.next() {
                None => Ok(Body::Value(value)),
                Some(BodySection::Value(_)) => Err(Error::Argument(
                    "a message body holds at most one amqp-value section".into(),
                )),
                Some(other) => Err(mixed(SectionKind::AmqpValue, other.kind())),
            },
        }
    }

    /// Splits the body back into its sections
    pub fn into_sections(self) -> Vec<BodySection> {
        match self {
            Body::Data(data) => data.into_iter().map(BodySection::Data).collect(),
            Body::Sequence(seq) => seq.into_iter().map(BodySection::Sequence).collect(),
            Body::Value(value) => vec![BodySection::Value(value)],
        }
    }
}

fn mixed(first: SectionKind, found: SectionKind) -> Error {
    Error::Argument(format!(
        "a message body cannot mix {} with {}",
        first.name(),
        found.name()
    ))
}

impl Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Data(data) => {
                f.write_str("Body(")?;
                for (i, d) in data.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", d)?;
                }
                f.write_str(")")
            }
            Body::Sequence(seq) => {
                f.write_str("Body(")?;
                for (i, s) in seq.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", s)?;
                }
                f.write_str(")")
            }
            Body::Value(value) => write!(f, "Body({})", value),
        }
    }
}

impl From<Data> for Body {
    fn from(value: Data) -> Self {
        Body::Data(vec![value])
    }
}

impl From<AmqpSequence> for Body {
    fn from(value: AmqpSequence) -> Self {
        Body::Sequence(vec![value])
    }
}

impl From<AmqpValue> for Body {
    fn from(value: AmqpValue) -> Self {
        Body::Value(value)
    }
}

/// Converts a payload into a message [`Body`]
///
/// Text and bytes become a single `data` section. Scalars and [`Value`]s
/// become an `amqp-value`, widened to `long` or `double`.
pub trait IntoBody {
    /// Performs the conversion
    fn into_body(self) -> Result<Body, Error>;
}

impl IntoBody for Body {
    fn into_body(self) -> Result<Body, Error> {
        Ok(self)
    }
}

impl IntoBody for BodySection {
    fn into_body(self) -> Result<Body, Error> {
        Body::try_from_sections(vec![self])
    }
}

impl IntoBody for Vec<BodySection> {
    fn into_body(self) -> Result<Body, Error> {
        Body::try_from_sections(self)
    }
}

macro_rules! impl_into_body_via_from {
    ($($ty:ty),*) => {
        $(
            impl IntoBody for $ty {
                fn into_body(self) -> Result<Body, Error> {
                    Ok(Body::from(self))
                }
            }
        )*
    };
}

impl_into_body_via_from!(Data, AmqpSequence, AmqpValue);

impl IntoBody for &str {
    fn into_body(self) -> Result<Body, Error> {
        Ok(Body::from(Data::new(self.as_bytes())))
    }
}

impl IntoBody for String {
    fn into_body(self) -> Result<Body, Error> {
        Ok(Body::from(Data::new(self.into_bytes())))
    }
}

impl IntoBody for Vec<u8> {
    fn into_body(self) -> Result<Body, Error> {
        Ok(Body::from(Data::new(self)))
    }
}

impl IntoBody for &[u8] {
    fn into_body(self) -> Result<Body, Error> {
        Ok(Body::from(Data::new(self)))
    }
}

impl IntoBody for Binary {
    fn into_body(self) -> Result<Body, Error> {
        Ok(Body::from(Data(self)))
    }
}

impl IntoBody for Value {
    fn into_body(self) -> Result<Body, Error> {
        Ok(Body::Value(AmqpValue(self)))
    }
}

macro_rules! impl_into_body_for_native {
    ($($ty:ty),*) => {
        $(
            impl IntoBody for $ty {
                fn into_body(self) -> Result<Body, Error> {
                    Value::from_native(self).map(|v| Body::Value(AmqpValue(v)))
                }
            }
        )*
    };
}

impl_into_body_for_native!((), bool, i32, i64, f32, f64);
