//! Implementation of message header

use oxamqp_codec::{
    composite::{Composite, CompositeType, FieldSpec, Fields},
    primitives::{Boolean, UByte, UInt},
    Error, Value,
};

use crate::definitions::Milliseconds;

use super::{Section, SectionKind};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("durable"),
    FieldSpec::optional("priority"),
    FieldSpec::optional("ttl"),
    FieldSpec::optional("first-acquirer"),
    FieldSpec::optional("delivery-count"),
];

/// 3.2.1 Header
/// Transport headers for a message.
/// <type name="header" class="composite" source="list" provides="section">
///     <descriptor name="amqp:header:list" code="0x00000000:0x00000070"/>
/// </type>
///
/// Fields holding their default value are left out of the encoded list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// <field name="durable" type="boolean" default="false"/>
    pub durable: Boolean,

    /// <field name="priority" type="ubyte" default="4"/>
    pub priority: Priority,

    /// <field name="ttl" type="milliseconds"/>
    pub ttl: Option<Milliseconds>,

    /// <field name="first-acquirer" type="boolean" default="false"/>
    pub first_acquirer: Boolean,

    /// <field name="delivery-count" type="uint" default="0"/>
    pub delivery_count: UInt,
}

impl Header {
    /// Creates a builder for header
    pub fn builder() -> Builder {
        Default::default()
    }
}

/// relative message priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub UByte);

impl Default for Priority {
    fn default() -> Self {
        Self(4)
    }
}

impl From<UByte> for Priority {
    fn from(value: UByte) -> Self {
        Self(value)
    }
}

impl From<Priority> for UByte {
    fn from(value: Priority) -> Self {
        value.0
    }
}

fn non_default<T: PartialEq>(value: T, default: T) -> Option<T> {
    (value != default).then_some(value)
}

impl Composite for Header {
    const TYPE: &'static CompositeType =
        &CompositeType::new("amqp:header:list", 0x0000_0000, 0x0000_0070, FIELDS);

    fn into_fields(self) -> Fields {
        Fields::from_values(
            Self::TYPE,
            [
                non_default(self.durable, false).map(Value::Bool),
                non_default(self.priority, Priority::default()).map(|p| Value::UByte(p.0)),
                self.ttl.map(Value::UInt),
                non_default(self.first_acquirer, false).map(Value::Bool),
                non_default(self.delivery_count, 0).map(Value::UInt),
            ],
        )
    }

    fn from_fields(mut fields: Fields) -> Result<Self, Error> {
        Ok(Self {
            durable: fields.take_as(0)?.unwrap_or_default(),
            priority: fields.take_as::<UByte>(1)?.map(Priority).unwrap_or_default(),
            ttl: fields.take_as(2)?,
            first_acquirer: fields.take_as(3)?.unwrap_or_default(),
            delivery_count: fields.take_as(4)?.unwrap_or_default(),
        })
    }
}

impl Section for Header {
    const KIND: SectionKind = SectionKind::Header;

    fn into_section_value(self) -> Result<Value, Error> {
        Ok(self.into_value())
    }

    fn from_section_value(value: Value) -> Result<Self, Error> {
        Self::try_from_value(value)
    }
}

/// Builder for [`Header`]
#[derive(Debug, Default, Clone)]
pub struct Builder {
    inner: Header,
}

impl Builder {
    /// Set the `durable` field of [`Header`]
    pub fn durable(mut self, value: Boolean) -> Self {
        self.inner.durable = value;
        self
    }

    /// Set the `priority` field of [`Header`]
    pub fn priority(mut self, value: impl Into<Priority>) -> Self {
        self.inner.priority = value.into();
        self
    }

    /// Set the `ttl` field of [`Header`]
    pub fn ttl(mut self, value: impl Into<Option<Milliseconds>>) -> Self {
        self.inner.ttl = value.into();
        self
    }

    /// Set the `first_acquirer` field of [`Header`]
    pub fn first_acquirer(mut self, value: Boolean) -> Self {
        self.inner.first_acquirer = value;
        self
    }

    /// Set the `delivery_count` field of [`Header`]
    pub fn delivery_count(mut self, value: UInt) -> Self {
        self.inner.delivery_count = value;
        self
    }

    /// Builds the [`Header`]
    pub fn build(self) -> Header {
        self.inner
    }
}

impl From<Builder> for Header {
    fn from(builder: Builder) -> Self {
        builder.build()
    }
}

oxamqp_codec::impl_composite_serde!(Header);
