//! Part 3.4 delivery state

use oxamqp_codec::{
    composite::{Composite, CompositeType, FieldSpec, Fields as FieldValues},
    primitives::{Boolean, UInt, ULong},
    Error as CodecError, Value,
};

use crate::definitions::{fields_from_value, Error, Fields};

mod delivery_state_impl;
mod outcome_impl;

mod phase;
pub use phase::DeliveryPhase;

/// 3.4 Delivery State
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryState {
    /// 3.4.1 Received
    Received(Received),

    /// 3.4.2 Accepted
    Accepted(Accepted),

    /// 3.4.3 Rejected
    Rejected(Rejected),

    /// 3.4.4 Released
    Released(Released),

    /// 3.4.5 Modified
    Modified(Modified),
}

impl DeliveryState {
    /// Whether a state is a terminal state
    pub fn is_terminal(&self) -> bool {
        match self {
            DeliveryState::Accepted(_)
            | DeliveryState::Rejected(_)
            | DeliveryState::Released(_)
            | DeliveryState::Modified(_) => true,
            DeliveryState::Received(_) => false,
        }
    }
}

impl AsRef<DeliveryState> for DeliveryState {
    fn as_ref(&self) -> &DeliveryState {
        self
    }
}

/// A terminal delivery state is also referred to as Outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 3.4.2 Accepted
    Accepted(Accepted),

    /// 3.4.3 Rejected
    Rejected(Rejected),

    /// 3.4.4 Released
    Released(Released),

    /// 3.4.5 Modified
    Modified(Modified),
}

const RECEIVED_FIELDS: &[FieldSpec] = &[
    FieldSpec::mandatory("section-number"),
    FieldSpec::mandatory("section-offset"),
];

/// 3.4.1 Received
///
/// <type name="received" class="composite" source="list" provides="delivery-state">
/// <descriptor name="amqp:received:list" code="0x00000000:0x00000023"/>
/// </type>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
    /// <field name="section-number" type="uint" mandatory="true"/>
    pub section_number: UInt,

    /// <field name="section-offset" type="ulong" mandatory="true"/>
    pub section_offset: ULong,
}

impl Composite for Received {
    const TYPE: &'static CompositeType =
        &CompositeType::new("amqp:received:list", 0x0000_0000, 0x0000_0023, RECEIVED_FIELDS);

    fn into_fields(self) -> FieldValues {
        FieldValues::from_values(
            Self::TYPE,
            [
                Some(Value::UInt(self.section_number)),
                Some(Value::ULong(self.section_offset)),
            ],
        )
    }

    fn from_fields(mut fields: FieldValues) -> Result<Self, CodecError> {
        Ok(Self {
            section_number: fields.take_required(0)?,
            section_offset: fields.take_required(1)?,
        })
    }
}

/// 3.4.2 Accepted
/// The accepted outcome
///
/// <type name="accepted" class="composite" source="list" provides="delivery-state, outcome">
///     <descriptor name="amqp:accepted:list" code="0x00000000:0x00000024"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accepted {}

impl Composite for Accepted {
    const TYPE: &'static CompositeType =
        &CompositeType::new("amqp:accepted:list", 0x0000_0000, 0x0000_0024, &[]);

    fn into_fields(self) -> FieldValues {
        FieldValues::new(Self::TYPE)
    }

    fn from_fields(_: FieldValues) -> Result<Self, CodecError> {
        Ok(Self {})
    }
}

const REJECTED_FIELDS: &[FieldSpec] = &[FieldSpec::optional("error")];

/// 3.4.3 Rejected
/// The rejected outcome.
///
/// <type name="rejected" class="composite" source="list" provides="delivery-state, outcome">
///     <descriptor name="amqp:rejected:list" code="0x00000000:0x00000025"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rejected {
    /// <field name="error" type="error"/>
    pub error: Option<Error>,
}

impl Composite for Rejected {
    const TYPE: &'static CompositeType =
        &CompositeType::new("amqp:rejected:list", 0x0000_0000, 0x0000_0025, REJECTED_FIELDS);

    fn into_fields(self) -> FieldValues {
        FieldValues::from_values(Self::TYPE, [self.error.map(Composite::into_value)])
    }

    fn from_fields(mut fields: FieldValues) -> Result<Self, CodecError> {
        let error = match fields.take(0) {
            Some(value) => Some(Error::try_from_value(value)?),
            None => None,
        };
        Ok(Self { error })
    }
}

/// 3.4.4 Released
/// The released outcome.
/// <type name="released" class="composite" source="list" provides="delivery-state, outcome">
///     <descriptor name="amqp:released:list" code="0x00000000:0x00000026"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Released {}

impl Composite for Released {
    const TYPE: &'static CompositeType =
        &CompositeType::new("amqp:released:list", 0x0000_0000, 0x0000_0026, &[]);

    fn into_fields(self) -> FieldValues {
        FieldValues::new(Self::TYPE)
    }

    fn from_fields(_: FieldValues) -> Result<Self, CodecError> {
        Ok(Self {})
    }
}

const MODIFIED_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("delivery-failed"),
    FieldSpec::optional("undeliverable-here"),
    FieldSpec::optional("message-annotations"),
];

/// 3.4.5 Modified
/// The modified outcome.
/// <type name="modified" class="composite" source="list" provides="delivery-state, outcome">
///     <descriptor name="amqp:modified:list" code="0x00000000:0x00000027"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modified {
    /// <field name="delivery-failed" type="boolean"/>
    pub delivery_failed: Option<Boolean>,

    /// <field name="undeliverable-here" type="boolean"/>
    pub undeliverable_here: Option<Boolean>,

    /// <field name="message-annotations" type="fields"/>
    pub message_annotations: Option<Fields>,
}

impl Composite for Modified {
    const TYPE: &'static CompositeType =
        &CompositeType::new("amqp:modified:list", 0x0000_0000, 0x0000_0027, MODIFIED_FIELDS);

    fn into_fields(self) -> FieldValues {
        FieldValues::from_values(
            Self::TYPE,
            [
                self.delivery_failed.map(Value::Bool),
                self.undeliverable_here.map(Value::Bool),
                self.message_annotations.map(Value::from),
            ],
        )
    }

    fn from_fields(mut fields: FieldValues) -> Result<Self, CodecError> {
        Ok(Self {
            delivery_failed: fields.take_as(0)?,
            undeliverable_here: fields.take_as(1)?,
            message_annotations: fields.take_with(2, fields_from_value)?,
        })
    }
}

oxamqp_codec::impl_composite_serde!(Received, Accepted, Rejected, Released, Modified);
