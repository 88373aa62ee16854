use std::fmt::Display;

use oxamqp_codec::{
    composite::{Composite, CompositeType, FieldSpec, Fields as FieldValues},
    primitives::Symbol,
    Error as CodecError, Value,
};

use super::{fields_from_value, ErrorCondition, Fields};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::mandatory("condition"),
    FieldSpec::optional("description"),
    FieldSpec::optional("info"),
];

/// <type name="error" class="composite" source="list">
/// <descriptor name="amqp:error:list" code="0x00000000:0x0000001d"/>
/// </type>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// <field name="condition" type="symbol" requires="error-condition" mandatory="true"/>
    pub condition: ErrorCondition,

    /// <field name="description" type="string"/>
    pub description: Option<String>,

    /// <field name="info" type="fields"/>
    pub info: Option<Fields>,
}

impl Error {
    /// Creates a new [`Error`]
    pub fn new(
        condition: impl Into<ErrorCondition>,
        description: impl Into<Option<String>>,
        info: impl Into<Option<Fields>>,
    ) -> Self {
        Self {
            condition: condition.into(),
            description: description.into(),
            info: info.into(),
        }
    }
}

impl<T> From<T> for Error
where
    T: Into<ErrorCondition>,
{
    fn from(condition: T) -> Self {
        Self {
            condition: condition.into(),
            description: None,
            info: None,
        }
    }
}

impl Composite for Error {
    const TYPE: &'static CompositeType =
        &CompositeType::new("amqp:error:list", 0x0000_0000, 0x0000_001d, FIELDS);

    fn into_fields(self) -> FieldValues {
        FieldValues::from_values(
            Self::TYPE,
            [
                Some(Value::Symbol(self.condition.into())),
                self.description.map(Value::String),
                self.info.map(Value::from),
            ],
        )
    }

    fn from_fields(mut fields: FieldValues) -> Result<Self, CodecError> {
        let condition: Symbol = fields.take_required(0)?;
        Ok(Self {
            condition: condition.into(),
            description: fields.take_as(1)?,
            info: fields.take_with(2, fields_from_value)?,
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.condition, description),
            None => write!(f, "{}", self.condition),
        }
    }
}

oxamqp_codec::impl_composite_serde!(Error);

#[cfg(test)]
mod tests {
    use oxamqp_codec::{composite::Composite, from_slice, to_vec};

    use crate::definitions::{AmqpError, Fields};

    use super::Error;

    #[test]
    fn test_error_round_trip() {
        let mut info = Fields::new();
        info.insert("retry-after".into(), 30u32.into());
        let expected = Error::new(AmqpError::DecodeError, Some("bad frame".to_string()), info);

        let buf = to_vec(&expected.clone().into_value()).unwrap();
        let decoded = Error::try_from_value(from_slice(&buf).unwrap()).unwrap();
        assert_eq!(expected, decoded);
    }

    #[test]
    fn test_error_without_condition_is_rejected() {
        let buf = [0x00, 0x53, 0x1d, 0x45];
        let err = Error::try_from_value(from_slice(&buf).unwrap()).unwrap_err();
        assert!(matches!(err, oxamqp_codec::Error::Argument(_)));
    }
}
