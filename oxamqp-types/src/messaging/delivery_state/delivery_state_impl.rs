use oxamqp_codec::{composite::Composite, described::Described, Error, Value};
use serde::{de, ser};

use super::{Accepted, DeliveryState, Modified, Outcome, Received, Rejected, Released};

fn unknown(found: impl std::fmt::Display) -> Error {
    Error::Argument(format!("unknown outcome: {}", found))
}

impl From<DeliveryState> for Value {
    fn from(state: DeliveryState) -> Self {
        match state {
            DeliveryState::Received(value) => value.into_value(),
            DeliveryState::Accepted(value) => value.into_value(),
            DeliveryState::Rejected(value) => value.into_value(),
            DeliveryState::Released(value) => value.into_value(),
            DeliveryState::Modified(value) => value.into_value(),
        }
    }
}

impl TryFrom<Described<Value>> for DeliveryState {
    type Error = Error;

    fn try_from(described: Described<Value>) -> Result<Self, Self::Error> {
        let descriptor = &described.descriptor;
        if Received::TYPE.matches(descriptor) {
            Received::try_from_described(described).map(DeliveryState::Received)
        } else if Accepted::TYPE.matches(descriptor) {
            Accepted::try_from_described(described).map(DeliveryState::Accepted)
        } else if Rejected::TYPE.matches(descriptor) {
            Rejected::try_from_described(described).map(DeliveryState::Rejected)
        } else if Released::TYPE.matches(descriptor) {
            Released::try_from_described(described).map(DeliveryState::Released)
        } else if Modified::TYPE.matches(descriptor) {
            Modified::try_from_described(described).map(DeliveryState::Modified)
        } else {
            Err(unknown(descriptor))
        }
    }
}

impl TryFrom<Value> for DeliveryState {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Described(described) => Self::try_from(*described),
            other => Err(unknown(other)),
        }
    }
}

impl From<Outcome> for DeliveryState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Accepted(value) => DeliveryState::Accepted(value),
            Outcome::Rejected(value) => DeliveryState::Rejected(value),
            Outcome::Released(value) => DeliveryState::Released(value),
            Outcome::Modified(value) => DeliveryState::Modified(value),
        }
    }
}

impl From<Received> for DeliveryState {
    fn from(value: Received) -> Self {
        DeliveryState::Received(value)
    }
}

impl ser::Serialize for DeliveryState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            DeliveryState::Received(value) => ser::Serialize::serialize(value, serializer),
            DeliveryState::Accepted(value) => ser::Serialize::serialize(value, serializer),
            DeliveryState::Rejected(value) => ser::Serialize::serialize(value, serializer),
            DeliveryState::Released(value) => ser::Serialize::serialize(value, serializer),
            DeliveryState::Modified(value) => ser::Serialize::serialize(value, serializer),
        }
    }
}

impl<'de> de::Deserialize<'de> for DeliveryState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let described = <Described<Value> as de::Deserialize>::deserialize(deserializer)?;
        DeliveryState::try_from(described).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use oxamqp_codec::{descriptor::Descriptor, described::Described, list::List, Value};

    use crate::messaging::{DeliveryState, Received};

    #[test]
    fn test_decode_by_symbolic_descriptor() {
        let value = Value::from(Described::new(
            Descriptor::name("amqp:accepted:list"),
            Value::List(List::new()),
        ));
        let state = DeliveryState::try_from(value).unwrap();
        assert!(matches!(state, DeliveryState::Accepted(_)));
    }

    #[test]
    fn test_unknown_descriptor_is_an_argument_error() {
        let value = Value::from(Described::new(
            Descriptor::code(0x28),
            Value::List(List::new()),
        ));
        let err = DeliveryState::try_from(value).unwrap_err();
        assert!(matches!(err, oxamqp_codec::Error::Argument(_)));
    }

    #[test]
    fn test_plain_value_is_an_argument_error() {
        let err = DeliveryState::try_from(Value::from("accepted")).unwrap_err();
        assert!(matches!(err, oxamqp_codec::Error::Argument(_)));
    }

    #[test]
    fn test_received_round_trip_through_value() {
        let state = DeliveryState::from(Received {
            section_number: 1,
            section_offset: 512,
        });
        let value = Value::from(state.clone());
        assert_eq!(DeliveryState::try_from(value).unwrap(), state);
    }
}
