use oxamqp_codec::{described::Described, Error, Value};
use serde::{de, ser};

use super::{Accepted, DeliveryState, Modified, Outcome, Rejected, Released};

impl Outcome {
    /// Whether the outcome is [`Accepted`]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    /// Whether the outcome is [`Rejected`]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// Whether the outcome is [`Released`]
    pub fn is_released(&self) -> bool {
        matches!(self, Outcome::Released(_))
    }

    /// Whether the outcome is [`Modified`]
    pub fn is_modified(&self) -> bool {
        matches!(self, Outcome::Modified(_))
    }

    /// Returns [`Accepted`] or `err` for any other outcome
    pub fn accepted_or<T>(self, err: T) -> Result<Accepted, T> {
        match self {
            Outcome::Accepted(accepted) => Ok(accepted),
            _ => Err(err),
        }
    }

    /// Returns [`Accepted`] or maps any other outcome with `op`
    pub fn accepted_or_else<F, T>(self, op: F) -> Result<Accepted, T>
    where
        F: FnOnce(Self) -> T,
    {
        match self {
            Outcome::Accepted(accepted) => Ok(accepted),
            other => Err(op(other)),
        }
    }
}

impl From<Accepted> for Outcome {
    fn from(value: Accepted) -> Self {
        Outcome::Accepted(value)
    }
}

impl From<Rejected> for Outcome {
    fn from(value: Rejected) -> Self {
        Outcome::Rejected(value)
    }
}

impl From<Released> for Outcome {
    fn from(value: Released) -> Self {
        Outcome::Released(value)
    }
}

impl From<Modified> for Outcome {
    fn from(value: Modified) -> Self {
        Outcome::Modified(value)
    }
}

impl From<Outcome> for Value {
    fn from(outcome: Outcome) -> Self {
        Value::from(DeliveryState::from(outcome))
    }
}

impl TryFrom<DeliveryState> for Outcome {
    type Error = Error;

    fn try_from(state: DeliveryState) -> Result<Self, Self::Error> {
        match state {
            DeliveryState::Accepted(value) => Ok(Outcome::Accepted(value)),
            DeliveryState::Rejected(value) => Ok(Outcome::Rejected(value)),
            DeliveryState::Released(value) => Ok(Outcome::Released(value)),
            DeliveryState::Modified(value) => Ok(Outcome::Modified(value)),
            DeliveryState::Received(_) => Err(Error::Argument(
                "received is a delivery state but not an outcome".to_string(),
            )),
        }
    }
}

impl TryFrom<Described<Value>> for Outcome {
    type Error = Error;

    fn try_from(described: Described<Value>) -> Result<Self, Self::Error> {
        DeliveryState::try_from(described).and_then(Outcome::try_from)
    }
}

impl TryFrom<Value> for Outcome {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        DeliveryState::try_from(value).and_then(Outcome::try_from)
    }
}

impl ser::Serialize for Outcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            Outcome::Accepted(value) => ser::Serialize::serialize(value, serializer),
            Outcome::Rejected(value) => ser::Serialize::serialize(value, serializer),
            Outcome::Released(value) => ser::Serialize::serialize(value, serializer),
            Outcome::Modified(value) => ser::Serialize::serialize(value, serializer),
        }
    }
}

impl<'de> de::Deserialize<'de> for Outcome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let described = <Described<Value> as de::Deserialize>::deserialize(deserializer)?;
        Outcome::try_from(described).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use oxamqp_codec::{composite::Composite, from_slice, to_vec, Value};

    use crate::messaging::{Accepted, Modified, Outcome, Received, Released};

    #[test]
    fn test_outcome_round_trip() {
        let outcome = Outcome::Modified(Modified {
            delivery_failed: Some(true),
            undeliverable_here: Some(false),
            message_annotations: None,
        });
        let buf = to_vec(&Value::from(outcome.clone())).unwrap();
        let decoded = Outcome::try_from(from_slice::<Value>(&buf).unwrap()).unwrap();
        assert_eq!(outcome, decoded);
    }

    #[test]
    fn test_outcome_serde() {
        let buf = to_vec(&Outcome::from(Released {})).unwrap();
        assert_eq!(buf, [0x00, 0x53, 0x26, 0x45]);
        assert_eq!(
            from_slice::<Outcome>(&buf).unwrap(),
            Outcome::Released(Released {})
        );

        let received = to_vec(&Received {
            section_number: 1,
            section_offset: 2,
        })
        .unwrap();
        assert!(from_slice::<Outcome>(&received).is_err());
    }

    #[test]
    fn test_received_is_not_an_outcome() {
        let value = Received {
            section_number: 0,
            section_offset: 0,
        }
        .into_value();
        let err = Outcome::try_from(value).unwrap_err();
        assert!(matches!(err, oxamqp_codec::Error::Argument(_)));
    }

    #[test]
    fn test_accepted_or_else() {
        assert!(Outcome::from(Accepted {}).accepted_or(()).is_ok());
        let released = Outcome::from(Released {});
        let err = released.accepted_or_else(|o| o.is_released()).unwrap_err();
        assert!(err);
    }
}
