use oxamqp_codec::Value;
use serde::{de, ser};

/// 2.8.1 Role
/// Link endpoint role.
/// <type name="role" class="restricted" source="boolean">
/// </type>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// <choice name="sender" value="false"/>
    Sender,
    /// <choice name="receiver" value="true"/>
    Receiver,
}

impl From<Role> for bool {
    fn from(role: Role) -> Self {
        match role {
            Role::Sender => false,
            Role::Receiver => true,
        }
    }
}

impl From<bool> for Role {
    fn from(value: bool) -> Self {
        match value {
            false => Role::Sender,
            true => Role::Receiver,
        }
    }
}

impl From<Role> for Value {
    fn from(role: Role) -> Self {
        Value::Bool(role.into())
    }
}

impl ser::Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_bool(bool::from(*self))
    }
}

struct Visitor;

impl<'de> de::Visitor<'de> for Visitor {
    type Value = Role;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("enum Role")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Role::from(v))
    }
}

impl<'de> de::Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_bool(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use oxamqp_codec::{from_slice, to_vec};

    use super::Role;

    #[test]
    fn test_role_uses_boolean_encoding() {
        assert_eq!(to_vec(&Role::Sender).unwrap(), vec![0x42]);
        assert_eq!(to_vec(&Role::Receiver).unwrap(), vec![0x41]);
        assert_eq!(from_slice::<Role>(&[0x56, 0x01]).unwrap(), Role::Receiver);
    }
}
