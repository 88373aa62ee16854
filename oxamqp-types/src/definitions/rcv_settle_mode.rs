use oxamqp_codec::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// 2.8.3 Receiver Settle Mode
/// Settlement policy for a receiver.
/// <type name="receiver-settle-mode" class="restricted" source="ubyte">
/// </type>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ReceiverSettleMode {
    /// <choice name="first" value="0"/>
    #[default]
    First = 0,
    /// <choice name="second" value="1"/>
    Second = 1,
}

impl From<ReceiverSettleMode> for u8 {
    fn from(mode: ReceiverSettleMode) -> Self {
        match mode {
            ReceiverSettleMode::First => 0,
            ReceiverSettleMode::Second => 1,
        }
    }
}

impl TryFrom<u8> for ReceiverSettleMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ReceiverSettleMode::First),
            1 => Ok(ReceiverSettleMode::Second),
            _ => Err(value),
        }
    }
}

impl From<ReceiverSettleMode> for Value {
    fn from(mode: ReceiverSettleMode) -> Self {
        Value::UByte(mode.into())
    }
}

#[cfg(test)]
mod tests {
    use oxamqp_codec::{from_slice, to_vec};

    use super::ReceiverSettleMode;

    #[test]
    fn test_receiver_settle_mode_round_trip() {
        let buf = to_vec(&ReceiverSettleMode::Second).unwrap();
        assert_eq!(buf, vec![0x50, 0x01]);
        let mode: ReceiverSettleMode = from_slice(&buf).unwrap();
        assert_eq!(mode, ReceiverSettleMode::Second);
        assert!(from_slice::<ReceiverSettleMode>(&[0x52, 0x01]).is_err());
    }
}
