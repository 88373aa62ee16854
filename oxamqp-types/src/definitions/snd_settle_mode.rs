use oxamqp_codec::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// 2.8.2
/// Sender Settle Mode
/// Settlement policy for a sender.
/// <type name="sender-settle-mode" class="restricted" source="ubyte">
/// </type>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum SenderSettleMode {
    /// <choice name="unsettled" value="0"/>
    Unsettled = 0,
    /// <choice name="settled" value="1"/>
    Settled = 1,
    /// <choice name="mixed" value="2"/>
    #[default]
    Mixed = 2,
}

impl From<SenderSettleMode> for u8 {
    fn from(mode: SenderSettleMode) -> Self {
        match mode {
            SenderSettleMode::Unsettled => 0,
            SenderSettleMode::Settled => 1,
            SenderSettleMode::Mixed => 2,
        }
    }
}

impl TryFrom<u8> for SenderSettleMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let mode = match value {
            0 => SenderSettleMode::Unsettled,
            1 => SenderSettleMode::Settled,
            2 => SenderSettleMode::Mixed,
            _ => return Err(value),
        };
        Ok(mode)
    }
}

impl From<SenderSettleMode> for Value {
    fn from(mode: SenderSettleMode) -> Self {
        Value::UByte(mode.into())
    }
}

#[cfg(test)]
mod tests {
    use oxamqp_codec::{from_slice, to_vec};

    use super::SenderSettleMode;

    #[test]
    fn test_serialize_sender_settle_mode() {
        let buf = to_vec(&SenderSettleMode::Settled).unwrap();
        assert_eq!(buf, vec![0x50, 0x01]);
    }

    #[test]
    fn test_deserialize_sender_settle_mode() {
        let mode: SenderSettleMode = from_slice(&[0x50, 0x02]).unwrap();
        assert_eq!(mode, SenderSettleMode::Mixed);
        assert!(from_slice::<SenderSettleMode>(&[0x50, 0x03]).is_err());
    }
}
