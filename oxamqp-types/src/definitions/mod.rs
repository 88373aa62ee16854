//! Types defined in AMQP 1.0 specification Part 2.8: Definitions

use oxamqp_codec::{
    primitives::{Binary, OrderedMap, Symbol, UInt},
    value::Value,
};

/// 2.8.1 Role
mod role;
pub use role::Role;

/// 2.8.2 Sender Settle Mode
mod snd_settle_mode;
pub use snd_settle_mode::SenderSettleMode;

/// 2.8.3 Receiver Settle Mode
mod rcv_settle_mode;
pub use rcv_settle_mode::ReceiverSettleMode;

/// 2.8.4 Handle
pub type Handle = UInt;

/// 2.8.5 Seconds
pub type Seconds = UInt;

/// 2.8.6 Milliseconds
pub type Milliseconds = UInt;

/// 2.8.7 Delivery Tag
/// A delivery-tag can be up to 32 octets of binary data
pub type DeliveryTag = Binary;

/// 2.8.10 Sequence No
pub type SequenceNo = UInt;

/// 2.8.9 Transfer Number
pub type TransferNumber = SequenceNo;

/// 2.8.11 Message Format
pub type MessageFormat = UInt;

/// 2.8.13 Fields
pub type Fields = OrderedMap<Symbol, Value>;

/// Converts a decoded map into [`Fields`], handing back the value if it is
/// not a map or has a non-symbol key
pub fn fields_from_value(value: Value) -> Result<Fields, Value> {
    match value {
        Value::Map(map) => map
            .into_iter()
            .map(|(key, value)| match key {
                Value::Symbol(key) => Ok((key, value)),
                other => Err(other),
            })
            .collect(),
        other => Err(other),
    }
}

/// 2.8.14 Error
mod error;
pub use error::Error;

/// 2.8.15 - 2.8.18 Error conditions
mod error_cond;
pub use error_cond::{AmqpError, ConnectionError, ErrorCondition, LinkError, SessionError};

/// 2.8.19 Constant definition
mod constant_def;
pub use constant_def::{MAJOR, MINOR, MIN_MAX_FRAME_SIZE, PORT, REVISION, SECURE_PORT};
