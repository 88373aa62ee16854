//! Names the serializer and deserializer treat specially

/// A described value written as descriptor followed by the value
pub const DESCRIBED_BASIC: &str = "AMQP1.0_DESCRIBED_BASIC";

/// A described value whose fields are written as a list
pub const DESCRIBED_LIST: &str = "AMQP1.0_DESCRIBED_LIST";

/// The descriptor of a described value
pub const DESCRIPTOR: &str = "AMQP1.0_DESCRIPTOR";

/// The polymorphic [`Value`](crate::Value)
pub const VALUE: &str = "AMQP1.0_VALUE";

pub(crate) const ARRAY: &str = "AMQP1.0_ARRAY";
pub(crate) const DECIMAL32: &str = "AMQP1.0_DECIMAL32";
pub(crate) const DECIMAL64: &str = "AMQP1.0_DECIMAL64";
pub(crate) const DECIMAL128: &str = "AMQP1.0_DECIMAL128";
pub(crate) const SYMBOL: &str = "AMQP1.0_SYMBOL";
pub(crate) const TIMESTAMP: &str = "AMQP1.0_TIMESTAMP";
pub(crate) const UUID: &str = "AMQP1.0_UUID";
