#![deny(missing_docs, missing_debug_implementations)]

//! The AMQP 1.0 type system.
//!
//! [`Value`] covers every primitive kind plus described values. Primitive
//! values built from untyped input are range checked by [`Value::try_new`].
//! [`List`] is the null-filling container that composite types encode
//! through, and [`composite::Composite`] maps Rust types onto described
//! lists.
//!
//! Encoding and decoding go through a [`serde`] [`Serializer`] and
//! [`Deserializer`] pair, so any type implementing `Serialize` or
//! `Deserialize` can be written to and read from the wire.
//!
//! ```rust
//! use oxamqp_codec::{from_slice, to_vec, List, Value};
//!
//! let mut list = List::new();
//! list.set(1, Value::UInt(7));
//!
//! let buf = to_vec(&Value::List(list.clone())).unwrap();
//! assert_eq!(buf, vec![0xc0, 0x04, 0x02, 0x40, 0x52, 0x07]);
//! assert_eq!(from_slice::<Value>(&buf).unwrap(), Value::List(list));
//! ```

// Public mod
#[doc(hidden)]
#[path = "constants.rs"]
pub mod __constants;

pub mod composite;
pub mod de;
pub mod described;
pub mod descriptor;
pub mod error;
pub mod format_code;
pub mod list;
pub mod primitives;
pub mod read;
pub mod ser;
pub mod value;

mod fixed_width;
mod util;

pub use serde;

pub use de::{from_slice, Decoder, Deserializer};
pub use error::Error;
pub use list::List;
pub use ser::{to_vec, Encoder, Serializer};
pub use value::Value;

/// Commonly used items
pub mod prelude {
    pub use super::composite::{Composite, CompositeType, FieldSpec, Fields};
    pub use super::described::Described;
    pub use super::descriptor::Descriptor;
    pub use super::primitives::{Native, OrderedMap, PrimitiveKind, Symbol, Timestamp};
    pub use super::{from_slice, to_vec, Error, List, Value};
}
