#![deny(missing_docs, missing_debug_implementations)]

//! AMQP 1.0 definitions, delivery states and message sections built on
//! [`oxamqp_codec`].

pub mod definitions;
pub mod messaging;
