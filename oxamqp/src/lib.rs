#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A blocking AMQP 1.0 sending link.
//!
//! Messages are assembled with [`oxamqp_types`], handed to a pluggable
//! [`Transport`](transport::Transport) and, for guaranteed deliveries, the
//! calling thread waits for the peer's outcome.
//!
//! Connection and session are owned by a shared [`Endpoints`] registry and
//! are created the first time a link needs them. After a transport failure
//! the whole chain is rebuilt on the next send.
//!
//! ```rust,ignore
//! use oxamqp::{Endpoints, SendingLink, SendOptions, Guarantee};
//!
//! let endpoints = Endpoints::new(transport, Default::default(), Default::default());
//! let mut link = SendingLink::builder()
//!     .name("link-1")
//!     .target("q1")
//!     .attach(endpoints);
//!
//! link.send("message")?;
//!
//! let outcome = link.send_with(
//!     "message",
//!     SendOptions::builder().guarantee(Guarantee::AtLeastOnce).build(),
//! )?;
//! ```
//!
//! # Feature flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `"tracing"` | enables logging with `tracing` |
//! | `"log"` | enables logging with `log` |

pub mod connection;
pub mod endpoints;
pub mod link;
pub mod session;
pub mod transport;

pub use connection::ConnectionConfig;
pub use endpoints::Endpoints;
pub use link::{Guarantee, SendError, SendOptions, SendingLink};
pub use session::SessionConfig;

pub use oxamqp_codec as codec;
pub use oxamqp_types as types;
