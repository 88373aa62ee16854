//! Implements the sending link

pub mod builder;
pub mod delivery;
mod error;
pub mod sender;

pub use builder::Builder;
pub use delivery::{DispositionCallback, Guarantee, SendOptions};
pub use error::SendError;
pub use sender::SendingLink;

/// Default number of settlements kept by a link
pub const DEFAULT_DISPOSITIONS_CAPACITY: usize = 64;
