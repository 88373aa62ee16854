//! Session configuration

use oxamqp_types::definitions::{Handle, TransferNumber};

pub mod builder;
pub use builder::Builder;

/// Default incoming_window and outgoing_window
pub const DEFAULT_WINDOW: TransferNumber = 2048;

/// Parameters used by a [`Transport`](crate::transport::Transport) to begin
/// a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Initial incoming-window
    pub incoming_window: TransferNumber,

    /// Initial outgoing-window
    pub outgoing_window: TransferNumber,

    /// The maximum handle value that can be used on the session
    pub handle_max: Handle,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Builder::new().build()
    }
}

impl SessionConfig {
    /// Creates a builder for [`SessionConfig`]
    pub fn builder() -> Builder {
        Builder::new()
    }
}
