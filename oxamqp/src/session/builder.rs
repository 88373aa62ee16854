//! Builder for [`SessionConfig`]

use oxamqp_types::definitions::{Handle, TransferNumber};

use super::{SessionConfig, DEFAULT_WINDOW};

/// Session builder
#[derive(Debug, Clone)]
pub struct Builder {
    incoming_window: TransferNumber,
    outgoing_window: TransferNumber,
    handle_max: Handle,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            incoming_window: DEFAULT_WINDOW,
            outgoing_window: DEFAULT_WINDOW,
            handle_max: Handle::MAX,
        }
    }

    /// Set the incoming-window
    pub fn incoming_window(mut self, value: TransferNumber) -> Self {
        self.incoming_window = value;
        self
    }

    /// Set the outgoing-window
    pub fn outgoing_window(mut self, value: TransferNumber) -> Self {
        self.outgoing_window = value;
        self
    }

    /// Set the handle-max
    pub fn handle_max(mut self, value: Handle) -> Self {
        self.handle_max = value;
        self
    }

    /// Builds the [`SessionConfig`]
    pub fn build(self) -> SessionConfig {
        SessionConfig {
            incoming_window: self.incoming_window,
            outgoing_window: self.outgoing_window,
            handle_max: self.handle_max,
        }
    }
}
