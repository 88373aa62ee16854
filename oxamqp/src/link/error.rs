use crate::transport::TransportError;

/// Error with sending a message
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The message could not be assembled or a disposition could not be
    /// understood. The link and its endpoints are left untouched.
    #[error("Codec error: {0}")]
    Codec(#[from] oxamqp_codec::Error),

    /// The transport failed. The connection and session are invalidated and
    /// re-established on the next send.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Illegal link state
    #[error("Illegal state: {0}")]
    IllegalState(&'static str),
}

impl SendError {
    /// Whether the error came from the transport
    pub fn is_transport(&self) -> bool {
        matches!(self, SendError::Transport(_))
    }
}
