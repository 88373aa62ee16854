use oxamqp_types::definitions;

/// Transport error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO Error {0}")]
    Io(String),

    /// The connection is closed
    #[error("Connection is closed")]
    ConnectionClosed,

    /// The session is closed
    #[error("Session is closed")]
    SessionClosed,

    /// The link has been detached
    #[error("Link is detached")]
    LinkDetached,

    /// The remote peer closed an endpoint with an error
    #[error("Remote error {0}")]
    Remote(definitions::Error),

    /// Any other failure reported by the transport
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<definitions::Error> for Error {
    fn from(err: definitions::Error) -> Self {
        Self::Remote(err)
    }
}
