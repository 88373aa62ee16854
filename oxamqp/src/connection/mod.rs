//! Connection configuration

use oxamqp_types::definitions::{Milliseconds, PORT};
use url::Url;

pub mod builder;
pub use builder::Builder;

/// Default host when no url is configured
pub const DEFAULT_HOST: &str = "localhost";

/// Default max-frame-size
pub const DEFAULT_MAX_FRAME_SIZE: u32 = u32::MAX;

/// Default channel-max
pub const DEFAULT_CHANNEL_MAX: u16 = 255;

/// Parameters used by a [`Transport`](crate::transport::Transport) to open
/// a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Address of the peer. `None` means `amqp://localhost:5672`.
    pub url: Option<Url>,

    /// Container id of the local container
    pub container_id: String,

    /// The name of the host (either fully qualified or relative) to which the
    /// sending peer is connecting
    pub hostname: Option<String>,

    /// Largest frame size the local peer accepts, never below 512
    pub max_frame_size: u32,

    /// Highest channel number that can be used on the connection
    pub channel_max: u16,

    /// Idle time-out in milliseconds
    pub idle_time_out: Option<Milliseconds>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Builder::new().build()
    }
}

impl ConnectionConfig {
    /// Creates a builder for [`ConnectionConfig`]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Host of the peer
    pub fn host(&self) -> &str {
        self.url
            .as_ref()
            .and_then(|url| url.host_str())
            .unwrap_or(DEFAULT_HOST)
    }

    /// Port of the peer
    pub fn port(&self) -> u16 {
        self.url
            .as_ref()
            .and_then(|url| url.port())
            .unwrap_or(PORT)
    }
}
