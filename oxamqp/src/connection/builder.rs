//! Builder for [`ConnectionConfig`]

use oxamqp_types::definitions::{Milliseconds, MIN_MAX_FRAME_SIZE};
use url::Url;

use super::{ConnectionConfig, DEFAULT_CHANNEL_MAX, DEFAULT_MAX_FRAME_SIZE};

/// Connection builder
#[derive(Debug, Clone)]
pub struct Builder {
    url: Option<Url>,
    container_id: Option<String>,
    hostname: Option<String>,
    max_frame_size: u32,
    channel_max: u16,
    idle_time_out: Option<Milliseconds>,
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
            url: None,
            container_id: None,
            hostname: None,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            channel_max: DEFAULT_CHANNEL_MAX,
            idle_time_out: None,
        }
    }

    /// Set the address of the peer
    pub fn url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Set the container id
    pub fn container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = Some(id.into());
        self
    }

    /// Set the hostname sent in the open performative
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Set the max-frame-size. Values below 512 are raised to 512.
    pub fn max_frame_size(mut self, max_frame_size: u32) -> Self {
        self.max_frame_size = std::cmp::max(MIN_MAX_FRAME_SIZE as u32, max_frame_size);
        self
    }

    /// Set the channel-max
    pub fn channel_max(mut self, channel_max: u16) -> Self {
        self.channel_max = channel_max;
        self
    }

    /// Set the idle time-out
    pub fn idle_time_out(mut self, idle_time_out: impl Into<Option<Milliseconds>>) -> Self {
        self.idle_time_out = idle_time_out.into();
        self
    }

    /// Builds the [`ConnectionConfig`]. Without an explicit container id one
    /// is derived from the process id.
    pub fn build(self) -> ConnectionConfig {
        let container_id = self
            .container_id
            .unwrap_or_else(|| format!("oxamqp-{}", std::process::id()));
        let hostname = self
            .hostname
            .or_else(|| self.url.as_ref().and_then(|url| url.host_str()).map(String::from));
        ConnectionConfig {
            url: self.url,
            container_id,
            hostname,
            max_frame_size: self.max_frame_size,
            channel_max: self.channel_max,
            idle_time_out: self.idle_time_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::Builder;

    #[test]
    fn max_frame_size_is_clamped() {
        let config = Builder::new().max_frame_size(100).build();
        assert_eq!(config.max_frame_size, 512);
        let config = Builder::new().max_frame_size(4096).build();
        assert_eq!(config.max_frame_size, 4096);
    }

    #[test]
    fn default_address_is_localhost() {
        let config = Builder::new().build();
        assert_eq!(config.host(), "localhost");
        assert_eq!(config.port(), 5672);
        assert!(config.container_id.starts_with("oxamqp-"));
    }

    #[test]
    fn hostname_defaults_to_url_host() {
        let url = Url::parse("amqp://example.com:5673").unwrap();
        let config = Builder::new().url(url).container_id("c1").build();
        assert_eq!(config.hostname.as_deref(), Some("example.com"));
        assert_eq!(config.port(), 5673);
        assert_eq!(config.container_id, "c1");
    }
}
