//! Builder for [`SendingLink`]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use oxamqp_types::messaging::Address;

use crate::endpoints::Endpoints;

use super::{SendingLink, DEFAULT_DISPOSITIONS_CAPACITY};

static LINK_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Builder for a [`SendingLink`]
#[derive(Debug, Clone)]
pub struct Builder {
    /// Name of the link. A unique name is generated if none is given.
    pub name: Option<String>,

    /// Source address
    pub source: Option<Address>,

    /// Target address
    pub target: Option<Address>,

    /// Largest message the link offers to send
    pub max_message_size: Option<u64>,

    /// How many settlements the link remembers
    pub dispositions_capacity: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a new builder
    pub fn new() -> Self {
        Self {
            name: None,
            source: None,
            target: None,
            max_message_size: None,
            dispositions_capacity: DEFAULT_DISPOSITIONS_CAPACITY,
        }
    }

    /// Set the link name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the source address
    pub fn source(mut self, source: impl Into<Address>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the target address
    pub fn target(mut self, target: impl Into<Address>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the max message size
    pub fn max_message_size(mut self, max_message_size: impl Into<Option<u64>>) -> Self {
        self.max_message_size = max_message_size.into();
        self
    }

    /// Set how many settlements the link remembers. At least one is kept.
    pub fn dispositions_capacity(mut self, capacity: usize) -> Self {
        self.dispositions_capacity = capacity.max(1);
        self
    }

    /// Creates the link on `endpoints`. Nothing is sent to the peer until
    /// the first send.
    pub fn attach(self, endpoints: Arc<Endpoints>) -> SendingLink {
        let name = self.name.unwrap_or_else(|| {
            format!(
                "oxamqp-sender-{}",
                LINK_COUNTER.fetch_add(1, Ordering::Relaxed)
            )
        });
        SendingLink::from_parts(
            name,
            self.source,
            self.target,
            self.max_message_size,
            self.dispositions_capacity,
            endpoints,
        )
    }
}
