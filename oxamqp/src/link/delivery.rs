//! Per-send options

use oxamqp_types::messaging::{
    ApplicationProperties, DeliveryAnnotations, DeliveryState, Footer, FooterCallback, Header,
    MessageAnnotations, Outcome, Properties,
};

/// Called for every delivery state the peer reports for a guaranteed send,
/// progress included. For [`Guarantee::ExactlyOnce`] the answer given to
/// the terminal state, if any, is the outcome the sender settles with.
pub type DispositionCallback = Box<dyn FnMut(&DeliveryState) -> Option<Outcome> + Send>;

/// Delivery guarantee of a send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Guarantee {
    /// Sent pre-settled, the peer's outcome is not awaited
    #[default]
    AtMostOnce,

    /// Sent unsettled, the send blocks until the peer reports an outcome.
    /// An outcome the peer left unsettled is settled with that same outcome.
    AtLeastOnce,

    /// As [`Guarantee::AtLeastOnce`], then the sender settles the delivery
    /// by echoing an outcome back to the peer
    ExactlyOnce,
}

impl Guarantee {
    /// Whether the transfer is sent settled
    pub fn is_pre_settled(&self) -> bool {
        matches!(self, Guarantee::AtMostOnce)
    }
}

/// Optional sections and delivery settings for one send
#[derive(Default)]
pub struct SendOptions {
    pub(crate) header: Option<Header>,
    pub(crate) delivery_annotations: Option<DeliveryAnnotations>,
    pub(crate) message_annotations: Option<MessageAnnotations>,
    pub(crate) properties: Option<Properties>,
    pub(crate) application_properties: Option<ApplicationProperties>,
    pub(crate) footer: Option<Footer>,
    pub(crate) footer_callbacks: Vec<FooterCallback>,
    pub(crate) guarantee: Guarantee,
    pub(crate) on_disposition: Option<DispositionCallback>,
}

impl std::fmt::Debug for SendOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendOptions")
            .field("header", &self.header)
            .field("delivery_annotations", &self.delivery_annotations)
            .field("message_annotations", &self.message_annotations)
            .field("properties", &self.properties)
            .field("application_properties", &self.application_properties)
            .field("footer", &self.footer)
            .field("footer_callbacks", &self.footer_callbacks.len())
            .field("guarantee", &self.guarantee)
            .field("on_disposition", &self.on_disposition.is_some())
            .finish()
    }
}

impl SendOptions {
    /// Creates a builder for [`SendOptions`]
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The delivery guarantee
    pub fn guarantee(&self) -> Guarantee {
        self.guarantee
    }
}

impl From<Guarantee> for SendOptions {
    fn from(guarantee: Guarantee) -> Self {
        Self {
            guarantee,
            ..Default::default()
        }
    }
}

/// Builder for [`SendOptions`]
#[derive(Debug, Default)]
pub struct Builder {
    inner: SendOptions,
}

impl Builder {
    /// Set the header
    pub fn header(mut self, header: impl Into<Option<Header>>) -> Self {
        self.inner.header = header.into();
        self
    }

    /// Set the delivery annotations
    pub fn delivery_annotations(
        mut self,
        delivery_annotations: impl Into<Option<DeliveryAnnotations>>,
    ) -> Self {
        self.inner.delivery_annotations = delivery_annotations.into();
        self
    }

    /// Set the message annotations
    pub fn message_annotations(
        mut self,
        message_annotations: impl Into<Option<MessageAnnotations>>,
    ) -> Self {
        self.inner.message_annotations = message_annotations.into();
        self
    }

    /// Set the properties
    pub fn properties(mut self, properties: impl Into<Option<Properties>>) -> Self {
        self.inner.properties = properties.into();
        self
    }

    /// Set the application properties
    pub fn application_properties(
        mut self,
        application_properties: impl Into<Option<ApplicationProperties>>,
    ) -> Self {
        self.inner.application_properties = application_properties.into();
        self
    }

    /// Set footer entries known before the message is encoded. Footer
    /// callbacks see these entries first.
    pub fn footer(mut self, footer: impl Into<Option<Footer>>) -> Self {
        self.inner.footer = footer.into();
        self
    }

    /// Add a footer callback. Callbacks run in the order they are added.
    pub fn footer_callback<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut Footer, &[u8]) + Send + 'static,
    {
        self.inner.footer_callbacks.push(Box::new(callback));
        self
    }

    /// Set the delivery guarantee
    pub fn guarantee(mut self, guarantee: Guarantee) -> Self {
        self.inner.guarantee = guarantee;
        self
    }

    /// Set the disposition callback
    pub fn on_disposition<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&DeliveryState) -> Option<Outcome> + Send + 'static,
    {
        self.inner.on_disposition = Some(Box::new(callback));
        self
    }

    /// Builds the [`SendOptions`]
    pub fn build(self) -> SendOptions {
        self.inner
    }
}

impl From<Builder> for SendOptions {
    fn from(builder: Builder) -> Self {
        builder.build()
    }
}
