//! Implementation of the sending link

use std::{collections::VecDeque, sync::Arc};

use bytes::Bytes;
use oxamqp_codec::primitives::Binary;
use oxamqp_types::{
    definitions::{DeliveryTag, ReceiverSettleMode, Role, SenderSettleMode},
    messaging::{
        Address, Assembler, DeliveryPhase, DeliveryState, IntoBody, Message, Outcome,
        MESSAGE_FORMAT,
    },
};

use crate::{
    endpoints::Endpoints,
    transport::{Attach, DispositionReceiver, LinkHandle, Transfer, TransportError},
};

use super::{
    builder::Builder,
    delivery::{DispositionCallback, Guarantee, SendOptions},
    SendError, DEFAULT_DISPOSITIONS_CAPACITY,
};

/// A link that sends messages and blocks on their outcome
///
/// The link refers to a shared [`Endpoints`] registry instead of owning a
/// session. It attaches the first time it sends and re-attaches whenever
/// the registry has re-established the session since.
///
/// Only one delivery is in flight per link, which is why sending takes
/// `&mut self`.
///
/// # Example
///
/// ```rust,ignore
/// let mut link = SendingLink::builder()
///     .name("link-1")
///     .target("q1")
///     .attach(endpoints);
///
/// let options = SendOptions::builder()
///     .guarantee(Guarantee::ExactlyOnce)
///     .on_disposition(|_state| None)
///     .build();
/// let outcome = link.send_with("message", options)?;
/// ```
pub struct SendingLink {
    name: String,
    source: Option<Address>,
    target: Option<Address>,
    max_message_size: Option<u64>,
    endpoints: Arc<Endpoints>,

    attached: Option<Attached>,
    next_tag: u32,
    last_delivery_tag: Option<DeliveryTag>,

    settlements: VecDeque<(DeliveryTag, Outcome)>,
    dispositions_capacity: usize,
}

struct Attached {
    handle: LinkHandle,
    generation: u64,
    dispositions: DispositionReceiver,
}

impl std::fmt::Debug for SendingLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendingLink")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("handle", &self.attached.as_ref().map(|a| a.handle))
            .field("settlements", &self.settlements.len())
            .finish()
    }
}

impl SendingLink {
    /// Creates a builder for [`SendingLink`]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Creates a link named `name`. No network activity takes place.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<Option<Address>>,
        endpoints: Arc<Endpoints>,
    ) -> Self {
        Self::from_parts(
            name.into(),
            source.into(),
            None,
            None,
            DEFAULT_DISPOSITIONS_CAPACITY,
            endpoints,
        )
    }

    pub(crate) fn from_parts(
        name: String,
        source: Option<Address>,
        target: Option<Address>,
        max_message_size: Option<u64>,
        dispositions_capacity: usize,
        endpoints: Arc<Endpoints>,
    ) -> Self {
        Self {
            name,
            source,
            target,
            max_message_size,
            endpoints,
            attached: None,
            next_tag: 0,
            last_delivery_tag: None,
            settlements: VecDeque::with_capacity(dispositions_capacity),
            dispositions_capacity,
        }
    }

    /// Name of the link
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source address
    pub fn source(&self) -> Option<&Address> {
        self.source.as_ref()
    }

    /// Target address
    pub fn target(&self) -> Option<&Address> {
        self.target.as_ref()
    }

    /// The tag of the most recent transfer
    pub fn last_delivery_tag(&self) -> Option<&DeliveryTag> {
        self.last_delivery_tag.as_ref()
    }

    /// The outcome the link settled `delivery_tag` with. Only exactly-once
    /// deliveries are recorded and only the most recent ones are kept.
    pub fn settlement(&self, delivery_tag: &[u8]) -> Option<&Outcome> {
        self.settlements
            .iter()
            .find(|(tag, _)| tag.as_slice() == delivery_tag)
            .map(|(_, outcome)| outcome)
    }

    /// Sends `payload` at most once
    pub fn send(&mut self, payload: impl IntoBody) -> Result<Option<Outcome>, SendError> {
        self.send_with(payload, SendOptions::default())
    }

    /// Sends `payload` with the given sections and guarantee.
    ///
    /// Returns `Ok(None)` for [`Guarantee::AtMostOnce`] once the transport
    /// has taken the message, and the peer's outcome otherwise.
    ///
    /// Errors assembling the message are returned before the transport is
    /// touched. A transport failure invalidates the connection and session;
    /// the message is not retried.
    pub fn send_with(
        &mut self,
        payload: impl IntoBody,
        options: SendOptions,
    ) -> Result<Option<Outcome>, SendError> {
        let SendOptions {
            header,
            delivery_annotations,
            message_annotations,
            properties,
            application_properties,
            footer,
            footer_callbacks,
            guarantee,
            on_disposition,
        } = options;

        let message = Message::builder()
            .header(header)
            .delivery_annotations(delivery_annotations)
            .message_annotations(message_annotations)
            .properties(properties)
            .application_properties(application_properties)
            .footer(footer)
            .body(payload)
            .build()?;
        let assembled = Assembler::new()
            .footer_callbacks(footer_callbacks)
            .assemble(message)?;

        let result = self.deliver(assembled.payload, guarantee, on_disposition);
        if let Err(SendError::Transport(_err)) = &result {
            #[cfg(feature = "tracing")]
            tracing::error!(link = %self.name, error = %_err, "Transport failure");
            #[cfg(feature = "log")]
            log::error!("Transport failure on link {}: {}", self.name, _err);

            self.attached = None;
            self.endpoints.invalidate();
        }
        result
    }

    fn deliver(
        &mut self,
        payload: Bytes,
        guarantee: Guarantee,
        mut on_disposition: Option<DispositionCallback>,
    ) -> Result<Option<Outcome>, SendError> {
        let handle = self.ensure_attached()?;

        let delivery_tag = self.next_delivery_tag();
        let transfer = Transfer {
            delivery_tag: delivery_tag.clone(),
            settled: guarantee.is_pre_settled(),
            message_format: MESSAGE_FORMAT,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(link = %self.name, ?transfer, len = payload.len(), "Transfer");
        #[cfg(feature = "log")]
        log::debug!("Transfer on link {}: {:?}, {} bytes", self.name, transfer, payload.len());

        self.endpoints
            .with_transport(|transport| transport.transfer(handle, transfer, payload))?;

        if guarantee.is_pre_settled() {
            return Ok(None);
        }

        let (outcome, answer, settled) = self.await_outcome(&delivery_tag, &mut on_disposition)?;

        if guarantee == Guarantee::AtLeastOnce {
            // With rcv-settle-mode second the peer waits for the sender to settle
            if !settled {
                let state = DeliveryState::from(outcome.clone());
                self.endpoints.with_transport(|transport| {
                    transport.dispose(handle, delivery_tag.clone(), state)
                })?;

                #[cfg(feature = "tracing")]
                tracing::debug!(link = %self.name, ?outcome, "Settled");
                #[cfg(feature = "log")]
                log::debug!("Settled on link {}: {:?}", self.name, outcome);
            }
        } else if guarantee == Guarantee::ExactlyOnce {
            let settlement = answer.unwrap_or_else(|| outcome.clone());
            let state = DeliveryState::from(settlement.clone());
            self.endpoints.with_transport(|transport| {
                transport.dispose(handle, delivery_tag.clone(), state)
            })?;

            #[cfg(feature = "tracing")]
            tracing::debug!(link = %self.name, ?settlement, "Settled");
            #[cfg(feature = "log")]
            log::debug!("Settled on link {}: {:?}", self.name, settlement);

            self.record_settlement(delivery_tag, settlement);
        }

        Ok(Some(outcome))
    }

    /// Blocks until the peer reports a terminal state for `delivery_tag`.
    /// Returns the outcome, the callback's answer to it and whether the peer
    /// settled the delivery.
    fn await_outcome(
        &mut self,
        delivery_tag: &DeliveryTag,
        on_disposition: &mut Option<DispositionCallback>,
    ) -> Result<(Outcome, Option<Outcome>, bool), SendError> {
        let attached = self
            .attached
            .as_mut()
            .ok_or(SendError::IllegalState("Link is not attached"))?;

        let mut phase = DeliveryPhase::Sent.await_disposition();
        loop {
            let disposition = attached
                .dispositions
                .blocking_recv()
                .ok_or(TransportError::LinkDetached)?;

            if &disposition.delivery_tag != delivery_tag {
                #[cfg(feature = "tracing")]
                tracing::debug!(tag = ?disposition.delivery_tag, "Ignoring disposition for another delivery");
                #[cfg(feature = "log")]
                log::debug!("Ignoring disposition for another delivery {:?}", disposition.delivery_tag);
                continue;
            }

            let state = DeliveryState::try_from(disposition.state)?;

            #[cfg(feature = "tracing")]
            tracing::trace!(?state, "Disposition");
            #[cfg(feature = "log")]
            log::trace!("Disposition {:?}", state);

            let answer = on_disposition.as_mut().and_then(|callback| callback(&state));
            phase = phase.observe(&state);
            if phase.is_terminal() {
                let outcome = Outcome::try_from(state)?;
                return Ok((outcome, answer, disposition.settled));
            }
        }
    }

    fn ensure_attached(&mut self) -> Result<LinkHandle, TransportError> {
        let (_, generation) = self.endpoints.session()?;
        if let Some(attached) = &self.attached {
            if attached.generation == generation {
                return Ok(attached.handle);
            }
        }

        let attach = Attach {
            name: self.name.clone(),
            role: Role::Sender,
            snd_settle_mode: SenderSettleMode::Mixed,
            rcv_settle_mode: ReceiverSettleMode::Second,
            source: self.source.clone(),
            target: self.target.clone(),
            max_message_size: self.max_message_size,
        };
        let (handle, dispositions, generation) = self.endpoints.attach(&attach)?;

        #[cfg(feature = "tracing")]
        tracing::info!(link = %self.name, ?handle, generation, "Link attached");
        #[cfg(feature = "log")]
        log::info!("Link {} attached {:?}, generation {}", self.name, handle, generation);

        self.attached = Some(Attached {
            handle,
            generation,
            dispositions,
        });
        Ok(handle)
    }

    fn next_delivery_tag(&mut self) -> DeliveryTag {
        let tag = Binary::from(self.next_tag.to_be_bytes().to_vec());
        self.next_tag = self.next_tag.wrapping_add(1);
        self.last_delivery_tag = Some(tag.clone());
        tag
    }

    fn record_settlement(&mut self, delivery_tag: DeliveryTag, outcome: Outcome) {
        while self.settlements.len() >= self.dispositions_capacity {
            self.settlements.pop_front();
        }
        self.settlements.push_back((delivery_tag, outcome));
    }
}
