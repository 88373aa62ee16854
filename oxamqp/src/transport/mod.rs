//! The contract between the link and whatever moves frames to the peer
//!
//! Framing, SASL, TLS and socket handling live behind [`Transport`]. The
//! link only asks it to open endpoints, move transfer payloads and report
//! the dispositions sent back by the peer.

use bytes::Bytes;
use oxamqp_codec::Value;
use oxamqp_types::{
    definitions::{DeliveryTag, MessageFormat, ReceiverSettleMode, Role, SenderSettleMode},
    messaging::{Address, DeliveryState},
};
use tokio::sync::mpsc;

use crate::{connection::ConnectionConfig, session::SessionConfig};

mod error;
pub use error::Error as TransportError;

/// Identifies a connection opened by a [`Transport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub u32);

/// Identifies a session opened by a [`Transport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u32);

/// The handle of an attached link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkHandle(pub u32);

/// Parameters of the attach performative sent for a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attach {
    /// Link name
    pub name: String,

    /// Role of the local endpoint
    pub role: Role,

    /// Settlement policy of the sender
    pub snd_settle_mode: SenderSettleMode,

    /// Settlement policy of the receiver
    pub rcv_settle_mode: ReceiverSettleMode,

    /// Address of the source terminus
    pub source: Option<Address>,

    /// Address of the target terminus
    pub target: Option<Address>,

    /// Largest message the link accepts
    pub max_message_size: Option<u64>,
}

/// Parameters of one transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Delivery tag
    pub delivery_tag: DeliveryTag,

    /// Whether the delivery is sent pre-settled
    pub settled: bool,

    /// Message format
    pub message_format: MessageFormat,
}

/// A disposition received from the peer
///
/// The state stays an undecoded [`Value`] so that the link can reject
/// states it does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disposition {
    /// Tag of the delivery the disposition refers to
    pub delivery_tag: DeliveryTag,

    /// Whether the peer settled the delivery
    pub settled: bool,

    /// The delivery state
    pub state: Value,
}

/// Dispositions for one link, in the order the peer sent them
pub type DispositionReceiver = mpsc::UnboundedReceiver<Disposition>;

/// Sending half handed out by transports that feed [`DispositionReceiver`]s
pub type DispositionSender = mpsc::UnboundedSender<Disposition>;

/// Moves frames to and from the peer
///
/// Methods block until the operation has been handed to the peer or has
/// failed.
pub trait Transport: Send {
    /// Opens a connection
    fn connect(&mut self, config: &ConnectionConfig) -> Result<ConnectionId, TransportError>;

    /// Begins a session on `connection`
    fn open_session(
        &mut self,
        connection: ConnectionId,
        config: &SessionConfig,
    ) -> Result<SessionId, TransportError>;

    /// Attaches a link on `session`. Dispositions for the link are delivered
    /// on the returned receiver.
    fn attach_link(
        &mut self,
        session: SessionId,
        attach: &Attach,
    ) -> Result<(LinkHandle, DispositionReceiver), TransportError>;

    /// Sends one message
    fn transfer(
        &mut self,
        link: LinkHandle,
        transfer: Transfer,
        payload: Bytes,
    ) -> Result<(), TransportError>;

    /// Settles a delivery with `state`
    fn dispose(
        &mut self,
        link: LinkHandle,
        delivery_tag: DeliveryTag,
        state: DeliveryState,
    ) -> Result<(), TransportError>;

    /// Whether `connection` is still open
    fn is_connection_open(&self, connection: ConnectionId) -> bool;

    /// Whether `session` is still mapped
    fn is_session_open(&self, session: SessionId) -> bool;

    /// Releases a connection that is being replaced. Does nothing by default.
    fn close_connection(&mut self, _connection: ConnectionId) {}
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn connect(&mut self, config: &ConnectionConfig) -> Result<ConnectionId, TransportError> {
        (**self).connect(config)
    }

    fn open_session(
        &mut self,
        connection: ConnectionId,
        config: &SessionConfig,
    ) -> Result<SessionId, TransportError> {
        (**self).open_session(connection, config)
    }

    fn attach_link(
        &mut self,
        session: SessionId,
        attach: &Attach,
    ) -> Result<(LinkHandle, DispositionReceiver), TransportError> {
        (**self).attach_link(session, attach)
    }

    fn transfer(
        &mut self,
        link: LinkHandle,
        transfer: Transfer,
        payload: Bytes,
    ) -> Result<(), TransportError> {
        (**self).transfer(link, transfer, payload)
    }

    fn dispose(
        &mut self,
        link: LinkHandle,
        delivery_tag: DeliveryTag,
        state: DeliveryState,
    ) -> Result<(), TransportError> {
        (**self).dispose(link, delivery_tag, state)
    }

    fn is_connection_open(&self, connection: ConnectionId) -> bool {
        (**self).is_connection_open(connection)
    }

    fn is_session_open(&self, session: SessionId) -> bool {
        (**self).is_session_open(session)
    }

    fn close_connection(&mut self, connection: ConnectionId) {
        (**self).close_connection(connection)
    }
}
