//! A scripted in-memory transport

#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::Arc,
};

use bytes::Bytes;
use oxamqp::{
    codec::{composite::Composite, Value},
    transport::{
        Attach, ConnectionId, Disposition, DispositionReceiver, DispositionSender, LinkHandle,
        SessionId, Transfer, Transport, TransportError,
    },
    types::{
        definitions::DeliveryTag,
        messaging::{Accepted, DeliveryState},
    },
    ConnectionConfig, Endpoints, SessionConfig,
};
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Every call made on the transport, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Connect,
    OpenSession(ConnectionId),
    Attach(SessionId, Attach),
    Transfer(LinkHandle, Transfer, Bytes),
    Dispose(LinkHandle, DeliveryTag, DeliveryState),
    CloseConnection(ConnectionId),
}

/// What the peer does after an unsettled transfer
#[derive(Debug, Clone)]
pub enum Reply {
    /// Reports a state for the delivery just transferred, settling it if
    /// the state is terminal
    State(Value),

    /// Reports a terminal state for the delivery just transferred but leaves
    /// it for the sender to settle
    Unsettled(Value),

    /// Reports a state for some other delivery
    Other(DeliveryTag, Value),

    /// Detaches the link, closing the disposition channel
    Detach,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub calls: Vec<Call>,
    pub replies: VecDeque<Vec<Reply>>,
    pub fail_transfers: usize,
    pub open_connections: HashSet<u32>,
    pub open_sessions: HashSet<u32>,
    next_id: u32,
    senders: HashMap<u32, DispositionSender>,
}

impl MockState {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Scripts the replies to the next unsettled transfer
    pub fn reply(&mut self, replies: Vec<Reply>) {
        self.replies.push_back(replies);
    }

    /// Index of the first call matching `pred`
    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.iter().position(pred)
    }

    pub fn transfers(&self) -> Vec<(Transfer, Bytes)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Transfer(_, transfer, payload) => Some((transfer.clone(), payload.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn dispositions(&self) -> Vec<(DeliveryTag, DeliveryState)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Dispose(_, tag, state) => Some((tag.clone(), state.clone())),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct MockTransport {
    pub state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }
}

impl Transport for MockTransport {
    fn connect(&mut self, _config: &ConnectionConfig) -> Result<ConnectionId, TransportError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Connect);
        let id = state.next_id();
        state.open_connections.insert(id);
        Ok(ConnectionId(id))
    }

    fn open_session(
        &mut self,
        connection: ConnectionId,
        _config: &SessionConfig,
    ) -> Result<SessionId, TransportError> {
        let mut state = self.state.lock();
        state.calls.push(Call::OpenSession(connection));
        if !state.open_connections.contains(&connection.0) {
            return Err(TransportError::ConnectionClosed);
        }
        let id = state.next_id();
        state.open_sessions.insert(id);
        Ok(SessionId(id))
    }

    fn attach_link(
        &mut self,
        session: SessionId,
        attach: &Attach,
    ) -> Result<(LinkHandle, DispositionReceiver), TransportError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Attach(session, attach.clone()));
        if !state.open_sessions.contains(&session.0) {
            return Err(TransportError::SessionClosed);
        }
        let id = state.next_id();
        let (tx, rx) = mpsc::unbounded_channel();
        state.senders.insert(id, tx);
        Ok((LinkHandle(id), rx))
    }

    fn transfer(
        &mut self,
        link: LinkHandle,
        transfer: Transfer,
        payload: Bytes,
    ) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        state
            .calls
            .push(Call::Transfer(link, transfer.clone(), payload));

        if state.fail_transfers > 0 {
            state.fail_transfers -= 1;
            state.open_connections.clear();
            state.open_sessions.clear();
            return Err(TransportError::Io("connection reset".to_string()));
        }

        if transfer.settled {
            return Ok(());
        }

        let replies = state
            .replies
            .pop_front()
            .unwrap_or_else(|| vec![Reply::State(Accepted {}.into_value())]);
        for reply in replies {
            match reply {
                Reply::State(value) => {
                    let settled = is_terminal(&value);
                    send(&state, link, transfer.delivery_tag.clone(), value, settled)
                }
                Reply::Unsettled(value) => {
                    send(&state, link, transfer.delivery_tag.clone(), value, false)
                }
                Reply::Other(tag, value) => {
                    let settled = is_terminal(&value);
                    send(&state, link, tag, value, settled)
                }
                Reply::Detach => {
                    state.senders.remove(&link.0);
                }
            }
        }
        Ok(())
    }

    fn dispose(
        &mut self,
        link: LinkHandle,
        delivery_tag: DeliveryTag,
        delivery_state: DeliveryState,
    ) -> Result<(), TransportError> {
        self.state
            .lock()
            .calls
            .push(Call::Dispose(link, delivery_tag, delivery_state));
        Ok(())
    }

    fn is_connection_open(&self, connection: ConnectionId) -> bool {
        self.state.lock().open_connections.contains(&connection.0)
    }

    fn is_session_open(&self, session: SessionId) -> bool {
        self.state.lock().open_sessions.contains(&session.0)
    }

    fn close_connection(&mut self, connection: ConnectionId) {
        let mut state = self.state.lock();
        state.calls.push(Call::CloseConnection(connection));
        state.open_connections.remove(&connection.0);
    }
}

fn is_terminal(value: &Value) -> bool {
    !matches!(
        DeliveryState::try_from(value.clone()),
        Ok(DeliveryState::Received(_))
    )
}

fn send(
    state: &MockState,
    link: LinkHandle,
    delivery_tag: DeliveryTag,
    value: Value,
    settled: bool,
) {
    if let Some(tx) = state.senders.get(&link.0) {
        let _ = tx.send(Disposition {
            delivery_tag,
            settled,
            state: value,
        });
    }
}

/// A registry over a fresh mock transport
pub fn endpoints() -> (Arc<Endpoints>, Arc<Mutex<MockState>>) {
    let transport = MockTransport::new();
    let state = transport.state.clone();
    let endpoints = Endpoints::new(
        transport,
        ConnectionConfig::default(),
        SessionConfig::default(),
    );
    (endpoints, state)
}
