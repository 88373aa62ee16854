//! Registry of the connection and session shared by links

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    connection::ConnectionConfig,
    session::SessionConfig,
    transport::{
        Attach, ConnectionId, DispositionReceiver, LinkHandle, SessionId, Transport,
        TransportError,
    },
};

/// Holds the transport together with the connection and session opened on it
///
/// Links hold an `Arc<Endpoints>` and call [`Endpoints::session`] before
/// every send. The connection and the session are created the first time
/// they are needed. If either has gone away both are torn down and
/// recreated, connection first. Every re-establishment bumps the
/// generation so that links know to re-attach.
pub struct Endpoints {
    inner: Mutex<Inner>,
}

struct Inner {
    transport: Box<dyn Transport>,
    connection_config: ConnectionConfig,
    session_config: SessionConfig,
    connection: Option<ConnectionId>,
    session: Option<SessionId>,
    generation: u64,
}

impl std::fmt::Debug for Endpoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Formatting must not block, the lock may be held by this very thread
        match self.inner.try_lock() {
            Some(inner) => f
                .debug_struct("Endpoints")
                .field("connection", &inner.connection)
                .field("session", &inner.session)
                .field("generation", &inner.generation)
                .finish(),
            None => f
                .debug_struct("Endpoints")
                .field("inner", &"<locked>")
                .finish(),
        }
    }
}

impl Endpoints {
    /// Creates a registry. Nothing is opened until a link needs it.
    pub fn new(
        transport: impl Transport + 'static,
        connection_config: ConnectionConfig,
        session_config: SessionConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner {
                transport: Box::new(transport),
                connection_config,
                session_config,
                connection: None,
                session: None,
                generation: 0,
            }),
        })
    }

    /// Returns a live session and the generation it belongs to, opening the
    /// connection and the session if needed
    pub fn session(&self) -> Result<(SessionId, u64), TransportError> {
        self.inner.lock().ensure_session()
    }

    /// Attaches a link on a live session. The session is checked and the
    /// link attached under one lock, so the returned generation is the one
    /// the handle belongs to.
    pub(crate) fn attach(
        &self,
        attach: &Attach,
    ) -> Result<(LinkHandle, DispositionReceiver, u64), TransportError> {
        let mut inner = self.inner.lock();
        let (session, generation) = inner.ensure_session()?;
        let (handle, dispositions) = inner.transport.attach_link(session, attach)?;
        Ok((handle, dispositions, generation))
    }

    /// Drops the current connection and session. The next call to
    /// [`Endpoints::session`] recreates both.
    pub fn invalidate(&self) {
        #[cfg(feature = "tracing")]
        tracing::warn!("Invalidating connection and session");
        #[cfg(feature = "log")]
        log::warn!("Invalidating connection and session");

        self.inner.lock().tear_down();
    }

    /// Number of times the session has been (re-)established
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Runs `op` with exclusive access to the transport
    pub(crate) fn with_transport<R>(&self, op: impl FnOnce(&mut dyn Transport) -> R) -> R {
        let mut inner = self.inner.lock();
        op(inner.transport.as_mut())
    }
}

impl Inner {
    fn ensure_session(&mut self) -> Result<(SessionId, u64), TransportError> {
        if let (Some(connection), Some(session)) = (self.connection, self.session) {
            if self.transport.is_connection_open(connection)
                && self.transport.is_session_open(session)
            {
                return Ok((session, self.generation));
            }
        }

        self.tear_down();

        let connection = self.transport.connect(&self.connection_config)?;
        self.connection = Some(connection);
        #[cfg(feature = "tracing")]
        tracing::info!(?connection, host = self.connection_config.host(), "Connection opened");
        #[cfg(feature = "log")]
        log::info!("Connection opened {:?} to {}", connection, self.connection_config.host());

        let session = match self.transport.open_session(connection, &self.session_config) {
            Ok(session) => session,
            Err(err) => {
                self.tear_down();
                return Err(err);
            }
        };
        self.session = Some(session);
        self.generation += 1;
        #[cfg(feature = "tracing")]
        tracing::info!(?session, generation = self.generation, "Session begun");
        #[cfg(feature = "log")]
        log::info!("Session begun {:?}, generation {}", session, self.generation);

        Ok((session, self.generation))
    }

    fn tear_down(&mut self) {
        self.session = None;
        if let Some(connection) = self.connection.take() {
            self.transport.close_connection(connection);
        }
    }
}
