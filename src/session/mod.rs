//! The session: project configuration plus the connector, shared by every entity.
//!
//! Entities never own their session. They hold a [`SessionHandle`], a weak
//! reference, so there are no ownership cycles between Containers, Assets and the
//! session, and dropping the session disconnects every entity it produced.

pub mod command;
pub mod search;

use crate::error::{ResourceError, Result};
use crate::framework::core::{lock, DataConnector, Query, Reply};
use crate::model::ResourceId;
use crate::runtime::{LiveMode, SessionConfig};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, instrument};

/// Binds a project, its graph root and a connector.
///
/// # Concurrency Model
/// The connector is an ordered single-consumer channel. [`Session::request`] holds the
/// connector for the complete send/receive round trip, so callers sharing one session
/// are serialized and at most one request is ever in flight.
pub struct Session {
    config: SessionConfig,
    live_mode: LiveMode,
    connector: Mutex<Box<dyn DataConnector>>,
}

impl Session {
    /// Creates a session whose live mode follows the process environment.
    pub fn new(config: SessionConfig, connector: impl DataConnector + 'static) -> Arc<Self> {
        Self::with_live_mode(config, LiveMode::Environment, connector)
    }

    pub fn with_live_mode(
        config: SessionConfig,
        live_mode: LiveMode,
        connector: impl DataConnector + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            live_mode,
            connector: Mutex::new(Box::new(connector)),
        })
    }

    /// A non-owning handle for entities.
    pub fn handle(self: &Arc<Self>) -> SessionHandle {
        SessionHandle(Arc::downgrade(self))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn project(&self) -> &ResourceId {
        &self.config.project
    }

    pub fn root_id(&self) -> &ResourceId {
        &self.config.root
    }

    /// Whether cached values must be bypassed. Evaluated on every call.
    pub fn is_live(&self) -> bool {
        self.live_mode.is_live()
    }

    /// Performs one round trip and unwraps the reply envelope.
    ///
    /// # Errors
    /// - [`ResourceError::Remote`] when the store answers `Err`.
    /// - [`ResourceError::Protocol`] when the connector fails, yields nothing, or the
    ///   reply has neither `Ok` nor `Err`.
    #[instrument(skip(self))]
    pub fn request(&self, query: &Query) -> Result<Value> {
        let message = serde_json::to_value(query)?;
        let reply = {
            let mut connector = lock(&self.connector);
            debug!("Sending request");
            connector.send(message)?;
            connector.receive()?
        };
        Reply::from_message(reply)?.into_payload()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("live_mode", &self.live_mode)
            .finish_non_exhaustive()
    }
}

/// Non-owning reference from an entity to its [`Session`].
#[derive(Clone)]
pub struct SessionHandle(Weak<Session>);

impl SessionHandle {
    /// The session, if it is still alive.
    pub fn upgrade(&self) -> Option<Arc<Session>> {
        self.0.upgrade()
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(session) => write!(f, "SessionHandle({})", session.project()),
            None => write!(f, "SessionHandle(<dropped>)"),
        }
    }
}

/// The live session behind `handle`, if any.
pub(crate) fn bound(handle: Option<&SessionHandle>) -> Option<Arc<Session>> {
    handle.and_then(SessionHandle::upgrade)
}

/// Like [`bound`], but a missing or dropped session is a configuration error.
pub(crate) fn require(handle: Option<&SessionHandle>) -> Result<Arc<Session>> {
    bound(handle).ok_or_else(ResourceError::no_connector)
}
