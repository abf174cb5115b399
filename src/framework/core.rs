//! # Core Connector Plumbing
//!
//! This module defines the building blocks every remote-touching accessor goes through.
//!
//! ## Key Types
//!
//! - [`DataConnector`]: The ordered send/receive channel to the remote graph store.
//! - [`Query`]: The typed request, one variant per subsystem.
//! - [`Reply`]: The `{"Ok": ..}` / `{"Err": ..}` envelope every response arrives in.
//! - [`ConnectorError`]: Transport-level failures (closed channel, missing reply).

use crate::error::{ResourceError, Result};
use crate::model::{AssetFilter, AssetRecord, ContainerFilter, ResourceId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

// =============================================================================
// 1. THE CONNECTOR
// =============================================================================

/// Errors raised by a [`DataConnector`] itself, before any reply is interpreted.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ConnectorError {
    #[error("Connector closed")]
    Closed,
    #[error("Connector yielded no response")]
    NoResponse,
    #[error("Transport error: {0}")]
    Transport(String),
}

/// A synchronous, ordered, single-consumer channel to the remote graph store.
///
/// # Architecture Note
/// The connector is the only seam between the object model and the transport.
/// Framing, encoding, timeouts and cancellation all belong to the implementor;
/// the object model only ever performs one `send` followed by one `receive`.
///
/// Implementations in this crate:
/// - [`ChannelConnector`](crate::framework::channel::ChannelConnector) for an in-process store.
/// - [`MockConnector`](crate::framework::mock::MockConnector) for tests.
pub trait DataConnector: Send {
    /// Sends one request message.
    fn send(&mut self, message: Value) -> Result<(), ConnectorError>;

    /// Blocks until the reply to the last request arrives.
    fn receive(&mut self) -> Result<Value, ConnectorError>;
}

// =============================================================================
// 2. THE TYPED REQUESTS
// =============================================================================

/// A request to the remote graph store.
///
/// Serde's externally tagged representation produces exactly the wire shape:
/// a single key naming the subsystem, wrapping a single key naming the operation,
/// wrapping the argument object.
///
/// ```
/// use resource_graph_client::framework::{GraphQuery, Query};
///
/// let query = Query::Graph(GraphQuery::Children {
///     project: "p1".into(),
///     parent: "c1".into(),
/// });
/// assert_eq!(
///     serde_json::to_value(&query).unwrap(),
///     serde_json::json!({"Graph": {"Children": {"project": "p1", "parent": "c1"}}})
/// );
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Query {
    Container(ContainerQuery),
    Graph(GraphQuery),
    Asset(AssetQuery),
    #[serde(rename = "AnalysisCommand")]
    Analysis(AnalysisQuery),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ContainerQuery {
    /// Retrieve a container record with its assets.
    ///
    /// # Returns
    /// `ContainerRecord`
    GetByIdForAnalysis {
        project: ResourceId,
        container: ResourceId,
    },

    /// Find containers below `root`, the graph root's id, matching `query`.
    ///
    /// # Returns
    /// `Vec<ContainerRecord>`
    Search {
        project: ResourceId,
        root: ResourceId,
        query: ContainerFilter,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum GraphQuery {
    /// Retrieve a container's children.
    ///
    /// # Returns
    /// `Vec<ContainerRecord>`
    Children {
        project: ResourceId,
        parent: ResourceId,
    },

    /// Retrieve a container's parent up to the given root.
    ///
    /// # Returns
    /// `Option<ContainerRecord>`, `null` when the container is the graph's root.
    Parent {
        project: ResourceId,
        root: ResourceId,
        container: ResourceId,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum AssetQuery {
    /// Retrieve the asset's parent container.
    ///
    /// # Returns
    /// `ContainerRecord`
    Parent {
        project: ResourceId,
        asset: ResourceId,
    },

    /// Find assets below `root`, the graph root's id, matching `query`.
    ///
    /// # Returns
    /// `Vec<AssetRecord>`
    Search {
        project: ResourceId,
        root: ResourceId,
        query: AssetFilter,
    },

    /// Create a new asset in the `root` container.
    ///
    /// # Returns
    /// Nothing meaningful; only the envelope is checked.
    Add {
        project: ResourceId,
        root: ResourceId,
        asset: AssetRecord,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum AnalysisQuery {
    /// Attach a message to a resource for the user to review.
    ///
    /// # Returns
    /// Nothing meaningful; only the envelope is checked.
    Flag {
        resource: ResourceId,
        message: String,
    },
}

// =============================================================================
// 3. THE REPLY ENVELOPE
// =============================================================================

/// The envelope every response arrives in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Reply {
    Ok(Value),
    Err(Value),
}

impl Reply {
    /// Decodes a raw reply message.
    ///
    /// `null` means the connector produced nothing; anything without an `Ok` or `Err`
    /// key is malformed. Both are protocol errors.
    pub fn from_message(message: Value) -> Result<Self> {
        if message.is_null() {
            return Err(ResourceError::Protocol("no response".to_string()));
        }
        serde_json::from_value(message)
            .map_err(|e| ResourceError::Protocol(format!("malformed reply: {e}")))
    }

    /// Encodes the reply as a wire message.
    pub fn into_message(self) -> Value {
        match self {
            Reply::Ok(payload) => serde_json::json!({ "Ok": payload }),
            Reply::Err(message) => serde_json::json!({ "Err": message }),
        }
    }

    /// Returns the `Ok` payload, or the server's message as a remote error.
    pub fn into_payload(self) -> Result<Value> {
        match self {
            Reply::Ok(payload) => Ok(payload),
            Reply::Err(Value::String(message)) => Err(ResourceError::Remote(message)),
            Reply::Err(message) => Err(ResourceError::Remote(message.to_string())),
        }
    }
}

/// Locks a cache slot, recovering the value if a previous holder panicked.
///
/// Cache slots are only ever replaced wholesale, so a poisoned slot still holds a
/// complete value.
pub(crate) fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
