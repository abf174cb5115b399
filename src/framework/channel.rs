//! # In-Process Connector
//!
//! A [`DataConnector`] backed by two Tokio `mpsc` channels, for embedding a graph store
//! in the same process as the object model.
//!
//! The client half, [`ChannelConnector`], blocks; the store half, [`ConnectorEndpoint`],
//! runs as an async task and hands every request to a [`RequestHandler`].
//!
//! ```ignore
//! let (connector, endpoint) = channel(16);
//! runtime.spawn(endpoint.run(store));
//! let session = Session::new(config, connector);
//! ```

use crate::framework::core::{ConnectorError, DataConnector, Query, Reply};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Creates a connected client/endpoint pair.
pub fn channel(buffer_size: usize) -> (ChannelConnector, ConnectorEndpoint) {
    let (request_tx, request_rx) = mpsc::channel(buffer_size);
    let (reply_tx, reply_rx) = mpsc::channel(buffer_size);
    let connector = ChannelConnector {
        requests: request_tx,
        replies: reply_rx,
    };
    let endpoint = ConnectorEndpoint {
        requests: request_rx,
        replies: reply_tx,
    };
    (connector, endpoint)
}

/// The blocking client half of [`channel`].
///
/// # Panics
/// Like Tokio's `blocking_send`/`blocking_recv`, `send` and `receive` panic when called
/// from inside an async execution context. Drive the object model from a plain thread
/// or from `tokio::task::spawn_blocking`.
pub struct ChannelConnector {
    requests: mpsc::Sender<Value>,
    replies: mpsc::Receiver<Value>,
}

impl DataConnector for ChannelConnector {
    fn send(&mut self, message: Value) -> Result<(), ConnectorError> {
        self.requests
            .blocking_send(message)
            .map_err(|_| ConnectorError::Closed)
    }

    fn receive(&mut self) -> Result<Value, ConnectorError> {
        self.replies.blocking_recv().ok_or(ConnectorError::NoResponse)
    }
}

/// Answers decoded requests on behalf of the graph store.
#[async_trait]
pub trait RequestHandler: Send {
    async fn handle(&mut self, query: Query) -> Reply;
}

/// The async store half of [`channel`].
pub struct ConnectorEndpoint {
    requests: mpsc::Receiver<Value>,
    replies: mpsc::Sender<Value>,
}

impl ConnectorEndpoint {
    /// Serves requests until the client half is dropped.
    ///
    /// Requests are answered strictly in arrival order, one at a time. A request that
    /// does not decode into a [`Query`] is answered with an `Err` reply.
    pub async fn run<H: RequestHandler>(mut self, mut handler: H) {
        info!("Endpoint started");
        let mut served = 0usize;

        while let Some(message) = self.requests.recv().await {
            let reply = match serde_json::from_value::<Query>(message) {
                Ok(query) => {
                    debug!(?query, "Request");
                    handler.handle(query).await
                }
                Err(e) => {
                    warn!(error = %e, "Unrecognized request");
                    Reply::Err(Value::String(format!("unrecognized request: {e}")))
                }
            };

            if self.replies.send(reply.into_message()).await.is_err() {
                warn!("Client dropped before reply");
                break;
            }
            served += 1;
        }

        info!(served, "Endpoint shutdown");
    }
}
