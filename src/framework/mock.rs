//! # Mock Connector
//!
//! Utilities for testing resource navigation without a running graph store.
//!
//! Queue the requests you expect with [`MockConnector::expect`], choose the reply with
//! [`ReplyBuilder::return_ok`] or [`ReplyBuilder::return_err`], hand a clone of the mock
//! to a [`Session`](crate::session::Session), then call [`MockConnector::verify`].

use crate::framework::core::{lock, ConnectorError, DataConnector, Query, Reply};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the reply the mock answers it with.
///
/// A `reply` of `None` simulates a connector that never answers.
struct Expectation {
    request: Value,
    reply: Option<Value>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    pending: VecDeque<Option<Value>>,
    sent: Vec<Value>,
}

/// A mock connector with expectation tracking for fluent testing.
///
/// Clones share the same expectations and request log, so a test keeps one handle
/// while the session owns another.
///
/// # Example
/// ```
/// use resource_graph_client::framework::{GraphQuery, MockConnector, Query};
/// use resource_graph_client::runtime::SessionConfig;
/// use resource_graph_client::session::Session;
///
/// let mut mock = MockConnector::new();
/// mock.expect(Query::Graph(GraphQuery::Children {
///     project: "p1".into(),
///     parent: "root".into(),
/// }))
/// .return_ok(serde_json::json!([]));
///
/// let session = Session::new(SessionConfig::new("p1", "root"), mock.clone());
/// let root = resource_graph_client::container::Container::bound(
///     "root",
///     Default::default(),
///     &session,
/// );
/// assert!(root.children().unwrap().is_empty());
/// mock.verify();
/// ```
///
/// # Panics
/// A request that does not match the next expectation, or arrives when none is
/// queued, panics with both messages in the panic text.
#[derive(Clone, Default)]
pub struct MockConnector {
    state: Arc<Mutex<MockState>>,
}

impl MockConnector {
    /// Creates a new mock connector with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects `query` as the next request.
    pub fn expect(&mut self, query: Query) -> ReplyBuilder {
        let request = match serde_json::to_value(&query) {
            Ok(request) => request,
            Err(e) => panic!("Query {query:?} does not serialize: {e}"),
        };
        ReplyBuilder {
            request,
            state: self.state.clone(),
        }
    }

    /// Number of requests sent through any clone of this mock.
    pub fn request_count(&self) -> usize {
        lock(&self.state).sent.len()
    }

    /// Every request sent so far, in order.
    pub fn sent(&self) -> Vec<Value> {
        lock(&self.state).sent.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

impl DataConnector for MockConnector {
    fn send(&mut self, message: Value) -> Result<(), ConnectorError> {
        let mut state = lock(&self.state);
        state.sent.push(message.clone());
        let Some(expectation) = state.expectations.pop_front() else {
            panic!("Unexpected request: {message}");
        };
        if expectation.request != message {
            panic!(
                "Request mismatch: expected {}, got {message}",
                expectation.request
            );
        }
        state.pending.push_back(expectation.reply);
        Ok(())
    }

    fn receive(&mut self) -> Result<Value, ConnectorError> {
        match lock(&self.state).pending.pop_front() {
            Some(Some(reply)) => Ok(reply),
            _ => Err(ConnectorError::NoResponse),
        }
    }
}

/// Builder for the reply to an expected request.
pub struct ReplyBuilder {
    request: Value,
    state: Arc<Mutex<MockState>>,
}

impl ReplyBuilder {
    /// Answers with `{"Ok": payload}`.
    pub fn return_ok(self, payload: Value) {
        self.push(Some(Reply::Ok(payload).into_message()));
    }

    /// Answers with `{"Err": message}`.
    pub fn return_err(self, message: impl Into<Value>) {
        self.push(Some(Reply::Err(message.into()).into_message()));
    }

    /// Answers with an arbitrary raw message, e.g. one missing both `Ok` and `Err`.
    pub fn return_raw(self, message: Value) {
        self.push(Some(message));
    }

    /// Never answers: the following `receive` fails with [`ConnectorError::NoResponse`].
    pub fn return_nothing(self) {
        self.push(None);
    }

    fn push(self, reply: Option<Value>) {
        lock(&self.state).expectations.push_back(Expectation {
            request: self.request,
            reply,
        });
    }
}
