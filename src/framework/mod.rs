//! Connector plumbing shared by every resource.
//!
//! This module provides the request/response layer the object model is built on.
//!
//! # Main Components
//!
//! - [`DataConnector`] - Trait implemented by anything that can carry a request and its reply
//! - [`Query`] - Typed requests, serialized into the nested single-key wire shape
//! - [`Reply`] - The `Ok`/`Err` envelope
//! - [`channel`] - In-process connector over Tokio channels
//!
//! # Testing
//!
//! See [`mock`] module for a connector that answers from a queue of expectations.

pub mod channel;
pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::channel::{channel, ChannelConnector, ConnectorEndpoint, RequestHandler};
pub use self::core::*;
pub use self::mock::{MockConnector, ReplyBuilder};
