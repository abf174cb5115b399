//! Error types for resource navigation.

use crate::framework::ConnectorError;
use thiserror::Error;

/// Errors surfaced by the lazy accessors on [`Container`](crate::container::Container)
/// and [`Asset`](crate::asset::Asset), and by [`Session`](crate::session::Session) queries.
///
/// Every failure reaches the caller of the accessor that triggered it. Nothing is
/// retried, and cached state is left exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceError {
    /// Remote access was required but no session is bound to the resource.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The server answered with an explicit `Err` reply.
    ///
    /// Carries the server's message unchanged.
    #[error("Remote error: {0}")]
    Remote(String),

    /// The connector yielded no reply, or a reply that does not have the expected shape.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl ResourceError {
    /// The error returned when an accessor needs a connector and none is bound.
    pub fn no_connector() -> Self {
        ResourceError::Configuration("no connector".to_string())
    }
}

impl From<ConnectorError> for ResourceError {
    fn from(err: ConnectorError) -> Self {
        ResourceError::Protocol(err.to_string())
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(err: serde_json::Error) -> Self {
        ResourceError::Protocol(format!("malformed payload: {err}"))
    }
}

pub type Result<T, E = ResourceError> = std::result::Result<T, E>;
