//! Runtime environment of the object model.
//!
//! This module contains what the process supplies around the entities:
//!
//! - **Configuration**: which project and graph root a session works against
//! - **Live mode**: whether cached values may be trusted
//! - **Observability setup**: initializing tracing and logging
//!
//! # Main Components
//!
//! - [`SessionConfig`] - Project id and root id, explicit or from the environment
//! - [`LiveMode`] - The cache-bypass signal
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod tracing;

pub use self::config::*;
pub use self::tracing::*;
