//! Session configuration and the live-mode signal.

use crate::error::{ResourceError, Result};
use crate::model::ResourceId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Environment variable holding the project id.
pub const PROJECT_ID_KEY: &str = "RESOURCE_GRAPH_PROJECT_ID";

/// Environment variable holding the graph root id.
///
/// A runner sets it when it executes an analysis against a container; its presence
/// is what takes the process out of live mode.
pub const CONTAINER_ID_KEY: &str = "RESOURCE_GRAPH_CONTAINER_ID";

/// Project and graph root a [`Session`](crate::session::Session) works against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub project: ResourceId,
    pub root: ResourceId,
}

impl SessionConfig {
    pub fn new(project: impl Into<ResourceId>, root: impl Into<ResourceId>) -> Self {
        Self {
            project: project.into(),
            root: root.into(),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// The root comes from [`CONTAINER_ID_KEY`] when a runner set it, otherwise from
    /// `dev_root`, the root chosen for interactive use.
    ///
    /// # Errors
    /// [`ResourceError::Configuration`] if the project id is missing, or if neither the
    /// environment nor `dev_root` supply a root.
    pub fn from_env(dev_root: Option<ResourceId>) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), dev_root)
    }

    pub(crate) fn from_lookup<F>(lookup: F, dev_root: Option<ResourceId>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project = lookup(PROJECT_ID_KEY).ok_or_else(|| {
            ResourceError::Configuration(format!("{PROJECT_ID_KEY} is not set"))
        })?;
        let root = lookup(CONTAINER_ID_KEY).or(dev_root).ok_or_else(|| {
            ResourceError::Configuration(format!(
                "{CONTAINER_ID_KEY} is not set and no development root was given"
            ))
        })?;
        Ok(Self { project, root })
    }
}

/// Decides whether cached values must be bypassed.
///
/// The signal is read every time a cache decision is made, never once per session.
#[derive(Debug, Clone, Default)]
pub enum LiveMode {
    /// Live exactly when [`CONTAINER_ID_KEY`] is absent from the environment.
    #[default]
    Environment,
    /// A switch owned by the embedding application.
    Shared(Arc<AtomicBool>),
}

impl LiveMode {
    pub fn is_live(&self) -> bool {
        match self {
            LiveMode::Environment => std::env::var_os(CONTAINER_ID_KEY).is_none(),
            LiveMode::Shared(flag) => flag.load(Ordering::SeqCst),
        }
    }
}
