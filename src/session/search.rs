//! Graph-wide lookups issued directly on a [`Session`].

use crate::asset::Asset;
use crate::container::Container;
use crate::error::{ResourceError, Result};
use crate::framework::core::{AssetQuery, ContainerQuery, Query};
use crate::model::deserialize::{assets_from_value, container_from_value, containers_from_value};
use crate::model::{AssetFilter, ContainerFilter, ResourceId};
use crate::session::Session;
use std::sync::Arc;
use tracing::{debug, instrument};

impl Session {
    /// Fetches the root Container of the session's graph.
    pub fn root(self: &Arc<Self>) -> Result<Container> {
        self.container(self.root_id().clone())
    }

    /// Fetches a Container, with its assets, by id.
    ///
    /// # Errors
    /// A `null` payload means the store has no such Container and is reported as a
    /// [`ResourceError::Protocol`] error.
    #[instrument(skip_all)]
    pub fn container(self: &Arc<Self>, rid: impl Into<ResourceId>) -> Result<Container> {
        let rid: ResourceId = rid.into();
        let payload = self.request(&Query::Container(ContainerQuery::GetByIdForAnalysis {
            project: self.project().clone(),
            container: rid.clone(),
        }))?;
        if payload.is_null() {
            return Err(ResourceError::Protocol(format!("container {rid} not found")));
        }
        container_from_value(payload, Some(self.handle()))
    }

    /// Finds Containers below the root matching `filter`, in store order.
    #[instrument(skip(self))]
    pub fn find_containers(self: &Arc<Self>, filter: ContainerFilter) -> Result<Vec<Container>> {
        let payload = self.request(&Query::Container(ContainerQuery::Search {
            project: self.project().clone(),
            root: self.root_id().clone(),
            query: filter,
        }))?;
        let containers = containers_from_value(payload, Some(self.handle()))?;
        debug!(found = containers.len(), "Search complete");
        Ok(containers)
    }

    /// The first Container matching `filter`, if any.
    pub fn find_container(self: &Arc<Self>, filter: ContainerFilter) -> Result<Option<Container>> {
        Ok(self.find_containers(filter)?.into_iter().next())
    }

    /// Finds Assets below the root matching `filter`, in store order.
    ///
    /// The Assets carry no owning Container; their [`parent`](Asset::parent) asks the store.
    #[instrument(skip(self))]
    pub fn find_assets(self: &Arc<Self>, filter: AssetFilter) -> Result<Vec<Asset>> {
        let payload = self.request(&Query::Asset(AssetQuery::Search {
            project: self.project().clone(),
            root: self.root_id().clone(),
            query: filter,
        }))?;
        let assets = assets_from_value(payload, Some(self.handle()))?;
        debug!(found = assets.len(), "Search complete");
        Ok(assets)
    }

    /// The first Asset matching `filter`, if any.
    pub fn find_asset(self: &Arc<Self>, filter: AssetFilter) -> Result<Option<Asset>> {
        Ok(self.find_assets(filter)?.into_iter().next())
    }
}
