//! Lazy relationship accessors for [`Container`].
//!
//! Each accessor either answers from a cache slot or performs exactly one round trip
//! through the bound session. Whether a cached value may be trusted is decided by the
//! session's live mode, read fresh on every call.

use crate::asset::Asset;
use crate::container::entity::Container;
use crate::error::Result;
use crate::framework::core::{ContainerQuery, GraphQuery, Query};
use crate::model::deserialize::{asset_entries, container_from_value, containers_from_value};
use crate::model::ContainerRecord;
use crate::session;
use tracing::{debug, instrument};

impl Container {
    /// The Container's Assets.
    ///
    /// Without a bound session, or outside live mode, this is the cached list. In live
    /// mode the Container is fetched again and the cached list is replaced wholesale
    /// with the fresh Assets. No other field of this Container changes.
    ///
    /// # Errors
    /// On any error the cached list is left untouched.
    #[instrument(skip(self), fields(rid = %self.rid()))]
    pub fn assets(&self) -> Result<Vec<Asset>> {
        let Some(session) = session::bound(self.session_handle()) else {
            debug!("No session bound, using cached assets");
            return Ok(self.cached_assets());
        };
        if !session.is_live() {
            debug!("Not live, using cached assets");
            return Ok(self.cached_assets());
        }

        let payload = session.request(&Query::Container(ContainerQuery::GetByIdForAnalysis {
            project: session.project().clone(),
            container: self.rid().clone(),
        }))?;
        let record: ContainerRecord = serde_json::from_value(payload)?;

        let entries = asset_entries(record.assets, self.session_handle());
        let assets = self.adopt(entries.clone());
        self.replace_assets(entries);
        debug!(count = assets.len(), "Assets refreshed");
        Ok(assets)
    }

    /// The Container's children, in the order the store returns them.
    ///
    /// Never cached: every call asks the store, in any mode.
    #[instrument(skip(self), fields(rid = %self.rid()))]
    pub fn children(&self) -> Result<Vec<Container>> {
        let session = session::require(self.session_handle())?;
        let payload = session.request(&Query::Graph(GraphQuery::Children {
            project: session.project().clone(),
            parent: self.rid().clone(),
        }))?;

        let children = containers_from_value(payload, self.session_handle().cloned())?;
        debug!(count = children.len(), "Children fetched");
        Ok(children)
    }

    /// The Container's parent, or `None` if this Container is the root of the graph.
    ///
    /// The graph root is recognized locally, with no request. Outside live mode a
    /// resolved parent cache is trusted. In live mode the store is always asked; the
    /// answer is still written to the cache.
    ///
    /// # Errors
    /// [`ResourceError::Configuration`](crate::error::ResourceError::Configuration) if no
    /// session is bound. On any error the parent cache is left untouched.
    #[instrument(skip(self), fields(rid = %self.rid()))]
    pub fn parent(&self) -> Result<Option<Container>> {
        let session = session::require(self.session_handle())?;

        if self.rid() == session.root_id() {
            debug!("Container is the graph root");
            self.resolve_parent(None);
            return Ok(None);
        }

        if !session.is_live() {
            if let Some(parent) = self.parent_cache().resolved() {
                debug!("Using cached parent");
                return Ok(parent);
            }
        }

        let payload = session.request(&Query::Graph(GraphQuery::Parent {
            project: session.project().clone(),
            root: session.root_id().clone(),
            container: self.rid().clone(),
        }))?;

        let parent = if payload.is_null() {
            None
        } else {
            Some(container_from_value(payload, self.session_handle().cloned())?)
        };
        debug!(found = parent.is_some(), "Parent resolved");
        self.resolve_parent(parent.clone());
        Ok(parent)
    }
}
