use crate::asset::Asset;
use crate::container::Container;
use crate::error::Result;
use crate::framework::core::{AssetQuery, Query};
use crate::model::deserialize::container_from_value;
use crate::session;
use tracing::{debug, instrument};

impl Asset {
    /// The Container this Asset belongs to.
    ///
    /// An owning Container set at construction is returned directly, in any mode, with
    /// no request. Otherwise the store is asked every time; the answer is not cached
    /// on the Asset.
    ///
    /// # Errors
    /// [`ResourceError::Configuration`](crate::error::ResourceError::Configuration) if the
    /// store must be asked and no session is bound.
    #[instrument(skip(self), fields(rid = %self.rid()))]
    pub fn parent(&self) -> Result<Container> {
        if let Some(owner) = self.owner() {
            debug!("Using owning container");
            return Ok(owner.clone());
        }

        let session = session::require(self.session_handle())?;
        let payload = session.request(&Query::Asset(AssetQuery::Parent {
            project: session.project().clone(),
            asset: self.rid().clone(),
        }))?;
        container_from_value(payload, self.session_handle().cloned())
    }
}
