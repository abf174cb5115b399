//! The Container entity: identity, properties and cache slots.
//!
//! The lazy accessors that fill the cache slots live in
//! [`navigation`](crate::container::navigation).

use crate::asset::entity::AssetEntry;
use crate::asset::Asset;
use crate::framework::core::lock;
use crate::model::{Metadata, ResourceId, StandardProperties};
use crate::session::{Session, SessionHandle};
use std::fmt;
use std::sync::{Arc, Mutex};

/// What is known about a Container's parent.
///
/// # Architecture Note
/// "Not asked yet" and "asked, this is the root" are different answers. Collapsing
/// them into an `Option` would make a root Container indistinguishable from one
/// whose parent was never fetched, and the cache-bypass logic depends on that
/// distinction.
///
/// The cache only moves forward: once resolved it never returns to `Unknown`.
#[derive(Debug, Clone, Default)]
pub enum ParentCache {
    #[default]
    Unknown,
    /// This Container is the root of the graph.
    ResolvedNone,
    ResolvedSome(Container),
}

impl ParentCache {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, ParentCache::Unknown)
    }

    /// The cached answer, or `None` while still `Unknown`.
    pub fn resolved(&self) -> Option<Option<Container>> {
        match self {
            ParentCache::Unknown => None,
            ParentCache::ResolvedNone => Some(None),
            ParentCache::ResolvedSome(parent) => Some(Some(parent.clone())),
        }
    }
}

struct ContainerInner {
    rid: ResourceId,
    properties: StandardProperties,
    session: Option<SessionHandle>,
    assets: Mutex<Vec<AssetEntry>>,
    parent: Mutex<ParentCache>,
}

/// A grouping node of the resource graph.
///
/// `Container` is a cheap handle: clones share identity and cache slots. Identity
/// and property fields are fixed at construction. The asset list and the parent
/// cache are slots that are only ever replaced wholesale.
///
/// Two Containers compare equal when their `rid`s are equal, since they denote the
/// same remote resource. Use [`Container::ptr_eq`] to ask whether two handles are the
/// same local instance.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Container {
    /// Creates a purely local Container with no session and no assets.
    ///
    /// Local Containers answer [`assets`](Self::assets) from the (empty) cache and fail
    /// [`parent`](Self::parent) and [`children`](Self::children) with a configuration error.
    pub fn new(rid: impl Into<ResourceId>, properties: StandardProperties) -> Self {
        Self::assemble(rid.into(), properties, None, Vec::new())
    }

    /// Creates a Container with no cached assets, bound to `session`.
    pub fn bound(
        rid: impl Into<ResourceId>,
        properties: StandardProperties,
        session: &Arc<Session>,
    ) -> Self {
        Self::assemble(rid.into(), properties, Some(session.handle()), Vec::new())
    }

    pub(crate) fn assemble(
        rid: ResourceId,
        properties: StandardProperties,
        session: Option<SessionHandle>,
        assets: Vec<AssetEntry>,
    ) -> Self {
        let inner = ContainerInner {
            rid,
            properties,
            session,
            assets: Mutex::new(assets),
            parent: Mutex::new(ParentCache::Unknown),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    pub(crate) fn session_handle(&self) -> Option<&SessionHandle> {
        self.inner.session.as_ref()
    }

    pub fn rid(&self) -> &ResourceId {
        &self.inner.rid
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.properties.name.as_deref()
    }

    /// The Container's type.
    pub fn kind(&self) -> Option<&str> {
        self.inner.properties.kind.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.properties.description.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.inner.properties.tags
    }

    pub fn metadata(&self) -> &Metadata {
        &self.inner.properties.metadata
    }

    pub fn properties(&self) -> &StandardProperties {
        &self.inner.properties
    }

    /// Whether a session is bound and still alive.
    pub fn is_bound(&self) -> bool {
        self.session_handle()
            .and_then(SessionHandle::upgrade)
            .is_some()
    }

    /// The asset list as currently cached, without consulting the store.
    ///
    /// Every returned Asset is owned by this Container.
    pub fn cached_assets(&self) -> Vec<Asset> {
        let entries = lock(&self.inner.assets).clone();
        self.adopt(entries)
    }

    /// Wraps `entries` in Asset handles owned by this Container.
    pub(crate) fn adopt(&self, entries: Vec<AssetEntry>) -> Vec<Asset> {
        entries
            .into_iter()
            .map(|entry| Asset::assemble(entry, Some(self.clone())))
            .collect()
    }

    /// A snapshot of the parent cache.
    pub fn parent_cache(&self) -> ParentCache {
        lock(&self.inner.parent).clone()
    }

    /// Whether both handles point at the same local instance.
    pub fn ptr_eq(&self, other: &Container) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn replace_assets(&self, assets: Vec<AssetEntry>) {
        *lock(&self.inner.assets) = assets;
    }

    /// Moves the parent cache to a resolved state. There is no way back to `Unknown`.
    pub(crate) fn resolve_parent(&self, parent: Option<Container>) {
        let resolved = match parent {
            Some(parent) => ParentCache::ResolvedSome(parent),
            None => ParentCache::ResolvedNone,
        };
        *lock(&self.inner.parent) = resolved;
    }
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.inner.rid == other.inner.rid
    }
}

impl Eq for Container {}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let asset_rids: Vec<ResourceId> = lock(&self.inner.assets)
            .iter()
            .map(|entry| entry.rid.clone())
            .collect();
        f.debug_struct("Container")
            .field("rid", &self.inner.rid)
            .field("properties", &self.inner.properties)
            .field("assets", &asset_rids)
            .field("parent", &self.parent_cache())
            .field("bound", &self.is_bound())
            .finish()
    }
}
