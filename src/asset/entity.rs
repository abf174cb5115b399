//! The Asset entity.

use crate::container::Container;
use crate::model::{Metadata, ResourceId, StandardProperties};
use crate::session::{Session, SessionHandle};
use std::fmt;
use std::sync::Arc;

/// An Asset's own data, without any reference to its owner.
///
/// Containers keep their assets in this form so that a Container never holds a
/// handle that points back at itself.
#[derive(Clone)]
pub(crate) struct AssetEntry {
    pub(crate) rid: ResourceId,
    pub(crate) file: String,
    pub(crate) properties: StandardProperties,
    pub(crate) session: Option<SessionHandle>,
}

/// A leaf record of the resource graph: a file path plus descriptive properties.
///
/// # Owning Container
/// An Asset may carry the Container that owns it, set once at construction (locally
/// via [`Asset::with_parent`], or when the Asset comes out of a Container's asset
/// list). That reference is authoritative, never refreshed, and keeps the Container
/// alive for as long as the Asset is.
///
/// # Architecture Note
/// Ownership still runs one way only. A Container stores its assets as plain
/// entries and hands out `Asset` handles built on demand, so no reference cycle
/// forms between a Container and its Assets.
#[derive(Clone)]
pub struct Asset {
    entry: AssetEntry,
    owner: Option<Container>,
}

impl Asset {
    /// Creates a purely local Asset with no session and no owner.
    pub fn new(
        rid: impl Into<ResourceId>,
        file: impl Into<String>,
        properties: StandardProperties,
    ) -> Self {
        Self::assemble(AssetEntry::new(rid.into(), file.into(), properties, None), None)
    }

    /// Creates a local Asset owned by `parent`.
    ///
    /// The Asset shares `parent`'s session, if any.
    pub fn with_parent(
        rid: impl Into<ResourceId>,
        file: impl Into<String>,
        properties: StandardProperties,
        parent: &Container,
    ) -> Self {
        let entry = AssetEntry::new(
            rid.into(),
            file.into(),
            properties,
            parent.session_handle().cloned(),
        );
        Self::assemble(entry, Some(parent.clone()))
    }

    /// Creates an Asset with no owner, bound to `session`.
    pub fn bound(
        rid: impl Into<ResourceId>,
        file: impl Into<String>,
        properties: StandardProperties,
        session: &Arc<Session>,
    ) -> Self {
        let entry = AssetEntry::new(rid.into(), file.into(), properties, Some(session.handle()));
        Self::assemble(entry, None)
    }

    pub(crate) fn assemble(entry: AssetEntry, owner: Option<Container>) -> Self {
        Self { entry, owner }
    }

    pub(crate) fn session_handle(&self) -> Option<&SessionHandle> {
        self.entry.session.as_ref()
    }

    /// The owning Container, if one was set at construction.
    pub fn owner(&self) -> Option<&Container> {
        self.owner.as_ref()
    }

    pub fn rid(&self) -> &ResourceId {
        &self.entry.rid
    }

    /// Path of the Asset's file.
    pub fn file(&self) -> &str {
        &self.entry.file
    }

    pub fn name(&self) -> Option<&str> {
        self.entry.properties.name.as_deref()
    }

    /// The Asset's type.
    pub fn kind(&self) -> Option<&str> {
        self.entry.properties.kind.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.entry.properties.description.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.entry.properties.tags
    }

    pub fn metadata(&self) -> &Metadata {
        &self.entry.properties.metadata
    }

    pub fn properties(&self) -> &StandardProperties {
        &self.entry.properties
    }
}

impl AssetEntry {
    pub(crate) fn new(
        rid: ResourceId,
        file: String,
        properties: StandardProperties,
        session: Option<SessionHandle>,
    ) -> Self {
        Self {
            rid,
            file,
            properties,
            session,
        }
    }
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.entry.rid == other.entry.rid
    }
}

impl Eq for Asset {}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owner = self.owner.as_ref().map(Container::rid);
        f.debug_struct("Asset")
            .field("rid", &self.entry.rid)
            .field("file", &self.entry.file)
            .field("properties", &self.entry.properties)
            .field("owner", &owner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_asset_accessors() {
        let props = StandardProperties::new()
            .with_name("f")
            .with_kind("csv")
            .with_tag("x");
        let asset = Asset::new("a1", "/f.txt", props);

        assert_eq!(asset.rid(), "a1");
        assert_eq!(asset.file(), "/f.txt");
        assert_eq!(asset.name(), Some("f"));
        assert_eq!(asset.kind(), Some("csv"));
        assert_eq!(asset.description(), None);
        assert_eq!(asset.tags(), ["x".to_string()]);
        assert!(asset.metadata().is_empty());
        assert!(asset.owner().is_none());
    }

    #[test]
    fn test_owner_outlives_callers_handle() {
        let container = Container::new("c1", StandardProperties::new().with_name("Home"));
        let asset = Asset::with_parent("a1", "f.txt", StandardProperties::new(), &container);
        let expected = container.clone();
        drop(container);

        let owner = asset.owner().unwrap();
        assert!(owner.ptr_eq(&expected));
        assert_eq!(owner.name(), Some("Home"));
    }
}
