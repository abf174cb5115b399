use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque identifier of a Container or Asset, unique within a project.
pub type ResourceId = String;

/// Free-form metadata: string keys to arbitrary JSON values.
pub type Metadata = serde_json::Map<String, Value>;

/// Descriptive properties shared by Containers and Assets.
///
/// The wire calls the type field `kind`; accessors expose it as [`kind`](Self::kind)
/// as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardProperties {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl StandardProperties {
    /// Creates empty properties.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a tag. Duplicates are kept.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_metadatum(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
