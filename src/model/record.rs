//! Wire records exchanged with the graph store.

use crate::model::properties::{ResourceId, StandardProperties};
use serde::{Deserialize, Serialize};

/// Wire representation of a Container, including its assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub rid: ResourceId,
    pub properties: StandardProperties,
    pub assets: Vec<AssetRecord>,
}

/// Wire representation of an Asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub rid: ResourceId,
    pub path: String,
    pub properties: StandardProperties,
}
