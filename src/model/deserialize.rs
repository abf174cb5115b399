//! Translation of wire records into entities.
//!
//! Everything here is pure: no remote access, no shared state touched. A Container
//! record becomes the Container together with the asset entries it owns; every Asset
//! later handed out from that Container carries it as owner. Parent and children
//! stay lazy.

use crate::asset::entity::AssetEntry;
use crate::asset::Asset;
use crate::container::Container;
use crate::error::Result;
use crate::model::record::{AssetRecord, ContainerRecord};
use crate::session::SessionHandle;
use serde_json::Value;

/// Builds a Container, and the Assets it owns, from its record.
pub fn container_from_record(record: ContainerRecord, session: Option<SessionHandle>) -> Container {
    let assets = asset_entries(record.assets, session.as_ref());
    Container::assemble(record.rid, record.properties, session, assets)
}

/// Builds an Asset from its record.
///
/// `parent` is stored as-is as the Asset's owning Container.
pub fn asset_from_record(
    record: AssetRecord,
    session: Option<SessionHandle>,
    parent: Option<&Container>,
) -> Asset {
    Asset::assemble(asset_entry(record, session), parent.cloned())
}

/// Asset entries for a Container's asset list, sharing the Container's session.
pub(crate) fn asset_entries(
    records: Vec<AssetRecord>,
    session: Option<&SessionHandle>,
) -> Vec<AssetEntry> {
    records
        .into_iter()
        .map(|record| asset_entry(record, session.cloned()))
        .collect()
}

fn asset_entry(record: AssetRecord, session: Option<SessionHandle>) -> AssetEntry {
    AssetEntry::new(record.rid, record.path, record.properties, session)
}

/// Decodes a `ContainerRecord` payload.
pub fn container_from_value(payload: Value, session: Option<SessionHandle>) -> Result<Container> {
    let record: ContainerRecord = serde_json::from_value(payload)?;
    Ok(container_from_record(record, session))
}

/// Decodes a sequence of `ContainerRecord`s, keeping their order.
pub fn containers_from_value(
    payload: Value,
    session: Option<SessionHandle>,
) -> Result<Vec<Container>> {
    let records: Vec<ContainerRecord> = serde_json::from_value(payload)?;
    Ok(records
        .into_iter()
        .map(|record| container_from_record(record, session.clone()))
        .collect())
}

/// Decodes a sequence of `AssetRecord`s. The Assets have no owner.
pub fn assets_from_value(payload: Value, session: Option<SessionHandle>) -> Result<Vec<Asset>> {
    let records: Vec<AssetRecord> = serde_json::from_value(payload)?;
    Ok(records
        .into_iter()
        .map(|record| asset_from_record(record, session.clone(), None))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResourceError;
    use serde_json::json;

    fn sample_record() -> Value {
        json!({
            "rid": "c1",
            "properties": {
                "name": "root",
                "kind": null,
                "description": null,
                "tags": [],
                "metadata": {}
            },
            "assets": [{
                "rid": "a1",
                "path": "/f.txt",
                "properties": {
                    "name": "f",
                    "kind": null,
                    "description": null,
                    "tags": ["x"],
                    "metadata": {}
                }
            }]
        })
    }

    #[test]
    fn test_container_record_builds_owned_assets() {
        let container = container_from_value(sample_record(), None).unwrap();
        assert_eq!(container.rid(), "c1");
        assert_eq!(container.name(), Some("root"));

        let assets = container.cached_assets();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].rid(), "a1");
        assert_eq!(assets[0].file(), "/f.txt");
        assert_eq!(assets[0].tags(), ["x".to_string()]);
        assert!(assets[0].owner().unwrap().ptr_eq(&container));
    }

    #[test]
    fn test_assets_keep_their_container_alive() {
        let assets = container_from_value(sample_record(), None)
            .unwrap()
            .cached_assets();

        let owner = assets[0].owner().unwrap();
        assert_eq!(owner.rid(), "c1");
        assert!(owner.ptr_eq(&assets[0].parent().unwrap()));
    }

    #[test]
    fn test_properties_are_preserved() {
        let record = json!({
            "rid": "c9",
            "properties": {
                "name": "Batch",
                "kind": "experiment",
                "description": "second pass",
                "tags": ["b", "a", "b"],
                "metadata": {"temp": 20.5, "ok": true, "nested": {"k": [1, 2]}}
            },
            "assets": [
                {"rid": "a1", "path": "one.csv", "properties": {
                    "name": null, "kind": "csv", "description": "first", "tags": [], "metadata": {"n": 1}}},
                {"rid": "a2", "path": "two.csv", "properties": {
                    "name": "two", "kind": null, "description": null, "tags": ["t"], "metadata": {}}}
            ]
        });
        let expected: ContainerRecord = serde_json::from_value(record.clone()).unwrap();
        let container = container_from_value(record, None).unwrap();

        assert_eq!(container.properties(), &expected.properties);
        assert_eq!(container.kind(), Some("experiment"));
        assert_eq!(container.description(), Some("second pass"));
        assert_eq!(container.tags(), ["b", "a", "b"].map(String::from));
        assert_eq!(container.metadata().get("nested"), Some(&json!({"k": [1, 2]})));

        let assets = container.cached_assets();
        assert_eq!(assets.len(), expected.assets.len());
        for (asset, record) in assets.iter().zip(&expected.assets) {
            assert_eq!(asset.rid(), &record.rid);
            assert_eq!(asset.file(), record.path);
            assert_eq!(asset.properties(), &record.properties);
        }
    }

    #[test]
    fn test_asset_from_record_stores_parent_as_is() {
        let record: AssetRecord = serde_json::from_value(json!({
            "rid": "a7", "path": "p", "properties": {"tags": [], "metadata": {}}
        }))
        .unwrap();
        let parent = Container::new("c1", Default::default());

        let orphan = asset_from_record(record.clone(), None, None);
        assert!(orphan.owner().is_none());

        let owned = asset_from_record(record, None, Some(&parent));
        assert!(owned.owner().unwrap().ptr_eq(&parent));
    }

    #[test]
    fn test_records_in_sequence_keep_order() {
        let payload = json!([
            {"rid": "c3", "properties": {}, "assets": []},
            {"rid": "c1", "properties": {}, "assets": []},
            {"rid": "c2", "properties": {}, "assets": []}
        ]);
        let containers = containers_from_value(payload, None).unwrap();
        let rids: Vec<_> = containers.iter().map(|c| c.rid().as_str()).collect();
        assert_eq!(rids, ["c3", "c1", "c2"]);
    }

    #[test]
    fn test_malformed_record_is_protocol_error() {
        let result = container_from_value(json!({"rid": "c1"}), None);
        assert!(matches!(result, Err(ResourceError::Protocol(_))));

        let result = container_from_value(Value::Null, None);
        assert!(matches!(result, Err(ResourceError::Protocol(_))));
    }
}
