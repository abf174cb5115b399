//! Commands that change the graph on the store's side.

use crate::asset::Asset;
use crate::error::{ResourceError, Result};
use crate::framework::core::{AnalysisQuery, AssetQuery, Query};
use crate::model::{AssetRecord, ResourceId, StandardProperties};
use crate::session::Session;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

impl Session {
    /// Creates a new Asset in the root Container.
    ///
    /// The Asset gets a fresh random id. `file` is its path relative to the root
    /// Container. The returned Asset has no owning Container; its
    /// [`parent`](Asset::parent) asks the store.
    ///
    /// # Errors
    /// - [`ResourceError::Configuration`] if `file` is an absolute path. Nothing is sent.
    /// - [`ResourceError::Remote`] if the store refuses the Asset.
    #[instrument(skip(self, file, properties))]
    pub fn add_asset(
        self: &Arc<Self>,
        file: impl Into<String>,
        properties: StandardProperties,
    ) -> Result<Asset> {
        let file = file.into();
        if Path::new(&file).is_absolute() {
            return Err(ResourceError::Configuration(format!(
                "asset file must be relative: {file}"
            )));
        }

        let record = AssetRecord {
            rid: Uuid::new_v4().to_string(),
            path: file,
            properties,
        };
        self.create_asset(record)
    }

    pub(crate) fn create_asset(self: &Arc<Self>, record: AssetRecord) -> Result<Asset> {
        self.request(&Query::Asset(AssetQuery::Add {
            project: self.project().clone(),
            root: self.root_id().clone(),
            asset: record.clone(),
        }))?;
        debug!(rid = %record.rid, "Asset added");

        Ok(Asset::bound(record.rid, record.path, record.properties, self))
    }

    /// Flags a Container or Asset with a message for the user.
    #[instrument(skip(self, resource, message))]
    pub fn flag(&self, resource: impl Into<ResourceId>, message: impl Into<String>) -> Result<()> {
        self.request(&Query::Analysis(AnalysisQuery::Flag {
            resource: resource.into(),
            message: message.into(),
        }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockConnector;
    use crate::runtime::SessionConfig;
    use serde_json::{json, Value};

    fn flag_query(resource: &str, message: &str) -> Query {
        Query::Analysis(AnalysisQuery::Flag {
            resource: resource.into(),
            message: message.into(),
        })
    }

    #[test]
    fn test_flag_sends_resource_and_message() {
        let mut mock = MockConnector::new();
        mock.expect(flag_query("a1", "units look off")).return_ok(Value::Null);
        mock.expect(flag_query("c1", "empty")).return_err("ResourceDoesNotExist");
        let session = Session::new(SessionConfig::new("p1", "root"), mock.clone());

        session.flag("a1", "units look off").unwrap();
        assert_eq!(
            mock.sent()[0],
            json!({"AnalysisCommand": {"Flag": {"resource": "a1", "message": "units look off"}}})
        );
        assert_eq!(
            session.flag("c1", "empty"),
            Err(ResourceError::Remote("ResourceDoesNotExist".to_string()))
        );
        mock.verify();
    }

    #[test]
    fn test_create_asset_sends_record_under_root() {
        let record = AssetRecord {
            rid: "a9".into(),
            path: "data/run.csv".into(),
            properties: StandardProperties::new().with_name("Run").with_tag("raw"),
        };
        let mut mock = MockConnector::new();
        mock.expect(Query::Asset(AssetQuery::Add {
            project: "p1".into(),
            root: "root".into(),
            asset: record.clone(),
        }))
        .return_ok(Value::Null);
        let session = Session::new(SessionConfig::new("p1", "root"), mock.clone());

        let asset = session.create_asset(record).unwrap();
        assert_eq!(asset.rid(), "a9");
        assert_eq!(asset.file(), "data/run.csv");
        assert_eq!(asset.name(), Some("Run"));
        assert!(asset.owner().is_none());
        assert_eq!(
            mock.sent()[0]["Asset"]["Add"]["asset"]["path"],
            json!("data/run.csv")
        );
        mock.verify();
    }

    #[test]
    fn test_create_asset_refused_is_remote() {
        let record = AssetRecord {
            rid: "a9".into(),
            path: "x".into(),
            properties: StandardProperties::new(),
        };
        let mut mock = MockConnector::new();
        mock.expect(Query::Asset(AssetQuery::Add {
            project: "p1".into(),
            root: "root".into(),
            asset: record.clone(),
        }))
        .return_err("PathExists");
        let session = Session::new(SessionConfig::new("p1", "root"), mock.clone());

        assert_eq!(
            session.create_asset(record).unwrap_err(),
            ResourceError::Remote("PathExists".to_string())
        );
    }

    #[test]
    fn test_add_asset_rejects_absolute_path_without_request() {
        let mock = MockConnector::new();
        let session = Session::new(SessionConfig::new("p1", "root"), mock.clone());

        let err = session
            .add_asset("/tmp/out.csv", StandardProperties::new())
            .unwrap_err();
        assert!(matches!(err, ResourceError::Configuration(_)));
        assert_eq!(mock.request_count(), 0);
    }
}
