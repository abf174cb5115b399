use async_trait::async_trait;
use resource_graph_client::framework::{
    channel, AnalysisQuery, AssetQuery, ContainerQuery, GraphQuery, Query, Reply,
    RequestHandler,
};
use resource_graph_client::model::{AssetRecord, ContainerRecord};
use resource_graph_client::{
    setup_tracing, ContainerFilter, LiveMode, ResourceError, Session, SessionConfig,
    StandardProperties,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

/// A small graph store served over the in-process connector.
///
/// ```text
/// root
/// ├── c1 (a1: data/x.csv)
/// │   └── c3
/// └── c2
/// ```
struct InMemoryStore {
    containers: BTreeMap<String, ContainerRecord>,
    parents: BTreeMap<String, String>,
    flags: Arc<Mutex<Vec<(String, String)>>>,
}

impl InMemoryStore {
    fn new(flags: Arc<Mutex<Vec<(String, String)>>>) -> Self {
        let mut store = Self {
            containers: BTreeMap::new(),
            parents: BTreeMap::new(),
            flags,
        };
        store.insert("root", None, vec![]);
        store.insert(
            "c1",
            Some("root"),
            vec![AssetRecord {
                rid: "a1".into(),
                path: "data/x.csv".into(),
                properties: StandardProperties::new().with_name("X"),
            }],
        );
        store.insert("c2", Some("root"), vec![]);
        store.insert("c3", Some("c1"), vec![]);
        store
    }

    fn insert(&mut self, rid: &str, parent: Option<&str>, assets: Vec<AssetRecord>) {
        let record = ContainerRecord {
            rid: rid.into(),
            properties: StandardProperties::new().with_name(rid.to_uppercase()),
            assets,
        };
        self.containers.insert(rid.into(), record);
        if let Some(parent) = parent {
            self.parents.insert(rid.into(), parent.into());
        }
    }

    fn record(&self, rid: &str) -> Value {
        self.containers
            .get(rid)
            .map(|record| serde_json::to_value(record).unwrap())
            .unwrap_or(Value::Null)
    }

    fn owner_of(&self, asset: &str) -> Option<&String> {
        self.containers
            .values()
            .find(|record| record.assets.iter().any(|a| a.rid == asset))
            .map(|record| &record.rid)
    }
}

#[async_trait]
impl RequestHandler for InMemoryStore {
    async fn handle(&mut self, query: Query) -> Reply {
        match query {
            Query::Container(ContainerQuery::GetByIdForAnalysis { container, .. }) => {
                Reply::Ok(self.record(&container))
            }
            Query::Graph(GraphQuery::Children { parent, .. }) => {
                let children: Vec<Value> = self
                    .parents
                    .iter()
                    .filter(|(_, p)| **p == parent)
                    .map(|(child, _)| self.record(child))
                    .collect();
                Reply::Ok(Value::Array(children))
            }
            Query::Graph(GraphQuery::Parent {
                root, container, ..
            }) => {
                if container == root {
                    return Reply::Ok(Value::Null);
                }
                match self.parents.get(&container) {
                    Some(parent) => Reply::Ok(self.record(parent)),
                    None => Reply::Err(json!("ResourceDoesNotExist")),
                }
            }
            Query::Asset(AssetQuery::Parent { asset, .. }) => match self.owner_of(&asset) {
                Some(owner) => Reply::Ok(self.record(owner)),
                None => Reply::Err(json!("ResourceDoesNotExist")),
            },
            Query::Asset(AssetQuery::Add { root, asset, .. }) => {
                match self.containers.get_mut(&root) {
                    Some(container) => {
                        container.assets.push(asset);
                        Reply::Ok(Value::Null)
                    }
                    None => Reply::Err(json!("RootDoesNotExist")),
                }
            }
            Query::Analysis(AnalysisQuery::Flag { resource, message }) => {
                self.flags.lock().unwrap().push((resource, message));
                Reply::Ok(Value::Null)
            }
            Query::Container(ContainerQuery::Search { .. })
            | Query::Asset(AssetQuery::Search { .. }) => {
                Reply::Err(json!({"code": 501, "message": "search unavailable"}))
            }
        }
    }
}

#[test]
fn test_walk_graph_over_channel() {
    setup_tracing();

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let flags = Arc::new(Mutex::new(Vec::new()));
    let (connector, endpoint) = channel(8);
    let served = runtime.spawn(endpoint.run(InMemoryStore::new(flags.clone())));

    let session = Session::with_live_mode(
        SessionConfig::new("p1", "root"),
        LiveMode::Shared(Arc::new(AtomicBool::new(true))),
        connector,
    );

    let root = session.root().unwrap();
    assert_eq!(root.name(), Some("ROOT"));
    assert_eq!(root.parent().unwrap(), None);

    let children = root.children().unwrap();
    let rids: Vec<&str> = children.iter().map(|c| c.rid().as_str()).collect();
    assert_eq!(rids, vec!["c1", "c2"]);

    let c1 = &children[0];
    let assets = c1.assets().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].file(), "data/x.csv");
    assert!(assets[0].parent().unwrap().ptr_eq(c1));

    let grandchildren = c1.children().unwrap();
    let c3 = &grandchildren[0];
    assert_eq!(c3.rid(), "c3");
    assert_eq!(c3.parent().unwrap().map(|p| p.rid().clone()), Some("c1".to_string()));

    let added = session
        .add_asset("notes.txt", StandardProperties::new().with_name("Notes"))
        .unwrap();
    let root_assets = root.assets().unwrap();
    assert_eq!(root_assets.len(), 1);
    assert_eq!(root_assets[0].rid(), added.rid());
    assert!(root_assets[0].parent().unwrap().ptr_eq(&root));

    session.flag(added.rid().clone(), "check this").unwrap();
    assert_eq!(
        *flags.lock().unwrap(),
        vec![(added.rid().clone(), "check this".to_string())]
    );

    let missing = session.container("nope").unwrap_err();
    assert!(matches!(missing, ResourceError::Protocol(_)));

    let search = session.find_containers(ContainerFilter::new().name("C2"));
    match search {
        Err(ResourceError::Remote(message)) => assert!(message.contains("search unavailable")),
        other => panic!("unexpected search result: {other:?}"),
    }

    drop(session);
    runtime.block_on(served).unwrap();
}

#[test]
fn test_closed_endpoint_is_a_protocol_error() {
    let (connector, endpoint) = channel(1);
    drop(endpoint);

    let session = Session::with_live_mode(
        SessionConfig::new("p1", "root"),
        LiveMode::Shared(Arc::new(AtomicBool::new(true))),
        connector,
    );
    assert!(matches!(session.root(), Err(ResourceError::Protocol(_))));
}
