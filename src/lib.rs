//! # Resource Graph Client
//!
//! > **A client-side object model for a project's resource graph.**
//!
//! A project stores a graph of **Containers**, each owning a set of **Assets**. The graph
//! lives in a remote store. This crate hands out local entities that fetch what they
//! need, on demand, through a single request/response connector, and remember what they
//! fetched when the process is not in live mode.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Lazy entities, one connector
//!
//! - **Entities are plain values first**: a [`Container`] or [`Asset`] can be built and
//!   inspected without any store behind it.
//! - **Navigation is remote**: [`Container::assets`], [`Container::children`],
//!   [`Container::parent`] and [`Asset::parent`] consult the store through the
//!   [`Session`] the entity is bound to.
//! - **Caching follows the live-mode signal**: while live, every navigation call goes to
//!   the store; otherwise assets and parents are answered from what was fetched.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Every fallible operation returns [`ResourceError`], which distinguishes a missing
//! connector ([`Configuration`](ResourceError::Configuration)), a store-side refusal
//! ([`Remote`](ResourceError::Remote)) and a broken exchange
//! ([`Protocol`](ResourceError::Protocol)).
//!
//! ### 2. Ownership Without Cycles
//! A Container stores its Assets as plain entries and hands out [`Asset`] handles that
//! hold the Container, so ownership runs one way only. Entities point at their
//! [`Session`] weakly, so dropping the session disconnects everything built from it.
//!
//! ### 3. Concurrency Model
//! The connector is an ordered single-consumer channel. A session serializes requests so
//! exactly one is in flight; entity caches are guarded independently.
//!
//! ### 4. Observability
//! Navigation calls open `tracing` spans carrying the resource id.
//! See the [`runtime::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Plumbing ([`framework`])
//! - **Role**: The wire protocol ([`Query`](framework::Query), [`Reply`](framework::Reply)),
//!   the [`DataConnector`](framework::DataConnector) seam, an in-process channel connector,
//!   and [`MockConnector`](framework::MockConnector) for tests.
//!
//! ### 2. The Data ([`model`])
//! - **Role**: Properties, wire records, search filters, and the deserializer that turns
//!   records into entities.
//!
//! ### 3. The Entities ([`container`], [`asset`])
//! - **Role**: The navigable object model.
//!
//! ### 4. The Context ([`session`], [`runtime`])
//! - **Role**: Project configuration, live mode, the shared connector, and graph-wide
//!   lookups such as [`Session::root`] and [`Session::find_assets`], and commands such as
//!   [`Session::add_asset`] and [`Session::flag`].
//!
//! ## 🚀 Quick Start
//!
//! ```
//! use resource_graph_client::framework::{GraphQuery, MockConnector, Query};
//! use resource_graph_client::{Container, Session, SessionConfig, StandardProperties};
//! use serde_json::json;
//!
//! let mut connector = MockConnector::new();
//! connector
//!     .expect(Query::Graph(GraphQuery::Children {
//!         project: "p1".into(),
//!         parent: "c1".into(),
//!     }))
//!     .return_ok(json!([{"rid": "c2", "properties": {"name": "Sub"}, "assets": []}]));
//!
//! let session = Session::new(SessionConfig::new("p1", "root"), connector.clone());
//! let home = Container::bound("c1", StandardProperties::new().with_name("Home"), &session);
//!
//! let children = home.children().unwrap();
//! assert_eq!(children[0].name(), Some("Sub"));
//! connector.verify();
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! RUST_LOG=debug cargo test
//! ```

pub mod asset;
pub mod container;
pub mod error;
pub mod framework;
pub mod model;
pub mod runtime;
pub mod session;

pub use asset::Asset;
pub use container::{Container, ParentCache};
pub use error::{ResourceError, Result};
pub use model::{AssetFilter, ContainerFilter, ResourceId, StandardProperties};
pub use runtime::{setup_tracing, LiveMode, SessionConfig};
pub use session::{Session, SessionHandle};
