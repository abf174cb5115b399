//! # Observability & Tracing
//!
//! Every remote-touching accessor opens a span named after itself carrying the
//! resource id, so a request can be traced back to the entity that issued it.
//!
//! ## What Gets Traced
//!
//! - **Cache decisions**: cached answer used, or request sent (`debug`)
//! - **Cache transitions**: assets refreshed, parent resolved (`debug`)
//! - **Endpoint lifecycle**: in-process endpoint start and shutdown (`info`)
//!
//! Failures are returned to the caller, not logged.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Request flow
//! RUST_LOG=resource_graph_client=debug cargo test
//!
//! # Only the in-process endpoint
//! RUST_LOG=resource_graph_client::framework=info cargo test
//! ```
//!
//! With `RUST_LOG=debug`, resolving a parent outside live mode twice shows:
//!
//! ```text
//! DEBUG parent{rid="c2"}:request{query=Graph(Parent { .. })}: Sending request
//! DEBUG parent{rid="c2"}: Parent resolved found=true
//! DEBUG parent{rid="c2"}: Using cached parent
//! ```

/// Initializes the tracing subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; returns `false` if a global subscriber was already
/// installed.
pub fn setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
