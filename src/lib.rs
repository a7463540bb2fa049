//! Typed REST client for the kubedb.com custom resources
//!
//! This crate provides a client for the `kubedb.com/v1alpha1` API group:
//! Snapshots, DormantDatabases, Elasticsearches and Postgreses.
//!
//! # Module Structure
//!
//! - [`client`] - [`ExtensionClient`] and the namespaced per-kind sub-clients
//! - [`config`] - connection configuration, kubeconfig and in-cluster loading
//! - [`rest`] - the REST transport and request builder
//! - [`registry`] - group/version registry consulted before building a client
//! - [`codec`] - request/response body serializers
//! - [`api`] - resource object model
//! - [`schema`] - group/version identifiers

pub mod api;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod registry;
pub mod rest;
pub mod schema;

pub use client::{
    default_user_agent, set_extension_defaults, DormantDatabaseInterface, ElasticsearchInterface,
    ExtensionClient, PostgresInterface, ResourceClient, SnapshotInterface, WatchStream, DEFAULT_API_PATH,
};
pub use config::{AuthInfo, RestConfig, TlsConfig};
pub use error::{ConfigError, Error, Result, TransportError};
pub use registry::{GroupVersionRegistry, StaticRegistry};
pub use rest::{HttpTransport, RestClient, RestInterface, TransportFactory};
pub use schema::GroupVersion;
