//! KubeDB resource object model
//!
//! Every kind is described by a spec type implementing [`Spec`]. The full
//! object as stored by the API server is [`Object<S>`], which carries type
//! metadata, object metadata, the spec and its status.
//!
//! # Kinds
//!
//! - [`SnapshotSpec`] - backups of a running database
//! - [`DormantDatabaseSpec`] - databases that were deleted but kept resumable
//! - [`ElasticsearchSpec`] - Elasticsearch clusters
//! - [`PostgresSpec`] - Postgres servers

mod common;
mod crd;
mod dormant_database;
mod elasticsearch;
mod meta;
mod postgres;
mod snapshot;

pub use common::*;
pub use crd::*;
pub use dormant_database::*;
pub use elasticsearch::*;
pub use meta::*;
pub use postgres::*;
pub use snapshot::*;

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub trait SpecStatus:
    Sized + Debug + Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync
{
}

/// Spec of a custom resource served by this client
pub trait Spec:
    Sized + Debug + Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Status: SpecStatus;

    fn metadata() -> &'static Crd;

    fn api_version() -> String {
        Self::metadata().api_version()
    }

    fn kind() -> String {
        Self::metadata().names.kind.to_owned()
    }

    fn plural() -> &'static str {
        Self::metadata().names.plural
    }
}

/// A stored resource: type meta, object meta, spec and status
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", bound = "S: Spec")]
pub struct Object<S: Spec> {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: S,
    #[serde(default)]
    pub status: S::Status,
}

impl<S: Spec> Object<S> {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, spec: S) -> Self {
        Self {
            api_version: S::api_version(),
            kind: S::kind(),
            metadata: ObjectMeta::named(name, namespace),
            spec,
            status: S::Status::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", bound = "S: Spec")]
pub struct ObjectList<S: Spec> {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<Object<S>>,
}

/// One line of a watch stream
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "object", rename_all = "UPPERCASE", bound = "S: Spec")]
pub enum WatchEvent<S: Spec> {
    Added(Object<S>),
    Modified(Object<S>),
    Deleted(Object<S>),
    Bookmark(Object<S>),
    Error(Status),
}
