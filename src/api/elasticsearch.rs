use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{BackupScheduleSpec, Crd, DatabaseStatus, InitSpec, Object, ObjectList, Spec, StorageSpec};
use super::ELASTICSEARCH_API;

pub type Elasticsearch = Object<ElasticsearchSpec>;
pub type ElasticsearchList = ObjectList<ElasticsearchSpec>;

impl Spec for ElasticsearchSpec {
    type Status = DatabaseStatus;

    fn metadata() -> &'static Crd {
        &ELASTICSEARCH_API
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElasticsearchSpec {
    /// Elasticsearch version, e.g. `2.3.1`
    #[serde(default)]
    pub version: String,
    /// Number of nodes in the cluster
    #[serde(default)]
    pub replicas: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageSpec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_selector: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<InitSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_schedule: Option<BackupScheduleSpec>,
    /// When set, deleting the object does not leave a dormant database behind
    #[serde(default)]
    pub do_not_pause: bool,
}
