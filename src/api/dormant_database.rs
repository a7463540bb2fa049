//!
//! # Dormant Database
//!
//! Left behind when a database is deleted without `doNotPause`. It keeps the
//! original object so the database can be resumed or wiped out later.
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Crd, ElasticsearchSpec, Object, ObjectList, ObjectMeta, PostgresSpec, Spec, SpecStatus};
use super::DORMANT_DATABASE_API;

pub type DormantDatabase = Object<DormantDatabaseSpec>;
pub type DormantDatabaseList = ObjectList<DormantDatabaseSpec>;

impl Spec for DormantDatabaseSpec {
    type Status = DormantDatabaseStatus;

    fn metadata() -> &'static Crd {
        &DORMANT_DATABASE_API
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DormantDatabaseSpec {
    /// Delete all data of the paused database
    #[serde(default)]
    pub wipe_out: bool,
    /// Recreate the original database
    #[serde(default)]
    pub resume: bool,
    #[serde(default)]
    pub origin: Origin,
}

/// The database object that was paused
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: OriginSpec,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OriginSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elasticsearch: Option<ElasticsearchSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres: Option<PostgresSpec>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DormantDatabasePhase {
    Pausing,
    Paused,
    WipingOut,
    WipedOut,
    Resuming,
    Failed,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DormantDatabaseStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pausing_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wipe_out_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<DormantDatabasePhase>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

impl SpecStatus for DormantDatabaseStatus {}

impl DormantDatabaseSpec {
    /// Kind of the paused database, if the origin names one
    pub fn origin_kind(&self) -> Option<&'static str> {
        if self.origin.spec.postgres.is_some() {
            Some(PostgresSpec::metadata().names.kind)
        } else if self.origin.spec.elasticsearch.is_some() {
            Some(ElasticsearchSpec::metadata().names.kind)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn origin_kind_follows_origin_spec() {
        let mut spec = DormantDatabaseSpec::default();
        assert_eq!(spec.origin_kind(), None);

        spec.origin.spec.elasticsearch = Some(ElasticsearchSpec::default());
        assert_eq!(spec.origin_kind(), Some("Elasticsearch"));

        spec.origin.spec.elasticsearch = None;
        spec.origin.spec.postgres = Some(PostgresSpec::default());
        assert_eq!(spec.origin_kind(), Some("Postgres"));
    }

    #[test]
    fn decodes_paused_postgres() {
        let drmn: DormantDatabase = serde_json::from_value(json!({
            "apiVersion": "kubedb.com/v1alpha1",
            "kind": "DormantDatabase",
            "metadata": {"name": "pg", "namespace": "demo", "labels": {"kubedb.com/kind": "Postgres"}},
            "spec": {
                "origin": {
                    "metadata": {"name": "pg", "namespace": "demo"},
                    "spec": {"postgres": {"version": "9.5"}}
                }
            },
            "status": {"phase": "Paused", "pausingTime": "2017-06-01T08:00:00Z"}
        }))
        .unwrap();

        assert_eq!(drmn.status.phase, Some(DormantDatabasePhase::Paused));
        assert_eq!(drmn.spec.origin.spec.postgres.unwrap().version, "9.5");
        assert!(!drmn.spec.wipe_out);
    }
}
