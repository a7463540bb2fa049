//! Types shared by several kinds

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SpecStatus;

/// Label set on snapshots and dormant databases naming the database kind
pub const LABEL_DATABASE_KIND: &str = "kubedb.com/kind";

/// Label set on snapshots and dormant databases naming the database
pub const LABEL_DATABASE_NAME: &str = "kubedb.com/name";

/// Label selector matching objects that belong to one database
pub fn database_selector(kind: &str, name: &str) -> String {
    format!("{}={},{}={}", LABEL_DATABASE_KIND, kind, LABEL_DATABASE_NAME, name)
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct ResourceRequirements {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requests: BTreeMap<String, String>,
}

/// Persistent volume claim template used for database data
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_modes: Vec<String>,
    #[serde(default)]
    pub resources: ResourceRequirements,
}

/// Object storage location for snapshots
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStorageSpec {
    #[serde(default)]
    pub storage_secret_name: String,
    #[serde(default)]
    pub bucket_name: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupScheduleSpec {
    pub cron_expression: String,
    #[serde(flatten)]
    pub storage: SnapshotStorageSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScriptSourceSpec {
    #[serde(default)]
    pub script_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_repo: Option<GitRepoSource>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GitRepoSource {
    pub repository: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub revision: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub directory: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSourceSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    pub name: String,
}

/// How a new database is initialized: from a script or from a snapshot
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InitSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_source: Option<ScriptSourceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_source: Option<SnapshotSourceSpec>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabasePhase {
    Creating,
    Running,
    Failed,
}

/// Status shared by the database kinds
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<DatabasePhase>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

impl SpecStatus for DatabaseStatus {}

impl DatabaseStatus {
    pub fn is_running(&self) -> bool {
        self.phase == Some(DatabasePhase::Running)
    }
}
