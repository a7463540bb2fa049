//!
//! # Snapshot
//!
//! Point in time backup of a database, written to object storage
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Crd, Object, ObjectList, ResourceRequirements, SnapshotStorageSpec, Spec, SpecStatus};
use super::SNAPSHOT_API;

pub type Snapshot = Object<SnapshotSpec>;
pub type SnapshotList = ObjectList<SnapshotSpec>;

impl Spec for SnapshotSpec {
    type Status = SnapshotStatus;

    fn metadata() -> &'static Crd {
        &SNAPSHOT_API
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSpec {
    /// Name of the database this snapshot was taken from
    #[serde(default)]
    pub database_name: String,
    #[serde(flatten)]
    pub storage: SnapshotStorageSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<SnapshotPhase>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

impl SpecStatus for SnapshotStatus {}

impl SnapshotStatus {
    /// True once the snapshot reached a terminal phase
    pub fn is_finished(&self) -> bool {
        matches!(
            self.phase,
            Some(SnapshotPhase::Succeeded) | Some(SnapshotPhase::Failed)
        )
    }
}
