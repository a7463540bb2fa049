use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{BackupScheduleSpec, Crd, DatabaseStatus, InitSpec, Object, ObjectList, Spec, StorageSpec};
use super::POSTGRES_API;

pub type Postgres = Object<PostgresSpec>;
pub type PostgresList = ObjectList<PostgresSpec>;

impl Spec for PostgresSpec {
    type Status = DatabaseStatus;

    fn metadata() -> &'static Crd {
        &POSTGRES_API
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretVolumeSource {
    pub secret_name: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostgresSpec {
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageSpec>,
    /// Secret holding the superuser password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_secret: Option<SecretVolumeSource>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_selector: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<InitSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_schedule: Option<BackupScheduleSpec>,
    #[serde(default)]
    pub do_not_pause: bool,
}
