//!
//! # CRD Definition
//!
//! Static description of each custom resource served under `kubedb.com`
//!
use crate::registry::{GROUP, V1ALPHA1};

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Crd {
    pub group: &'static str,
    pub version: &'static str,
    pub names: CrdNames,
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CrdNames {
    pub kind: &'static str,
    pub plural: &'static str,
    pub singular: &'static str,
}

impl Crd {
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }
}

pub const SNAPSHOT_API: Crd = Crd {
    group: GROUP,
    version: V1ALPHA1,
    names: CrdNames {
        kind: "Snapshot",
        plural: "snapshots",
        singular: "snapshot",
    },
};

pub const DORMANT_DATABASE_API: Crd = Crd {
    group: GROUP,
    version: V1ALPHA1,
    names: CrdNames {
        kind: "DormantDatabase",
        plural: "dormantdatabases",
        singular: "dormantdatabase",
    },
};

pub const ELASTICSEARCH_API: Crd = Crd {
    group: GROUP,
    version: V1ALPHA1,
    names: CrdNames {
        kind: "Elasticsearch",
        plural: "elasticsearches",
        singular: "elasticsearch",
    },
};

pub const POSTGRES_API: Crd = Crd {
    group: GROUP,
    version: V1ALPHA1,
    names: CrdNames {
        kind: "Postgres",
        plural: "postgreses",
        singular: "postgres",
    },
};
