//! Group/version registry
//!
//! The client asks a registry two questions before building a transport:
//! whether a group/version is enabled, and which group/version is the
//! canonical one for a group. The registry is passed in by the caller so
//! construction never depends on process-wide state.

use std::collections::BTreeMap;

use crate::schema::GroupVersion;

/// Group name served by this client
pub const GROUP: &str = "kubedb.com";

/// Version served by this client
pub const V1ALPHA1: &str = "v1alpha1";

/// Answers which API group/versions are available to the caller
pub trait GroupVersionRegistry: Send + Sync {
    fn is_enabled_version(&self, gv: &GroupVersion) -> bool;

    /// Canonical (preferred) group/version for `group`
    fn group(&self, group: &str) -> Option<GroupVersion>;
}

/// In-memory registry. The first version registered for a group is its
/// canonical version.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    groups: BTreeMap<String, Vec<String>>,
}

impl StaticRegistry {
    /// Registry with nothing enabled
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with `kubedb.com/v1alpha1` enabled
    pub fn kubedb() -> Self {
        Self::empty().with_version(GroupVersion::new(GROUP, V1ALPHA1))
    }

    pub fn with_version(mut self, gv: GroupVersion) -> Self {
        self.register(gv);
        self
    }

    pub fn register(&mut self, gv: GroupVersion) {
        let versions = self.groups.entry(gv.group).or_default();
        if !versions.contains(&gv.version) {
            versions.push(gv.version);
        }
    }
}

impl GroupVersionRegistry for StaticRegistry {
    fn is_enabled_version(&self, gv: &GroupVersion) -> bool {
        self.groups
            .get(&gv.group)
            .map(|versions| versions.contains(&gv.version))
            .unwrap_or(false)
    }

    fn group(&self, group: &str) -> Option<GroupVersion> {
        self.groups
            .get(group)
            .and_then(|versions| versions.first())
            .map(|version| GroupVersion::new(group, version.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kubedb_registry_enables_v1alpha1() {
        let registry = StaticRegistry::kubedb();
        assert!(registry.is_enabled_version(&GroupVersion::new(GROUP, V1ALPHA1)));
        assert!(!registry.is_enabled_version(&GroupVersion::new(GROUP, "v1")));
        assert_eq!(
            registry.group(GROUP),
            Some(GroupVersion::new(GROUP, V1ALPHA1))
        );
    }

    #[test]
    fn first_registered_version_is_canonical() {
        let registry = StaticRegistry::empty()
            .with_version(GroupVersion::new("example.com", "v2"))
            .with_version(GroupVersion::new("example.com", "v1"))
            .with_version(GroupVersion::new("example.com", "v2"));

        assert_eq!(
            registry.group("example.com"),
            Some(GroupVersion::new("example.com", "v2"))
        );
        assert!(registry.is_enabled_version(&GroupVersion::new("example.com", "v1")));
    }

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = StaticRegistry::empty();
        assert!(registry.group(GROUP).is_none());
        assert!(!registry.is_enabled_version(&GroupVersion::new(GROUP, V1ALPHA1)));
    }
}
