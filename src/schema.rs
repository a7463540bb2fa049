//! API group/version identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// A Kubernetes-style API group paired with a version string.
///
/// The core (legacy) group is represented by an empty `group`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct GroupVersion {
    pub group: String,
    pub version: String,
}

impl GroupVersion {
    pub fn new(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }

    /// Parse `group/version`, `version` (core group) or the empty string.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        if value.is_empty() || value == "/" {
            return Ok(Self::default());
        }

        let mut parts = value.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(version), None, None) => Ok(Self::new("", version)),
            (Some(group), Some(version), None) => Ok(Self::new(group, version)),
            _ => Err(ConfigError::MalformedGroupVersion(value.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.version.is_empty()
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.version)
        } else {
            write!(f, "{}/{}", self.group, self.version)
        }
    }
}

impl FromStr for GroupVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for GroupVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GroupVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_group_and_version() {
        let gv = GroupVersion::parse("kubedb.com/v1alpha1").unwrap();
        assert_eq!(gv.group, "kubedb.com");
        assert_eq!(gv.version, "v1alpha1");
        assert_eq!(gv.to_string(), "kubedb.com/v1alpha1");
    }

    #[test]
    fn bare_version_is_core_group() {
        let gv: GroupVersion = "v1".parse().unwrap();
        assert_eq!(gv, GroupVersion::new("", "v1"));
        assert_eq!(gv.to_string(), "v1");
    }

    #[test]
    fn empty_and_slash_are_empty() {
        assert!(GroupVersion::parse("").unwrap().is_empty());
        assert!(GroupVersion::parse("/").unwrap().is_empty());
    }

    #[test]
    fn extra_segments_are_rejected() {
        let err = GroupVersion::parse("kubedb.com/v1/extra").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedGroupVersion(ref s) if s == "kubedb.com/v1/extra"));
    }
}
