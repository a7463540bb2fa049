//! Property-based tests using proptest
//!
//! These tests verify configuration defaulting, group/version parsing
//! and request path building using randomized inputs.

use proptest::prelude::*;
use reqwest::Method;

use kubedb_client::rest::Request;
use kubedb_client::{set_extension_defaults, GroupVersion, RestConfig, StaticRegistry};

/// Generate a DNS-like group name
fn arb_group() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,10}(\\.[a-z]{2,6}){0,2}"
}

/// Generate a Kubernetes style version string
fn arb_version() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("v1".to_string()),
        "v[1-9](alpha|beta)[1-9]",
        "v[1-9][0-9]?",
    ]
}

/// Generate an optional caller supplied value (empty means unset)
fn arb_optional_text() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z/][a-z0-9/.-]{1,20}"]
}

proptest! {
    /// Defaulting always leaves a complete kubedb configuration
    #[test]
    fn defaults_complete_config(
        api_path in arb_optional_text(),
        user_agent in arb_optional_text(),
    ) {
        let mut config = RestConfig {
            api_path: api_path.clone(),
            user_agent: user_agent.clone(),
            ..RestConfig::new("https://10.0.0.1")
        };

        prop_assert!(set_extension_defaults(&mut config, &StaticRegistry::kubedb()).is_ok());

        prop_assert!(!config.api_path.is_empty());
        prop_assert!(!config.user_agent.is_empty());
        prop_assert!(config.serializer.is_some());
        prop_assert_eq!(config.group_version.as_ref().map(|gv| gv.group.as_str()), Some("kubedb.com"));

        // Caller values survive
        if !api_path.is_empty() {
            prop_assert_eq!(&config.api_path, &api_path);
        }
        if !user_agent.is_empty() {
            prop_assert_eq!(&config.user_agent, &user_agent);
        }
    }

    /// A group/version from another group is replaced with the kubedb one
    #[test]
    fn foreign_group_is_overwritten(group in arb_group(), version in arb_version()) {
        prop_assume!(group != "kubedb.com");

        let mut config = RestConfig {
            group_version: Some(GroupVersion::new(group, version)),
            ..RestConfig::new("https://10.0.0.1")
        };
        set_extension_defaults(&mut config, &StaticRegistry::kubedb()).unwrap();

        prop_assert_eq!(config.group_version, Some(GroupVersion::new("kubedb.com", "v1alpha1")));
    }

    /// Defaulting fails, leaving the config untouched, unless kubedb is enabled
    #[test]
    fn disabled_registry_rejects(group in arb_group(), version in arb_version()) {
        prop_assume!(group != "kubedb.com" || version != "v1alpha1");

        let registry = StaticRegistry::empty().with_version(GroupVersion::new(group, version));
        let mut config = RestConfig::new("https://10.0.0.1");

        prop_assert!(set_extension_defaults(&mut config, &registry).is_err());
        prop_assert!(config.api_path.is_empty());
        prop_assert!(config.group_version.is_none());
    }

    /// Parsing a formatted group/version gives it back
    #[test]
    fn group_version_display_parses_back(group in arb_group(), version in arb_version()) {
        let gv = GroupVersion::new(group, version);
        let parsed = GroupVersion::parse(&gv.to_string()).unwrap();
        prop_assert_eq!(parsed, gv);
    }

    /// Request paths only contain a namespace segment for namespaced requests
    #[test]
    fn path_namespace_segment(namespace in "([a-z][a-z0-9-]{0,20})?", name in "[a-z][a-z0-9.-]{0,30}") {
        let gv = GroupVersion::new("kubedb.com", "v1alpha1");
        let request = Request::new(Method::GET)
            .namespace(&namespace)
            .resource("postgreses")
            .name(&name);
        let path = request.path("/apis", Some(&gv));

        prop_assert!(path.starts_with("/apis/kubedb.com/v1alpha1/"));
        let expected_suffix = format!("/postgreses/{}", name);
        prop_assert!(path.ends_with(&expected_suffix));
        prop_assert_eq!(path.contains("/namespaces/"), !namespace.is_empty());
    }
}
