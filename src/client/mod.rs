//! KubeDB extension client
//!
//! [`ExtensionClient`] wraps a REST transport configured for the
//! `kubedb.com/v1alpha1` API group and hands out one namespaced sub-client
//! per resource kind.
//!
//! # Example
//!
//! ```ignore
//! use kubedb_client::{ExtensionClient, RestConfig, StaticRegistry};
//!
//! async fn example() -> kubedb_client::Result<()> {
//!     let config = RestConfig::new("https://10.0.0.1:6443").with_bearer_token("token");
//!     let client = ExtensionClient::new_for_config(&config, &StaticRegistry::kubedb())?;
//!     let pg = client.postgreses("demo").get("pg").await?;
//!     println!("{:?}", pg.status.phase);
//!     Ok(())
//! }
//! ```

mod resource;
#[cfg(test)]
pub(crate) mod stub;
mod watch;

pub use resource::ResourceClient;
pub use watch::WatchStream;

use std::sync::Arc;

use crate::api::{DormantDatabaseSpec, ElasticsearchSpec, PostgresSpec, SnapshotSpec};
use crate::codec::{DirectCodecFactory, ExtendedCodec};
use crate::config::RestConfig;
use crate::error::{ConfigError, Result};
use crate::registry::{GroupVersionRegistry, GROUP, V1ALPHA1};
use crate::rest::{HttpTransport, RestInterface, TransportFactory};
use crate::schema::GroupVersion;

/// Path prefix for named API groups
pub const DEFAULT_API_PATH: &str = "/apis";

pub type SnapshotInterface<'a> = ResourceClient<'a, SnapshotSpec>;
pub type DormantDatabaseInterface<'a> = ResourceClient<'a, DormantDatabaseSpec>;
pub type ElasticsearchInterface<'a> = ResourceClient<'a, ElasticsearchSpec>;
pub type PostgresInterface<'a> = ResourceClient<'a, PostgresSpec>;

/// User agent sent when the configuration does not set one
pub fn default_user_agent() -> String {
    format!(
        "kubedb-client/{} ({}/{})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Fill in the settings every kubedb transport needs.
///
/// Fails when `kubedb.com/v1alpha1` is not enabled in `registry`. A missing
/// API path or user agent is defaulted. A missing group/version, or one from
/// another group, is replaced with the registry's canonical kubedb version.
/// The serializer is always replaced.
pub fn set_extension_defaults(
    config: &mut RestConfig,
    registry: &dyn GroupVersionRegistry,
) -> Result<(), ConfigError> {
    let gv = GroupVersion::parse(&format!("{}/{}", GROUP, V1ALPHA1))?;
    if !registry.is_enabled_version(&gv) {
        return Err(ConfigError::Disabled(gv));
    }

    if config.api_path.is_empty() {
        config.api_path = DEFAULT_API_PATH.to_string();
    }
    if config.user_agent.is_empty() {
        config.user_agent = default_user_agent();
    }

    let foreign = config
        .group_version
        .as_ref()
        .map(|current| current.group != GROUP)
        .unwrap_or(true);
    if foreign {
        let canonical = registry
            .group(GROUP)
            .ok_or_else(|| ConfigError::UnregisteredGroup(GROUP.to_string()))?;
        tracing::debug!(
            "Setting group version to {} (was {:?})",
            canonical,
            config.group_version
        );
        config.group_version = Some(canonical);
    }

    if config.serializer.is_some() {
        tracing::debug!("Replacing caller supplied serializer with the kubedb codec");
    }
    config.serializer = Some(Arc::new(DirectCodecFactory::new(ExtendedCodec)));

    Ok(())
}

/// Client for the kubedb.com custom resources
#[derive(Debug, Clone)]
pub struct ExtensionClient {
    rest_client: Arc<dyn RestInterface>,
}

impl ExtensionClient {
    /// Wrap an already configured transport
    pub fn new(rest_client: Arc<dyn RestInterface>) -> Self {
        Self { rest_client }
    }

    /// Create a client over HTTP. The caller's config is copied, never modified.
    pub fn new_for_config(config: &RestConfig, registry: &dyn GroupVersionRegistry) -> Result<Self> {
        Self::new_for_config_with(config, registry, &HttpTransport)
    }

    /// Same as [`ExtensionClient::new_for_config`] with a custom transport factory
    pub fn new_for_config_with(
        config: &RestConfig,
        registry: &dyn GroupVersionRegistry,
        transport: &dyn TransportFactory,
    ) -> Result<Self> {
        let mut config = config.clone();
        set_extension_defaults(&mut config, registry)?;

        let rest_client = transport.build(config)?;
        tracing::debug!("Created kubedb client: {:?}", rest_client);

        Ok(Self::new(rest_client))
    }

    /// Create a client or panic.
    ///
    /// Only meant for process start-up, where a bad configuration is fatal.
    /// Never call this while serving requests.
    pub fn new_for_config_or_die(config: &RestConfig, registry: &dyn GroupVersionRegistry) -> Self {
        match Self::new_for_config(config, registry) {
            Ok(client) => client,
            Err(err) => panic!("unable to create kubedb client: {}", err),
        }
    }

    pub fn snapshots(&self, namespace: &str) -> SnapshotInterface<'_> {
        ResourceClient::new(self, namespace)
    }

    pub fn dormant_databases(&self, namespace: &str) -> DormantDatabaseInterface<'_> {
        ResourceClient::new(self, namespace)
    }

    pub fn elasticsearches(&self, namespace: &str) -> ElasticsearchInterface<'_> {
        ResourceClient::new(self, namespace)
    }

    pub fn postgreses(&self, namespace: &str) -> PostgresInterface<'_> {
        ResourceClient::new(self, namespace)
    }

    /// Underlying transport, for calls the typed accessors do not cover
    pub fn rest_client(&self) -> Arc<dyn RestInterface> {
        self.rest_client.clone()
    }

    /// Transport of an optional client; `None` when there is no client
    pub fn rest_client_of(client: Option<&Self>) -> Option<Arc<dyn RestInterface>> {
        client.map(Self::rest_client)
    }
}
