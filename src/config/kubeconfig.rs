//! Kubeconfig file support

use std::fmt;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use super::{read_file, AuthInfo, RestConfig, TlsConfig};
use crate::error::ConfigError;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Kubeconfig {
    #[serde(default)]
    pub clusters: Vec<NamedCluster>,
    #[serde(default)]
    pub users: Vec<NamedUser>,
    #[serde(default)]
    pub contexts: Vec<NamedContext>,
    #[serde(default)]
    pub current_context: String,
    /// Directory relative file references are resolved against
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: Cluster,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Cluster {
    pub server: String,
    #[serde(default)]
    pub certificate_authority: Option<PathBuf>,
    #[serde(default)]
    pub certificate_authority_data: Option<String>,
    #[serde(default)]
    pub insecure_skip_tls_verify: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NamedUser {
    pub name: String,
    #[serde(default)]
    pub user: User,
}

#[derive(Deserialize, Default, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct User {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "tokenFile", alias = "token-file")]
    pub token_file: Option<PathBuf>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub client_certificate: Option<PathBuf>,
    #[serde(default)]
    pub client_certificate_data: Option<String>,
    #[serde(default)]
    pub client_key: Option<PathBuf>,
    #[serde(default)]
    pub client_key_data: Option<String>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("token_file", &self.token_file)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("client_certificate", &self.client_certificate)
            .field("client_key", &self.client_key)
            .finish()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct NamedContext {
    pub name: String,
    pub context: Context,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Context {
    pub cluster: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl Kubeconfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = read_file(path)?;
        let mut config = Self::parse(&String::from_utf8_lossy(&content))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Named context, or the current context when `name` is `None`
    pub fn context(&self, name: Option<&str>) -> Result<&Context, ConfigError> {
        let name = name.unwrap_or(&self.current_context);
        if name.is_empty() {
            return Err(ConfigError::Kubeconfig("no current context set".into()));
        }
        self.contexts
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.context)
            .ok_or_else(|| ConfigError::Kubeconfig(format!("context {:?} not found", name)))
    }

    pub fn namespace(&self, context: Option<&str>) -> Option<String> {
        self.context(context).ok().and_then(|c| c.namespace.clone())
    }

    /// Build a connection config for the selected context
    pub fn rest_config(&self, context: Option<&str>) -> Result<RestConfig, ConfigError> {
        let ctx = self.context(context)?;

        let cluster = self
            .clusters
            .iter()
            .find(|c| c.name == ctx.cluster)
            .map(|c| &c.cluster)
            .ok_or_else(|| ConfigError::Kubeconfig(format!("cluster {:?} not found", ctx.cluster)))?;

        let user = if ctx.user.is_empty() {
            User::default()
        } else {
            self.users
                .iter()
                .find(|u| u.name == ctx.user)
                .map(|u| u.user.clone())
                .ok_or_else(|| ConfigError::Kubeconfig(format!("user {:?} not found", ctx.user)))?
        };

        let tls = TlsConfig {
            insecure: cluster.insecure_skip_tls_verify,
            ca_data: self.data_or_file(
                "certificate-authority-data",
                cluster.certificate_authority_data.as_deref(),
                cluster.certificate_authority.as_deref(),
            )?,
            cert_data: self.data_or_file(
                "client-certificate-data",
                user.client_certificate_data.as_deref(),
                user.client_certificate.as_deref(),
            )?,
            key_data: self.data_or_file(
                "client-key-data",
                user.client_key_data.as_deref(),
                user.client_key.as_deref(),
            )?,
        };

        Ok(RestConfig {
            host: cluster.server.clone(),
            auth: self.auth_info(&user)?,
            tls,
            ..Default::default()
        })
    }

    fn auth_info(&self, user: &User) -> Result<AuthInfo, ConfigError> {
        if let Some(token) = &user.token {
            return Ok(AuthInfo::BearerToken(token.clone()));
        }
        if let Some(path) = &user.token_file {
            let token = read_file(&self.resolve(path))?;
            return Ok(AuthInfo::BearerToken(String::from_utf8_lossy(&token).trim().to_string()));
        }
        if let (Some(username), Some(password)) = (&user.username, &user.password) {
            return Ok(AuthInfo::Basic {
                username: username.clone(),
                password: password.clone(),
            });
        }
        Ok(AuthInfo::None)
    }

    fn data_or_file(
        &self,
        field: &'static str,
        data: Option<&str>,
        file: Option<&Path>,
    ) -> Result<Option<Vec<u8>>, ConfigError> {
        if let Some(data) = data {
            return STANDARD
                .decode(data.trim())
                .map(Some)
                .map_err(|source| ConfigError::Base64 { field, source });
        }
        match file {
            Some(path) => read_file(&self.resolve(path)).map(Some),
            None => Ok(None),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: minikube
clusters:
- name: minikube
  cluster:
    server: https://192.168.99.100:8443
    certificate-authority-data: Q0EgREFUQQ==
- name: staging
  cluster:
    server: https://staging.example.com
    insecure-skip-tls-verify: true
users:
- name: minikube
  user:
    token: abc123
- name: ops
  user:
    username: ops
    password: secret
contexts:
- name: minikube
  context:
    cluster: minikube
    user: minikube
    namespace: demo
- name: staging
  context:
    cluster: staging
    user: ops
"#;

    #[test]
    fn current_context_builds_config() {
        let kubeconfig = Kubeconfig::parse(KUBECONFIG).unwrap();
        let config = kubeconfig.rest_config(None).unwrap();

        assert_eq!(config.host, "https://192.168.99.100:8443");
        assert_eq!(config.auth, AuthInfo::BearerToken("abc123".into()));
        assert_eq!(config.tls.ca_data.as_deref(), Some(&b"CA DATA"[..]));
        assert!(!config.tls.insecure);
        assert_eq!(kubeconfig.namespace(None).as_deref(), Some("demo"));
    }

    #[test]
    fn explicit_context_with_basic_auth() {
        let kubeconfig = Kubeconfig::parse(KUBECONFIG).unwrap();
        let config = kubeconfig.rest_config(Some("staging")).unwrap();

        assert_eq!(config.host, "https://staging.example.com");
        assert!(config.tls.insecure);
        assert!(matches!(config.auth, AuthInfo::Basic { ref username, .. } if username == "ops"));
        assert_eq!(kubeconfig.namespace(Some("staging")), None);
    }

    #[test]
    fn unknown_context_is_an_error() {
        let kubeconfig = Kubeconfig::parse(KUBECONFIG).unwrap();
        let err = kubeconfig.rest_config(Some("prod")).unwrap_err();
        assert!(err.to_string().contains("prod"));
    }

    #[test]
    fn bad_base64_names_the_field() {
        let kubeconfig = Kubeconfig::parse(&KUBECONFIG.replace("Q0EgREFUQQ==", "not$base64")).unwrap();
        let err = kubeconfig.rest_config(None).unwrap_err();
        assert!(matches!(err, ConfigError::Base64 { field: "certificate-authority-data", .. }));
    }

    #[test]
    fn token_file_is_resolved_relative_to_kubeconfig() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("token"), "from-file\n").unwrap();
        let path = dir.path().join("config");
        std::fs::write(
            &path,
            r#"
current-context: local
clusters:
- name: local
  cluster:
    server: http://127.0.0.1:8080
users:
- name: local
  user:
    tokenFile: token
contexts:
- name: local
  context:
    cluster: local
    user: local
"#,
        )
        .unwrap();

        let config = Kubeconfig::read(&path).unwrap().rest_config(None).unwrap();
        assert_eq!(config.auth, AuthInfo::BearerToken("from-file".into()));
    }
}
