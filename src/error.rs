//! Error types

use std::path::PathBuf;

use thiserror::Error;

use crate::api::Status;
use crate::schema::GroupVersion;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top level error returned by the client
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Configuration could not be completed before building a transport
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The transport collaborator refused the finalized configuration
    #[error(transparent)]
    TransportConstruction(#[from] TransportError),

    /// The API server answered with a non-2xx status
    #[error("API error: {0}")]
    Api(Status),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("object name must be set")]
    MissingName,
}

impl Error {
    /// Status code carried by an API error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(status) => Some(status.code),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status_code() == Some(409)
    }
}

/// Configuration failures: group/version checks and config loading
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid group version: {0:?}")]
    MalformedGroupVersion(String),

    #[error("{0} is not enabled")]
    Disabled(GroupVersion),

    #[error("group {0} is not registered")]
    UnregisteredGroup(String),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse kubeconfig: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid base64 in {field}: {source}")]
    Base64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("kubeconfig: {0}")]
    Kubeconfig(String),

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}

/// Failures building the HTTP transport from a finalized configuration
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransportError {
    #[error("host must be set")]
    MissingHost,

    #[error("invalid host {host:?}: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),

    #[error("invalid certificate authority: {0}")]
    InvalidCertificate(#[source] reqwest::Error),

    #[error("invalid client identity: {0}")]
    InvalidIdentity(#[source] reqwest::Error),

    #[error("client certificate and key must be set together")]
    IncompleteIdentity,

    #[error("invalid value for header {0}")]
    InvalidHeader(&'static str),

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Short, user facing description of an error.
/// Security: Avoids echoing raw server bodies, which may carry object data.
pub fn format_api_error(error: &Error) -> String {
    match error.status_code() {
        Some(401) => return "Authentication failed. Check the credentials in your kubeconfig.".to_string(),
        Some(403) => return "Permission denied. Check your RBAC permissions.".to_string(),
        Some(404) => return "Resource not found.".to_string(),
        Some(409) => return "Resource conflict. The resource may already exist or was modified.".to_string(),
        Some(422) => return "Invalid object. The API server rejected the request.".to_string(),
        Some(429) => return "Rate limit exceeded. Please try again later.".to_string(),
        Some(500..=599) => return "API server temporarily unavailable. Please try again.".to_string(),
        _ => {}
    }

    let message = error.to_string();
    let sanitized = message
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(120)
        .collect::<String>();

    if message.chars().count() > 120 {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
