//! reqwest backed transport

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use url::Url;

use super::{ByteStream, Request, RestInterface};
use crate::api::Status;
use crate::codec::{decode_status, DirectCodecFactory, NegotiatedSerializer};
use crate::config::{AuthInfo, RestConfig};
use crate::error::{Error, Result, TransportError};

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Truncates long bodies and strips control characters before logging
fn sanitize_for_log(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let truncated = if text.chars().count() > MAX_LOG_BODY_LENGTH {
        let head: String = text.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        text.into_owned()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP transport for one API server
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: Url,
    config: RestConfig,
    serializer: Arc<dyn NegotiatedSerializer>,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .finish()
    }
}

impl RestClient {
    /// Validate the host and TLS material and build the HTTP client
    pub fn new(config: RestConfig) -> Result<Self, TransportError> {
        if config.host.is_empty() {
            return Err(TransportError::MissingHost);
        }

        let base_url = Url::parse(&config.host).map_err(|source| TransportError::InvalidHost {
            host: config.host.clone(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(TransportError::UnsupportedScheme(base_url.scheme().to_string()));
        }

        let mut builder = Client::builder();

        if !config.user_agent.is_empty() {
            let user_agent = HeaderValue::from_str(&config.user_agent)
                .map_err(|_| TransportError::InvalidHeader("User-Agent"))?;
            builder = builder.user_agent(user_agent);
        }

        if config.tls.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca) = &config.tls.ca_data {
            let cert = reqwest::Certificate::from_pem(ca).map_err(TransportError::InvalidCertificate)?;
            builder = builder.add_root_certificate(cert);
        }

        match (&config.tls.cert_data, &config.tls.key_data) {
            (Some(cert), Some(key)) => {
                let mut pem = cert.clone();
                pem.push(b'\n');
                pem.extend_from_slice(key);
                let identity = reqwest::Identity::from_pem(&pem).map_err(TransportError::InvalidIdentity)?;
                builder = builder.identity(identity);
            }
            (None, None) => {}
            _ => return Err(TransportError::IncompleteIdentity),
        }

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(TransportError::Build)?;

        let serializer = config
            .serializer
            .clone()
            .unwrap_or_else(|| Arc::new(DirectCodecFactory::default()));

        Ok(Self {
            client,
            base_url,
            config,
            serializer,
        })
    }

    /// Full URL for a request, keeping any path prefix of the host
    pub fn url(&self, request: &Request) -> Url {
        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/');
        let path = request.path(&self.config.api_path, self.config.group_version.as_ref());
        url.set_path(&format!("{}{}", prefix, path));

        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.params);
        }
        url
    }

    fn prepare(&self, request: Request) -> RequestBuilder {
        let url = self.url(&request);
        tracing::debug!("{} {}", request.verb, url);

        let mut builder = self
            .client
            .request(request.verb, url)
            .header(ACCEPT, self.serializer.content_type());

        builder = match &self.config.auth {
            AuthInfo::None => builder,
            AuthInfo::BearerToken(token) => builder.bearer_auth(token),
            AuthInfo::Basic { username, password } => builder.basic_auth(username, Some(password)),
        };

        if let Some(body) = request.body {
            let content_type = request.content_type.unwrap_or(self.serializer.content_type());
            builder = builder.header(CONTENT_TYPE, content_type).body(body);
        }

        builder
    }

    fn api_error(&self, status: StatusCode, body: &[u8]) -> Error {
        // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
        tracing::error!("API error: {} - {}", status, sanitize_for_log(body));

        let status = decode_status(self.serializer.as_ref(), status.as_u16(), body).unwrap_or_else(|| Status {
            status: "Failure".to_string(),
            message: sanitize_for_log(body),
            reason: status.canonical_reason().unwrap_or_default().replace(' ', ""),
            code: status.as_u16(),
            details: None,
        });
        Error::Api(status)
    }
}

#[async_trait]
impl RestInterface for RestClient {
    fn config(&self) -> &RestConfig {
        &self.config
    }

    fn serializer(&self) -> Arc<dyn NegotiatedSerializer> {
        self.serializer.clone()
    }

    async fn execute(&self, request: Request) -> Result<Vec<u8>> {
        let response = self.prepare(request).send().await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(self.api_error(status, &body));
        }

        Ok(body.to_vec())
    }

    async fn stream(&self, request: Request) -> Result<ByteStream> {
        let response = self.prepare(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(self.api_error(status, &body));
        }

        Ok(response
            .bytes_stream()
            .map_ok(|chunk| chunk.to_vec())
            .map_err(Error::from)
            .boxed())
    }
}
