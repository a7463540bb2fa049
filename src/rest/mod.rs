//! REST transport
//!
//! [`RestInterface`] is the seam between the typed client and the wire. The
//! default implementation is [`RestClient`], a reqwest client built from a
//! finalized [`RestConfig`]. Transports are created through a
//! [`TransportFactory`] so callers (and tests) can swap the HTTP layer out.

mod client;
mod request;

pub use client::RestClient;
pub use request::{PatchType, Request};

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::codec::{DirectCodecFactory, NegotiatedSerializer};
use crate::config::RestConfig;
use crate::error::{Result, TransportError};

/// Raw response chunks of a streaming request
pub type ByteStream = BoxStream<'static, Result<Vec<u8>>>;

/// Issues requests against an API server
#[async_trait]
pub trait RestInterface: Send + Sync + fmt::Debug {
    /// Configuration the transport was built from
    fn config(&self) -> &RestConfig;

    /// Serializer used for request and response bodies
    fn serializer(&self) -> Arc<dyn NegotiatedSerializer> {
        self.config()
            .serializer
            .clone()
            .unwrap_or_else(|| Arc::new(DirectCodecFactory::default()))
    }

    /// Send a request and return the whole response body
    async fn execute(&self, request: Request) -> Result<Vec<u8>>;

    /// Send a request and return the response body as it arrives
    async fn stream(&self, request: Request) -> Result<ByteStream>;
}

/// Builds a transport from a finalized configuration
pub trait TransportFactory: Send + Sync {
    fn build(&self, config: RestConfig) -> Result<Arc<dyn RestInterface>, TransportError>;
}

/// Factory for the reqwest backed [`RestClient`]
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpTransport;

impl TransportFactory for HttpTransport {
    fn build(&self, config: RestConfig) -> Result<Arc<dyn RestInterface>, TransportError> {
        Ok(Arc::new(RestClient::new(config)?))
    }
}
