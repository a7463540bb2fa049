//! In-memory transport used by unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;

use crate::config::RestConfig;
use crate::error::{Result, TransportError};
use crate::rest::{ByteStream, Request, RestInterface, TransportFactory};

/// Records every request and answers with queued bodies
#[derive(Debug, Default)]
pub(crate) struct StubRest {
    config: RestConfig,
    requests: Mutex<Vec<Request>>,
    responses: Mutex<VecDeque<Result<Vec<u8>>>>,
    chunks: Mutex<Vec<Vec<u8>>>,
}

impl StubRest {
    pub(crate) fn with_config(config: RestConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub(crate) fn respond(&self, body: impl Into<Vec<u8>>) {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
    }

    pub(crate) fn fail(&self, err: crate::Error) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub(crate) fn stream_chunks(&self, chunks: Vec<&str>) {
        *self.chunks.lock().unwrap() = chunks.into_iter().map(|c| c.as_bytes().to_vec()).collect();
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestInterface for StubRest {
    fn config(&self) -> &RestConfig {
        &self.config
    }

    async fn execute(&self, request: Request) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn stream(&self, request: Request) -> Result<ByteStream> {
        self.requests.lock().unwrap().push(request);
        let chunks: Vec<Result<Vec<u8>>> = self.chunks.lock().unwrap().drain(..).map(Ok).collect();
        Ok(futures::stream::iter(chunks).boxed())
    }
}

/// Transport factory that counts how often it is asked to build
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    builds: AtomicUsize,
}

impl RecordingTransport {
    pub(crate) fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl TransportFactory for RecordingTransport {
    fn build(&self, config: RestConfig) -> Result<Arc<dyn RestInterface>, TransportError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(StubRest::with_config(config)))
    }
}
