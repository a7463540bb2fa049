//! Request/response body codecs
//!
//! The client always talks JSON to the API server. [`DirectCodecFactory`]
//! hands bodies straight to [`ExtendedCodec`] without any version
//! conversion, which is what custom resources need.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::Status;
use crate::error::{Error, Result};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Encodes request bodies and decodes response bodies
pub trait NegotiatedSerializer: Send + Sync + fmt::Debug {
    fn content_type(&self) -> &'static str;

    fn encode(&self, value: &Value) -> Result<Vec<u8>>;

    fn decode(&self, data: &[u8]) -> Result<Value>;
}

/// JSON codec that tolerates empty bodies and recognizes `Status` objects
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendedCodec;

impl ExtendedCodec {
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    pub fn decode(&self, data: &[u8]) -> Result<Value> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(data).map_err(|err| Error::Codec(err.to_string()))
    }

    /// Returns the decoded `Status` if the value is a `kind: Status` object
    pub fn status(&self, value: &Value) -> Option<Status> {
        if value.get("kind").and_then(Value::as_str) != Some("Status") {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

/// Serializer attached to every configuration built by the client
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectCodecFactory {
    extended_codec: ExtendedCodec,
}

impl DirectCodecFactory {
    pub fn new(extended_codec: ExtendedCodec) -> Self {
        Self { extended_codec }
    }
}

impl NegotiatedSerializer for DirectCodecFactory {
    fn content_type(&self) -> &'static str {
        JSON_CONTENT_TYPE
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        self.extended_codec.encode(value)
    }

    fn decode(&self, data: &[u8]) -> Result<Value> {
        self.extended_codec.decode(data)
    }
}

pub fn encode_object<T: Serialize>(serializer: &dyn NegotiatedSerializer, obj: &T) -> Result<Vec<u8>> {
    let value = serde_json::to_value(obj)?;
    serializer.encode(&value)
}

pub fn decode_object<T: DeserializeOwned>(serializer: &dyn NegotiatedSerializer, data: &[u8]) -> Result<T> {
    let value = serializer.decode(data)?;
    Ok(serde_json::from_value(value)?)
}

/// Best effort decode of an error body into a `Status`
pub fn decode_status(serializer: &dyn NegotiatedSerializer, code: u16, data: &[u8]) -> Option<Status> {
    let value = serializer.decode(data).ok()?;
    let mut status = ExtendedCodec.status(&value)?;
    if status.code == 0 {
        status.code = code;
    }
    Some(status)
}
