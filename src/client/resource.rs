//! Namespaced sub-client for one resource kind

use std::marker::PhantomData;

use reqwest::Method;

use super::watch::{decode_events, WatchStream};
use super::ExtensionClient;
use crate::api::{DeleteOptions, ListOptions, Object, ObjectList, Spec};
use crate::codec::{decode_object, encode_object};
use crate::error::{Error, Result};
use crate::rest::{PatchType, Request};

/// CRUD access to one kind within one namespace.
///
/// An empty namespace addresses all namespaces; that only makes sense for
/// `list` and `watch`.
#[derive(Debug, Clone)]
pub struct ResourceClient<'a, S: Spec> {
    client: &'a ExtensionClient,
    namespace: String,
    spec: PhantomData<S>,
}

impl<'a, S: Spec> ResourceClient<'a, S> {
    pub(crate) fn new(client: &'a ExtensionClient, namespace: &str) -> Self {
        Self {
            client,
            namespace: namespace.to_owned(),
            spec: PhantomData,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Client this sub-client was created from
    pub fn client(&self) -> &'a ExtensionClient {
        self.client
    }

    fn request(&self, verb: Method) -> Request {
        Request::new(verb)
            .namespace(&self.namespace)
            .resource(S::plural())
    }

    async fn send<T: serde::de::DeserializeOwned>(&self, request: Request) -> Result<T> {
        let rest = self.client.rest_client();
        let serializer = rest.serializer();
        let body = rest.execute(request).await?;
        decode_object(serializer.as_ref(), &body)
    }

    fn with_body(&self, request: Request, obj: &Object<S>) -> Result<Request> {
        let serializer = self.client.rest_client().serializer();
        let body = encode_object(serializer.as_ref(), obj)?;
        Ok(request.body(body, serializer.content_type()))
    }

    pub async fn create(&self, obj: &Object<S>) -> Result<Object<S>> {
        tracing::info!("Creating {} {}/{}", S::kind(), self.namespace, obj.name());
        let request = self.with_body(self.request(Method::POST), obj)?;
        self.send(request).await
    }

    pub async fn update(&self, obj: &Object<S>) -> Result<Object<S>> {
        require_name(obj.name())?;
        let request = self.with_body(self.request(Method::PUT).name(obj.name()), obj)?;
        self.send(request).await
    }

    /// Replace only the status of an existing object
    pub async fn update_status(&self, obj: &Object<S>) -> Result<Object<S>> {
        require_name(obj.name())?;
        let request = self.request(Method::PUT).name(obj.name()).subresource("status");
        let request = self.with_body(request, obj)?;
        self.send(request).await
    }

    pub async fn delete(&self, name: &str, options: &DeleteOptions) -> Result<()> {
        require_name(name)?;
        tracing::info!("Deleting {} {}/{}", S::kind(), self.namespace, name);
        let rest = self.client.rest_client();
        let serializer = rest.serializer();
        let body = encode_object(serializer.as_ref(), options)?;
        let request = self
            .request(Method::DELETE)
            .name(name)
            .body(body, serializer.content_type());
        rest.execute(request).await?;
        Ok(())
    }

    pub async fn get(&self, name: &str) -> Result<Object<S>> {
        require_name(name)?;
        self.send(self.request(Method::GET).name(name)).await
    }

    pub async fn list(&self, options: &ListOptions) -> Result<ObjectList<S>> {
        let mut request = self.request(Method::GET);
        for (key, value) in options.query_pairs() {
            request = request.param(key, value);
        }
        self.send(request).await
    }

    /// Stream change events for objects matching `options`
    pub async fn watch(&self, options: &ListOptions) -> Result<WatchStream<S>> {
        let mut request = self.request(Method::GET).param("watch", "true");
        for (key, value) in options.query_pairs() {
            request = request.param(key, value);
        }

        let rest = self.client.rest_client();
        let chunks = rest.stream(request).await?;
        Ok(decode_events(chunks, rest.serializer()))
    }

    pub async fn patch(&self, name: &str, patch_type: PatchType, data: Vec<u8>) -> Result<Object<S>> {
        require_name(name)?;
        let request = self
            .request(Method::PATCH)
            .name(name)
            .body(data, patch_type.content_type());
        self.send(request).await
    }
}

/// An empty name would address the whole collection
fn require_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::MissingName);
    }
    Ok(())
}
