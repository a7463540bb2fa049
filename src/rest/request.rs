//! Request description handed to the transport

use reqwest::Method;

use crate::schema::GroupVersion;

/// Content type of a PATCH body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchType {
    Json,
    Merge,
    StrategicMerge,
}

impl PatchType {
    pub fn content_type(self) -> &'static str {
        match self {
            PatchType::Json => "application/json-patch+json",
            PatchType::Merge => "application/merge-patch+json",
            PatchType::StrategicMerge => "application/strategic-merge-patch+json",
        }
    }
}

/// One call against the API: verb, target and optional body.
///
/// The path is built as
/// `{api_path}/{group}/{version}[/namespaces/{ns}]/{resource}[/{name}[/{subresource}]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub verb: Method,
    pub namespace: String,
    pub resource: String,
    pub name: Option<String>,
    pub subresource: Option<String>,
    pub params: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub content_type: Option<&'static str>,
}

impl Request {
    pub fn new(verb: Method) -> Self {
        Self {
            verb,
            namespace: String::new(),
            resource: String::new(),
            name: None,
            subresource: None,
            params: Vec::new(),
            body: None,
            content_type: None,
        }
    }

    /// Scope to a namespace; empty means all namespaces
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_owned();
        self
    }

    pub fn resource(mut self, resource: &str) -> Self {
        self.resource = resource.to_owned();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    pub fn subresource(mut self, subresource: &str) -> Self {
        self.subresource = Some(subresource.to_owned());
        self
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_owned(), value.into()));
        self
    }

    pub fn body(mut self, body: Vec<u8>, content_type: &'static str) -> Self {
        self.body = Some(body);
        self.content_type = Some(content_type);
        self
    }

    /// Absolute path of the request on the server
    pub fn path(&self, api_path: &str, group_version: Option<&GroupVersion>) -> String {
        let mut path = api_path.trim_end_matches('/').to_string();

        if let Some(gv) = group_version {
            if !gv.group.is_empty() {
                path.push('/');
                path.push_str(&gv.group);
            }
            if !gv.version.is_empty() {
                path.push('/');
                path.push_str(&gv.version);
            }
        }

        if !self.namespace.is_empty() {
            path.push_str("/namespaces/");
            path.push_str(&urlencoding::encode(&self.namespace));
        }

        if !self.resource.is_empty() {
            path.push('/');
            path.push_str(&self.resource);
        }

        if let Some(name) = &self.name {
            path.push('/');
            path.push_str(&urlencoding::encode(name));
            if let Some(subresource) = &self.subresource {
                path.push('/');
                path.push_str(subresource);
            }
        }

        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kubedb() -> GroupVersion {
        GroupVersion::new("kubedb.com", "v1alpha1")
    }

    #[test]
    fn namespaced_path() {
        let request = Request::new(Method::GET)
            .namespace("demo")
            .resource("snapshots")
            .name("snap-1");
        assert_eq!(
            request.path("/apis", Some(&kubedb())),
            "/apis/kubedb.com/v1alpha1/namespaces/demo/snapshots/snap-1"
        );
    }

    #[test]
    fn empty_namespace_means_all_namespaces() {
        let request = Request::new(Method::GET).namespace("").resource("postgreses");
        assert_eq!(
            request.path("/apis/", Some(&kubedb())),
            "/apis/kubedb.com/v1alpha1/postgreses"
        );
    }

    #[test]
    fn names_are_escaped() {
        let request = Request::new(Method::DELETE)
            .namespace("demo")
            .resource("elasticsearches")
            .name("a b/c");
        assert!(request
            .path("/apis", Some(&kubedb()))
            .ends_with("/elasticsearches/a%20b%2Fc"));
    }

    #[test]
    fn subresource_follows_name() {
        let request = Request::new(Method::PUT)
            .namespace("demo")
            .resource("postgreses")
            .name("pg")
            .subresource("status");
        assert_eq!(
            request.path("/apis", Some(&kubedb())),
            "/apis/kubedb.com/v1alpha1/namespaces/demo/postgreses/pg/status"
        );
    }

    #[test]
    fn patch_content_types() {
        assert_eq!(PatchType::Merge.content_type(), "application/merge-patch+json");
        assert_eq!(PatchType::Json.content_type(), "application/json-patch+json");
    }
}
