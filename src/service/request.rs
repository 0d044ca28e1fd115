use serde::{Deserialize, Serialize};

use super::response::HeaderMap;
use crate::container::{ContainerRequestError, DefaultContainerRequest};

/// Request sent by a direct (SDK) Lambda invocation rather than API Gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    headers: HeaderMap,
    request_uri: String,
    http_method: String,
}

impl ServiceRequest {
    pub fn new(
        body: Option<String>,
        headers: HeaderMap,
        request_uri: impl Into<String>,
        http_method: impl Into<String>,
    ) -> Self {
        Self {
            body,
            headers,
            request_uri: request_uri.into(),
            http_method: http_method.into(),
        }
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    pub fn http_method(&self) -> &str {
        &self.http_method
    }
}

impl TryFrom<&ServiceRequest> for DefaultContainerRequest {
    type Error = ContainerRequestError;

    fn try_from(req: &ServiceRequest) -> Result<Self, Self::Error> {
        DefaultContainerRequest::builder()
            .base_uri("/")
            .request_uri(&req.request_uri)
            .http_method(&req.http_method)
            .entity(req.body.clone().unwrap_or_default().into_bytes())
            .headers(req.headers.clone())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerRequest;
    use std::io::Read;

    #[test]
    fn test_into_container_request() {
        let mut headers = HeaderMap::new();
        headers.insert("Accept".into(), vec!["application/json".into()]);
        let req = ServiceRequest::new(Some("{}".into()), headers, "/pets?limit=1", "post");

        let container = DefaultContainerRequest::try_from(&req).unwrap();
        assert_eq!(container.http_method().as_str(), "POST");
        assert_eq!(container.request_uri().path(), "/pets");
        assert_eq!(container.request_uri().query(), Some("limit=1"));
        let mut body = String::new();
        container.entity_stream().read_to_string(&mut body).unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn test_missing_body_is_empty_entity() {
        let req = ServiceRequest::new(None, HeaderMap::new(), "/", "GET");
        let container = DefaultContainerRequest::try_from(&req).unwrap();
        assert!(container.entity().is_empty());
    }

    #[test]
    fn test_invalid_method_rejected() {
        let req = ServiceRequest::new(None, HeaderMap::new(), "/", "GE T");
        assert!(DefaultContainerRequest::try_from(&req).is_err());
    }
}
