use http::{Method, Uri};
use std::fmt;
use std::io::{Cursor, Read};

use crate::service::HeaderMap;

/// Request definition fed into the resource container.
pub trait ContainerRequest {
    /// The base URI; the request's own base if known, otherwise `/`
    fn base_uri(&self) -> &Uri;
    /// The request URI (path and query)
    fn request_uri(&self) -> &Uri;
    /// The upper-case HTTP method, e.g. `GET`, `PUT`, `POST`, `DELETE`
    fn http_method(&self) -> &Method;
    /// The request body
    fn entity_stream(&self) -> Box<dyn Read + '_>;
    /// The request headers
    fn headers(&self) -> &HeaderMap;
}

/// Error raised when an event cannot be turned into a container request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerRequestError {
    /// A required part was never supplied to the builder
    Missing {
        /// Name of the missing part
        part: &'static str,
    },
    /// The HTTP method is not a valid token
    InvalidMethod {
        /// The rejected method
        method: String,
    },
    /// A URI could not be parsed
    InvalidUri {
        /// The rejected URI
        uri: String,
        /// Parser message
        reason: String,
    },
}

impl fmt::Display for ContainerRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRequestError::Missing { part } => {
                write!(f, "container request is missing its {part}")
            }
            ContainerRequestError::InvalidMethod { method } => {
                write!(f, "invalid HTTP method '{method}'")
            }
            ContainerRequestError::InvalidUri { uri, reason } => {
                write!(f, "invalid URI '{uri}': {reason}")
            }
        }
    }
}

impl std::error::Error for ContainerRequestError {}

/// Owned [`ContainerRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultContainerRequest {
    base_uri: Uri,
    request_uri: Uri,
    http_method: Method,
    entity: Vec<u8>,
    headers: HeaderMap,
}

impl DefaultContainerRequest {
    pub fn builder() -> DefaultContainerRequestBuilder {
        DefaultContainerRequestBuilder::default()
    }

    /// Raw body bytes
    pub fn entity(&self) -> &[u8] {
        &self.entity
    }

    /// First value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }
}

impl ContainerRequest for DefaultContainerRequest {
    fn base_uri(&self) -> &Uri {
        &self.base_uri
    }

    fn request_uri(&self) -> &Uri {
        &self.request_uri
    }

    fn http_method(&self) -> &Method {
        &self.http_method
    }

    fn entity_stream(&self) -> Box<dyn Read + '_> {
        Box::new(Cursor::new(self.entity.as_slice()))
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Builder validating the method and URIs of a [`DefaultContainerRequest`]
#[derive(Debug, Default)]
pub struct DefaultContainerRequestBuilder {
    base_uri: Option<String>,
    request_uri: Option<String>,
    http_method: Option<String>,
    entity: Vec<u8>,
    headers: HeaderMap,
}

impl DefaultContainerRequestBuilder {
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    pub fn request_uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uri = Some(uri.into());
        self
    }

    /// Method names are upper-cased before validation.
    pub fn http_method(mut self, method: impl Into<String>) -> Self {
        self.http_method = Some(method.into());
        self
    }

    pub fn entity(mut self, entity: Vec<u8>) -> Self {
        self.entity = entity;
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn build(self) -> Result<DefaultContainerRequest, ContainerRequestError> {
        let base_uri = parse_uri(self.base_uri.as_deref().unwrap_or("/"))?;
        let request_uri = parse_uri(
            self.request_uri
                .as_deref()
                .ok_or(ContainerRequestError::Missing { part: "request URI" })?,
        )?;
        let method = self
            .http_method
            .ok_or(ContainerRequestError::Missing { part: "HTTP method" })?;
        let http_method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map_err(|_| ContainerRequestError::InvalidMethod { method })?;

        Ok(DefaultContainerRequest {
            base_uri,
            request_uri,
            http_method,
            entity: self.entity,
            headers: self.headers,
        })
    }
}

fn parse_uri(uri: &str) -> Result<Uri, ContainerRequestError> {
    uri.parse::<Uri>()
        .map_err(|e| ContainerRequestError::InvalidUri {
            uri: uri.to_string(),
            reason: e.to_string(),
        })
}
