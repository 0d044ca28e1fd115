use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyRequestContext};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

use super::DefaultGatewayIdentity;
use crate::container::{ContainerRequestError, DefaultContainerRequest};
use crate::security::{ClaimsError, StandardClaims};
use crate::service::HeaderMap;

/// Container-facing views of an API Gateway proxy event.
///
/// Implemented for [`ApiGatewayProxyRequest`]; the claim and identity lookups
/// are also available on its [`ApiGatewayProxyRequestContext`].
pub trait GatewayRequestExt {
    /// Header multimap; multi-value headers win over single-value ones.
    /// Names are lower case as API Gateway headers are case-insensitive.
    fn header_map(&self) -> HeaderMap;

    /// Path plus encoded query string, as seen by the container.
    fn request_uri(&self) -> String;

    /// Body bytes with base64 encoding undone.
    fn decoded_body(&self) -> Result<Vec<u8>, GatewayRequestError>;

    /// `requestContext.identity` as a [`DefaultGatewayIdentity`].
    fn gateway_identity(&self) -> DefaultGatewayIdentity;

    /// OpenID claims from a Cognito user pool authorizer (`authorizer.claims`).
    fn standard_claims(&self) -> Option<Result<StandardClaims, ClaimsError>>;
}

impl GatewayRequestExt for ApiGatewayProxyRequest {
    fn header_map(&self) -> HeaderMap {
        let source = if self.multi_value_headers.is_empty() {
            &self.headers
        } else {
            &self.multi_value_headers
        };
        source
            .keys()
            .map(|name| {
                let values = source
                    .get_all(name)
                    .iter()
                    .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                    .collect();
                (name.as_str().to_string(), values)
            })
            .collect()
    }

    fn request_uri(&self) -> String {
        let path = self.path.as_deref().unwrap_or("/");
        let mut uri = encode_path(path);

        let params = if self.multi_value_query_string_parameters.is_empty() {
            &self.query_string_parameters
        } else {
            &self.multi_value_query_string_parameters
        };
        // Stable sort: one key's values keep their order.
        let mut pairs: Vec<(&str, &str)> = params.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        if !pairs.is_empty() {
            let mut query = url::form_urlencoded::Serializer::new(String::new());
            for (name, value) in pairs {
                query.append_pair(name, value);
            }
            uri.push('?');
            uri.push_str(&query.finish());
        }
        uri
    }

    fn decoded_body(&self) -> Result<Vec<u8>, GatewayRequestError> {
        match &self.body {
            None => Ok(Vec::new()),
            Some(body) if self.is_base64_encoded => STANDARD
                .decode(body)
                .map_err(|e| GatewayRequestError::InvalidBase64Body(e.to_string())),
            Some(body) => Ok(body.clone().into_bytes()),
        }
    }

    fn gateway_identity(&self) -> DefaultGatewayIdentity {
        self.request_context.gateway_identity()
    }

    fn standard_claims(&self) -> Option<Result<StandardClaims, ClaimsError>> {
        self.request_context.standard_claims()
    }
}

/// Identity and claim lookups on a proxy event's `requestContext`.
pub trait ApiGatewayProxyRequestContextExt {
    fn gateway_identity(&self) -> DefaultGatewayIdentity;
    fn standard_claims(&self) -> Option<Result<StandardClaims, ClaimsError>>;
}

impl ApiGatewayProxyRequestContextExt for ApiGatewayProxyRequestContext {
    fn gateway_identity(&self) -> DefaultGatewayIdentity {
        DefaultGatewayIdentity::from(&self.identity)
    }

    fn standard_claims(&self) -> Option<Result<StandardClaims, ClaimsError>> {
        let claims = self.authorizer.fields.get("claims")?.as_object()?;
        Some(StandardClaims::from_claims(claims.clone()))
    }
}

fn encode_path(path: &str) -> String {
    let encoded: Vec<String> = path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    let joined = encoded.join("/");
    if joined.starts_with('/') {
        joined
    } else {
        format!("/{joined}")
    }
}

/// Error translating a proxy event into a container request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayRequestError {
    /// The event is not valid JSON for a proxy event
    Malformed(String),
    /// `isBase64Encoded` was set but the body is not base64
    InvalidBase64Body(String),
    /// Method or URI were rejected
    Container(ContainerRequestError),
}

impl fmt::Display for GatewayRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayRequestError::Malformed(reason) => {
                write!(f, "malformed gateway request: {reason}")
            }
            GatewayRequestError::InvalidBase64Body(reason) => {
                write!(f, "gateway request body is not valid base64: {reason}")
            }
            GatewayRequestError::Container(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for GatewayRequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GatewayRequestError::Container(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContainerRequestError> for GatewayRequestError {
    fn from(e: ContainerRequestError) -> Self {
        GatewayRequestError::Container(e)
    }
}

impl TryFrom<&ApiGatewayProxyRequest> for DefaultContainerRequest {
    type Error = GatewayRequestError;

    fn try_from(req: &ApiGatewayProxyRequest) -> Result<Self, Self::Error> {
        Ok(DefaultContainerRequest::builder()
            .base_uri("/")
            .http_method(req.http_method.as_str())
            .request_uri(req.request_uri())
            .entity(req.decoded_body()?)
            .headers(req.header_map())
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::OpenIdStandardClaims;
    use aws_lambda_events::query_map::QueryMap;
    use http::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
    use std::collections::HashMap;

    fn query(pairs: &[(&str, &str)]) -> QueryMap {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in pairs {
            map.entry(name.to_string()).or_default().push(value.to_string());
        }
        QueryMap::from(map)
    }

    #[test]
    fn test_request_uri_encodes_path_and_query() {
        let req = ApiGatewayProxyRequest {
            path: Some("/files/a b".into()),
            query_string_parameters: query(&[("q", "x&y"), ("a", "1")]),
            ..Default::default()
        };
        assert_eq!(req.request_uri(), "/files/a%20b?a=1&q=x%26y");
    }

    #[test]
    fn test_multi_value_query_wins() {
        let req = ApiGatewayProxyRequest {
            path: Some("/".into()),
            query_string_parameters: query(&[("a", "2")]),
            multi_value_query_string_parameters: query(&[("a", "1"), ("a", "2")]),
            ..Default::default()
        };
        assert_eq!(req.request_uri(), "/?a=1&a=2");
    }

    #[test]
    fn test_missing_path_is_root() {
        let req = ApiGatewayProxyRequest::default();
        assert_eq!(req.request_uri(), "/");
    }

    #[test]
    fn test_base64_body() {
        let req = ApiGatewayProxyRequest {
            body: Some("aGVsbG8=".into()),
            is_base64_encoded: true,
            ..Default::default()
        };
        assert_eq!(req.decoded_body().unwrap(), b"hello".to_vec());

        let bad = ApiGatewayProxyRequest {
            body: Some("***".into()),
            is_base64_encoded: true,
            ..Default::default()
        };
        assert!(matches!(
            bad.decoded_body(),
            Err(GatewayRequestError::InvalidBase64Body(_))
        ));
        assert!(matches!(
            DefaultContainerRequest::try_from(&bad),
            Err(GatewayRequestError::InvalidBase64Body(_))
        ));
    }

    #[test]
    fn test_headers_fall_back_to_single_value() {
        let mut req = ApiGatewayProxyRequest::default();
        req.headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        assert_eq!(req.header_map()["accept"], vec!["text/html".to_string()]);

        req.multi_value_headers
            .append(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let headers = req.header_map();
        assert!(!headers.contains_key("accept"));
        assert_eq!(headers["content-type"], vec!["application/json".to_string()]);
    }

    #[test]
    fn test_cognito_claims() {
        let mut req = ApiGatewayProxyRequest::default();
        req.request_context.authorizer.fields.insert(
            "claims".to_string(),
            serde_json::json!({"sub": "abc", "email": "a@b.com", "email_verified": "true"}),
        );
        let claims = req.standard_claims().unwrap().unwrap();
        assert_eq!(claims.email(), Some("a@b.com"));
        assert_eq!(claims.email_verified(), Some(true));
    }

    #[test]
    fn test_custom_authorizer_has_no_claims() {
        let mut req = ApiGatewayProxyRequest::default();
        req.request_context
            .authorizer
            .fields
            .insert("principalId".to_string(), serde_json::json!("user"));
        assert!(req.standard_claims().is_none());
    }
}
