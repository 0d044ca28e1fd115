use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use tracing::warn;

use crate::service::ServiceResponse;

/// Lambda proxy-integration response returned to API Gateway.
///
/// Serializes exactly as the wrapped [`ApiGatewayProxyResponse`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct GatewayResponse(ApiGatewayProxyResponse);

impl GatewayResponse {
    pub fn status_code(&self) -> i64 {
        self.0.status_code
    }

    /// First value of every header
    pub fn headers(&self) -> &HeaderMap {
        &self.0.headers
    }

    pub fn multi_value_headers(&self) -> &HeaderMap {
        &self.0.multi_value_headers
    }

    pub fn body(&self) -> Option<&str> {
        match &self.0.body {
            Some(Body::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn is_base64_encoded(&self) -> bool {
        self.0.is_base64_encoded
    }

    pub fn into_inner(self) -> ApiGatewayProxyResponse {
        self.0
    }

    /// Translate a container response. Headers without values appear in
    /// neither header map; names or values HTTP cannot carry are dropped.
    pub fn from_service_response(resp: &dyn ServiceResponse) -> Self {
        let mut headers = HeaderMap::new();
        let mut multi_value_headers = HeaderMap::new();

        for (name, values) in resp.headers().into_iter().flatten() {
            let header = match HeaderName::from_bytes(name.as_bytes()) {
                Ok(header) => header,
                Err(e) => {
                    warn!(header = %name, error = %e, "dropping response header");
                    continue;
                }
            };
            for value in values {
                match HeaderValue::from_str(value) {
                    Ok(value) => {
                        if !headers.contains_key(&header) {
                            headers.insert(header.clone(), value.clone());
                        }
                        multi_value_headers.append(header.clone(), value);
                    }
                    Err(e) => {
                        warn!(header = %name, error = %e, "dropping response header value");
                    }
                }
            }
        }

        Self(ApiGatewayProxyResponse {
            status_code: i64::from(resp.status_code()),
            headers,
            multi_value_headers,
            body: resp.body().map(|b| Body::Text(b.to_string())),
            is_base64_encoded: false,
        })
    }
}

impl From<GatewayResponse> for ApiGatewayProxyResponse {
    fn from(resp: GatewayResponse) -> Self {
        resp.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::DefaultServiceResponse;

    #[test]
    fn test_from_service_response() {
        let resp = DefaultServiceResponse::new(
            Some("{}".into()),
            vec![
                ("Set-Cookie".to_string(), vec!["a=1".to_string(), "b=2".to_string()]),
                ("X-Empty".to_string(), vec![]),
            ],
            201,
            Some("Created".into()),
        );
        let gw = GatewayResponse::from_service_response(&resp);
        assert_eq!(gw.status_code(), 201);
        assert_eq!(gw.headers()["set-cookie"], "a=1");
        assert_eq!(gw.headers().len(), 1);
        let cookies: Vec<&str> = gw
            .multi_value_headers()
            .get_all("set-cookie")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
        assert!(!gw.multi_value_headers().contains_key("x-empty"));

        let wire = serde_json::to_value(&gw).unwrap();
        assert_eq!(wire["statusCode"], 201);
        assert_eq!(wire["body"], "{}");
        assert_eq!(wire["isBase64Encoded"], false);
        assert_eq!(wire["multiValueHeaders"]["set-cookie"], serde_json::json!(["a=1", "b=2"]));
    }

    #[test]
    fn test_unrepresentable_headers_are_dropped() {
        let resp = DefaultServiceResponse::new(
            None,
            vec![
                ("Bad Name".to_string(), vec!["x".to_string()]),
                ("X-Line".to_string(), vec!["a\nb".to_string(), "ok".to_string()]),
            ],
            200,
            None,
        );
        let gw = GatewayResponse::from_service_response(&resp);
        assert_eq!(gw.headers().len(), 1);
        assert_eq!(gw.headers()["x-line"], "ok");
    }

    #[test]
    fn test_default_service_response_has_no_headers() {
        let gw = GatewayResponse::from_service_response(&DefaultServiceResponse::default());
        assert!(gw.headers().is_empty());
        assert_eq!(gw.body(), None);
        assert_eq!(gw.status_code(), 0);
        assert!(gw.into_inner().body.is_none());
    }
}
