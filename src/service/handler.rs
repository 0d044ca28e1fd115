use tracing::{debug, warn};

use super::{DefaultServiceResponse, ServiceRequest};
use crate::container::{ContainerRequest, DefaultContainerRequest, RequestHandler};

/// Serves direct Lambda invocations carrying a [`ServiceRequest`].
///
/// Requests that cannot be translated yield `400 Bad Request`; handler
/// failures yield `500 Internal Server Error`.
pub struct ServiceHandler<H> {
    handler: H,
}

impl<H: RequestHandler> ServiceHandler<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handle_request(&self, request: &ServiceRequest) -> DefaultServiceResponse {
        let container_request = match DefaultContainerRequest::try_from(request) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "rejecting untranslatable service request");
                return error_response(400);
            }
        };
        debug!(
            method = %container_request.http_method(),
            uri = %request.request_uri(),
            "dispatching service request"
        );
        match self.handler.handle(&container_request) {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "service request handler failed");
                error_response(500)
            }
        }
    }

    /// Decode a raw invocation payload and handle it.
    pub fn handle_event(&self, event: serde_json::Value) -> DefaultServiceResponse {
        match serde_json::from_value::<ServiceRequest>(event) {
            Ok(request) => self.handle_request(&request),
            Err(e) => {
                warn!(error = %e, "malformed service request event");
                error_response(400)
            }
        }
    }
}

pub(crate) fn error_response(status: u16) -> DefaultServiceResponse {
    let reason = http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string);
    DefaultServiceResponse::new(
        None,
        std::iter::empty::<(String, Vec<String>)>(),
        i32::from(status),
        reason,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{HeaderMap, ServiceResponse};
    use serde_json::json;

    fn echo_method(req: &dyn ContainerRequest) -> anyhow::Result<DefaultServiceResponse> {
        Ok(DefaultServiceResponse::new(
            Some(req.http_method().to_string()),
            req.headers().clone(),
            200,
            Some("OK".into()),
        ))
    }

    #[test]
    fn test_dispatches_to_handler() {
        let handler = ServiceHandler::new(echo_method);
        let resp = handler.handle_event(json!({
            "requestUri": "/ping",
            "httpMethod": "get",
            "headers": {"X-Id": ["1"]}
        }));
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.body(), Some("GET"));
        assert_eq!(resp.headers().unwrap()["X-Id"], vec!["1".to_string()]);
    }

    #[test]
    fn test_handler_error_is_500() {
        let handler = ServiceHandler::new(|_: &dyn ContainerRequest| -> anyhow::Result<DefaultServiceResponse> {
            anyhow::bail!("boom")
        });
        let resp = handler.handle_request(&ServiceRequest::new(None, HeaderMap::new(), "/", "GET"));
        assert_eq!(resp.status_code(), 500);
        assert_eq!(resp.reason_phrase(), Some("Internal Server Error"));
    }

    #[test]
    fn test_malformed_event_is_400() {
        let handler = ServiceHandler::new(echo_method);
        let resp = handler.handle_event(json!({"httpMethod": 3}));
        assert_eq!(resp.status_code(), 400);
        assert_eq!(resp.headers().map(|h| h.len()), Some(0));
    }
}
