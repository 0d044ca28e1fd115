use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use tracing::{debug, info_span, warn};

use super::{GatewayRequestError, GatewayResponse};
use crate::container::{ContainerRequest, DefaultContainerRequest, RequestHandler};
use crate::service::error_response;

/// Serves API Gateway proxy events through a [`RequestHandler`].
///
/// Translation failures (malformed event, bad method, bad base64 body) are
/// answered with `400`, handler failures with `500`.
pub struct GatewayHandler<H> {
    handler: H,
}

impl<H: RequestHandler> GatewayHandler<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handle_request(&self, request: &ApiGatewayProxyRequest) -> GatewayResponse {
        let request_id = request.request_context.request_id.as_deref().unwrap_or("-");
        let span = info_span!("gateway_request", request_id = %request_id);
        let _enter = span.enter();

        let container_request = match DefaultContainerRequest::try_from(request) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "rejecting untranslatable gateway request");
                return GatewayResponse::from_service_response(&error_response(400));
            }
        };
        debug!(
            method = %container_request.http_method(),
            uri = %container_request.request_uri(),
            "dispatching gateway request"
        );
        match self.handler.handle(&container_request) {
            Ok(resp) => GatewayResponse::from_service_response(&resp),
            Err(e) => {
                warn!(error = %e, "gateway request handler failed");
                GatewayResponse::from_service_response(&error_response(500))
            }
        }
    }

    /// Decode a raw proxy event and handle it.
    pub fn handle_event(&self, event: serde_json::Value) -> GatewayResponse {
        match serde_json::from_value::<ApiGatewayProxyRequest>(event) {
            Ok(request) => self.handle_request(&request),
            Err(e) => {
                let e = GatewayRequestError::Malformed(e.to_string());
                warn!(error = %e, "malformed gateway event");
                GatewayResponse::from_service_response(&error_response(400))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::DefaultServiceResponse;
    use serde_json::json;
    use std::io::Read;

    fn echo(req: &dyn ContainerRequest) -> anyhow::Result<DefaultServiceResponse> {
        let mut body = String::new();
        req.entity_stream().read_to_string(&mut body)?;
        Ok(DefaultServiceResponse::new(
            Some(format!("{} {} {}", req.http_method(), req.request_uri(), body)),
            vec![("Content-Type".to_string(), vec!["text/plain".to_string()])],
            200,
            Some("OK".into()),
        ))
    }

    #[test]
    fn test_round_trip_through_handler() {
        let handler = GatewayHandler::new(echo);
        let mut request = ApiGatewayProxyRequest {
            http_method: http::Method::POST,
            path: Some("/pets".into()),
            body: Some("e30=".into()),
            is_base64_encoded: true,
            ..Default::default()
        };
        request.request_context.request_id = Some("r-1".into());
        let resp = handler.handle_request(&request);
        assert_eq!(resp.status_code(), 200);
        assert_eq!(resp.body(), Some("POST /pets {}"));
        assert_eq!(resp.headers()["content-type"], "text/plain");
    }

    #[test]
    fn test_bad_method_is_400() {
        let handler = GatewayHandler::new(echo);
        let resp = handler.handle_event(json!({"httpMethod": "G ET", "path": "/"}));
        assert_eq!(resp.status_code(), 400);
        assert_eq!(resp.body(), None);
    }

    #[test]
    fn test_malformed_event_is_400() {
        let handler = GatewayHandler::new(echo);
        let resp = handler.handle_event(json!("not a proxy event"));
        assert_eq!(resp.status_code(), 400);
    }

    #[test]
    fn test_handler_failure_is_500() {
        let handler = GatewayHandler::new(|_: &dyn ContainerRequest| -> anyhow::Result<DefaultServiceResponse> {
            anyhow::bail!("container exploded")
        });
        let resp = handler.handle_request(&ApiGatewayProxyRequest::default());
        assert_eq!(resp.status_code(), 500);
    }
}
