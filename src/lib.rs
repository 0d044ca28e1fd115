//! # restgate
//!
//! **restgate** runs REST resources inside AWS Lambda behind API Gateway and
//! documents them as API Gateway flavoured Swagger 2.0.
//!
//! ## Overview
//!
//! Requests arrive either from API Gateway (Lambda proxy integration) or from
//! another Lambda function invoking this one directly. Both are translated into
//! a [`ContainerRequest`](container::ContainerRequest), handed to a
//! [`RequestHandler`](container::RequestHandler), and the handler's
//! [`DefaultServiceResponse`](service::DefaultServiceResponse) is translated
//! back into the shape the caller expects.
//!
//! ## Architecture
//!
//! - **[`container`]** - The request boundary handlers see
//! - **[`gateway`]** - API Gateway proxy events, identities and responses
//! - **[`service`]** - Direct Lambda-to-Lambda invocations and the response value type
//! - **[`security`]** - OpenID Connect claims from API Gateway authorizers
//! - **[`swagger`]** - Swagger generation with AWS extensions
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `restgate-swagger` command line
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant APIGW as API Gateway
//!     participant GH as GatewayHandler
//!     participant CR as DefaultContainerRequest
//!     participant H as RequestHandler
//!
//!     APIGW->>GH: proxy event (JSON)
//!     GH->>GH: deserialize ApiGatewayProxyRequest
//!     GH->>CR: try_from(&ApiGatewayProxyRequest)
//!     alt malformed event
//!         GH-->>APIGW: 400 Bad Request
//!     end
//!     GH->>H: handle(&container_request)
//!     alt handler error
//!         GH-->>APIGW: 500 Internal Server Error
//!     end
//!     H-->>GH: DefaultServiceResponse
//!     GH-->>APIGW: GatewayResponse
//! ```
//!
//! ## Example
//!
//! ```
//! use restgate::container::ContainerRequest;
//! use restgate::gateway::{ApiGatewayProxyRequest, GatewayHandler};
//! use restgate::service::DefaultServiceResponse;
//!
//! let handler = GatewayHandler::new(|request: &dyn ContainerRequest| -> anyhow::Result<DefaultServiceResponse> {
//!     let path = request.request_uri().path().to_string();
//!     Ok(DefaultServiceResponse::new(
//!         Some(path),
//!         [("Content-Type".to_string(), vec!["text/plain".to_string()])],
//!         200,
//!         Some("OK".to_string()),
//!     ))
//! });
//!
//! let mut event = ApiGatewayProxyRequest::default();
//! event.http_method = http::Method::GET;
//! event.path = Some("/hello".to_string());
//! event.request_context.request_id = Some("r-1".to_string());
//!
//! let response = handler.handle_request(&event);
//! assert_eq!(response.status_code(), 200);
//! assert_eq!(response.body(), Some("/hello"));
//! ```

pub mod cli;
pub mod container;
pub mod gateway;
pub mod logging;
pub mod security;
pub mod service;
pub mod swagger;

pub use container::{ContainerRequest, RequestHandler};
pub use gateway::{ApiGatewayProxyRequest, GatewayHandler, GatewayResponse};
pub use service::{DefaultServiceResponse, ServiceHandler, ServiceResponse};
pub use swagger::{AwsSwaggerConfiguration, AwsSwaggerReader};
