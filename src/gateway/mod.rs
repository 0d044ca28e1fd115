//! # Gateway Module
//!
//! API Gateway Lambda proxy integration on top of the `aws_lambda_events`
//! event types: [`GatewayRequestExt`] views of an [`ApiGatewayProxyRequest`],
//! the caller identity ([`DefaultGatewayIdentity`]), the response wrapper
//! ([`GatewayResponse`]) and [`GatewayHandler`], which translates an event into a
//! [`ContainerRequest`](crate::container::ContainerRequest), runs the
//! [`RequestHandler`](crate::container::RequestHandler) and translates the
//! result back.
//!
//! ```
//! use restgate::container::ContainerRequest;
//! use restgate::gateway::GatewayHandler;
//! use restgate::service::DefaultServiceResponse;
//! use restgate::gateway::ApiGatewayProxyRequest;
//!
//! let handler = GatewayHandler::new(|req: &dyn ContainerRequest| -> anyhow::Result<DefaultServiceResponse> {
//!     Ok(DefaultServiceResponse::new(
//!         Some(req.request_uri().path().to_string()),
//!         Vec::<(String, Vec<String>)>::new(),
//!         200,
//!         None,
//!     ))
//! });
//! let resp = handler.handle_request(&ApiGatewayProxyRequest {
//!     http_method: http::Method::GET,
//!     path: Some("/health".to_string()),
//!     ..Default::default()
//! });
//! assert_eq!(resp.body(), Some("/health"));
//! ```

mod handler;
mod identity;
mod request;
mod response;

pub use handler::GatewayHandler;
pub use identity::{DefaultGatewayIdentity, DefaultGatewayIdentityBuilder, GatewayIdentity};
pub use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
pub use request::{ApiGatewayProxyRequestContextExt, GatewayRequestError, GatewayRequestExt};
pub use response::GatewayResponse;
