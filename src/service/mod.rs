//! Direct Lambda service invocations: request, response and the handler tying
//! them to a [`RequestHandler`](crate::container::RequestHandler).

mod handler;
mod request;
mod response;

pub(crate) use handler::error_response;
pub use handler::ServiceHandler;
pub use request::ServiceRequest;
pub use response::{DefaultServiceResponse, HeaderMap, ServiceResponse};
