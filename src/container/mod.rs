//! # Container Module
//!
//! The container module defines the boundary between an AWS event source and the
//! resource container that dispatches requests to handlers.
//!
//! ## Overview
//!
//! Every event-source adapter (API Gateway proxy events, direct service invocations)
//! turns its event into something implementing [`ContainerRequest`]:
//!
//! - **Base URI** - the URI resource paths are resolved against
//! - **Request URI** - path and query of the request
//! - **HTTP method** - always upper-case (`GET`, `POST`, ...)
//! - **Entity stream** - the request body
//! - **Headers** - header name to all of its values
//!
//! [`DefaultContainerRequest`] is the owned value produced by the adapters in
//! [`crate::gateway`] and [`crate::service`]. The container itself sits behind the
//! [`RequestHandler`] trait.

mod handler;
mod request;

pub use handler::RequestHandler;
pub use request::{
    ContainerRequest, ContainerRequestError, DefaultContainerRequest,
    DefaultContainerRequestBuilder,
};
