//! # Swagger Module
//!
//! Generates Swagger 2.0 documents with the AWS API Gateway extensions from a
//! declarative resource table.
//!
//! ## Overview
//!
//! - [`Resource`] / [`ResourceMethod`] - the operations to document, with
//!   their CORS, status code and security declarations
//! - [`AwsSwaggerConfiguration`] - defaults applied to every operation,
//!   loaded from the file named by `AWS_SWAGGER_CONFIGURATION`
//! - [`AwsSwaggerReader`] - turns resources into [`Swagger`] operations
//!
//! Declarations on a method take precedence over those on its resource.
//! Anything neither declares falls back to the configuration.
//!
//! ## Resource Table Files
//!
//! ```yaml
//! definitions:
//!   Entity0:
//!     type: object
//!     properties:
//!       prop: { type: string }
//! resources:
//!   - path: /base
//!     cors: false
//!     statusCodes: { defaultCode: 200, additionalCodes: [500] }
//!     security: denyAll
//!     methods:
//!       - method: GET
//!         path: /entity0/{id}
//!         response: Entity0
//!       - method: DELETE
//!         path: /entity0/{id}
//!         security: { rolesAllowed: [admin] }
//! ```

mod config;
mod cors;
mod error;
pub mod model;
mod reader;
mod resource;

pub use config::{
    AuthType, AuthorizerConfig, AuthorizerType, AwsSwaggerConfiguration, CONFIGURATION_ENV,
};
pub use error::SwaggerConfigError;
pub use model::{Operation, PathItem, Swagger};
pub use reader::{
    AwsSwaggerReader, AUTHORIZER_EXTENSION, AUTHTYPE_EXTENSION, INTEGRATION_EXTENSION,
    SIGV4_SECURITY_DEFINITION,
};
pub use resource::{
    load_resources, CorsPolicy, Resource, ResourceMethod, ResourceTable, SecurityPolicy,
    StatusCodes,
};
