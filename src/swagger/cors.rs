use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::{AwsSwaggerConfiguration, CorsPolicy};

/// CORS headers an operation responds with, `None` when CORS is off.
///
/// The method policy wins over the resource policy unless it inherits; when
/// both inherit, `defaultCorsEnabled` decides.
pub(crate) fn resolve_cors_headers<'a>(
    config: &'a AwsSwaggerConfiguration,
    resource: &'a CorsPolicy,
    method: &'a CorsPolicy,
) -> Option<&'a BTreeMap<String, String>> {
    let effective = match (method, resource) {
        (CorsPolicy::Inherit, CorsPolicy::Inherit) => {
            return config.default_cors_enabled.then_some(&config.cors_headers)
        }
        (CorsPolicy::Inherit, policy) => policy,
        (policy, _) => policy,
    };
    match effective {
        CorsPolicy::Disabled => None,
        CorsPolicy::Custom(headers) => Some(headers),
        CorsPolicy::Enabled | CorsPolicy::Inherit => Some(&config.cors_headers),
    }
}

/// Integration response parameters mapping each header to its static value
pub(crate) fn response_parameters(headers: &BTreeMap<String, String>) -> Map<String, Value> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                format!("method.response.header.{name}"),
                Value::String(format!("'{value}'")),
            )
        })
        .collect()
}
