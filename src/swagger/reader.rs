use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use super::config::{AuthType, AuthorizerConfig, AuthorizerType};
use super::cors::{resolve_cors_headers, response_parameters};
use super::model::{
    Header, Operation, Parameter, PathItem, Response, SecurityRequirement,
    SecuritySchemeDefinition, Swagger, Tag,
};
use super::{
    AwsSwaggerConfiguration, Resource, ResourceMethod, ResourceTable, SecurityPolicy,
    StatusCodes, SwaggerConfigError,
};

pub const INTEGRATION_EXTENSION: &str = "x-amazon-apigateway-integration";
pub const AUTHTYPE_EXTENSION: &str = "x-amazon-apigateway-authtype";
pub const AUTHORIZER_EXTENSION: &str = "x-amazon-apigateway-authorizer";

/// Security definition name used for IAM authentication
pub const SIGV4_SECURITY_DEFINITION: &str = "sigv4";

// `{name}` or `{name: regex}`; the regex may itself contain one level of braces.
static PATH_TEMPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\s*([A-Za-z_][A-Za-z0-9_.\-]*)\s*(?::\s*((?:[^{}]|\{[^{}]*\})*?))?\s*\}")
        .expect("path template regex should be valid")
});

/// Builds a Swagger document for API Gateway from a resource table.
///
/// Every resource method becomes one operation carrying an `aws_proxy`
/// integration, CORS response headers, the configured status codes and,
/// for restricted methods, the configured authentication.
///
/// ```
/// use restgate::swagger::{AwsSwaggerConfiguration, AwsSwaggerReader, Resource, ResourceMethod, Swagger};
/// use http::Method;
///
/// let mut reader = AwsSwaggerReader::new(Swagger::new(), AwsSwaggerConfiguration::default());
/// let swagger = reader.read(&[Resource::new("/").with_method(
///     ResourceMethod::new(Method::GET).with_path("blub"),
/// )]);
/// assert!(swagger.operation("/blub", &Method::GET).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct AwsSwaggerReader {
    swagger: Swagger,
    config: AwsSwaggerConfiguration,
}

impl AwsSwaggerReader {
    pub fn new(swagger: Swagger, config: AwsSwaggerConfiguration) -> Self {
        Self { swagger, config }
    }

    /// Create a reader configured from the file named by `AWS_SWAGGER_CONFIGURATION`.
    pub fn from_env(swagger: Swagger) -> Result<Self, SwaggerConfigError> {
        Ok(Self::new(swagger, AwsSwaggerConfiguration::from_env()?))
    }

    pub fn from_config_path(swagger: Swagger, path: &Path) -> Result<Self, SwaggerConfigError> {
        Ok(Self::new(swagger, AwsSwaggerConfiguration::load(path)?))
    }

    pub fn config(&self) -> &AwsSwaggerConfiguration {
        &self.config
    }

    pub fn swagger(&self) -> &Swagger {
        &self.swagger
    }

    pub fn into_swagger(self) -> Swagger {
        self.swagger
    }

    /// Add the table's definitions, then read its resources.
    pub fn read_table(&mut self, table: &ResourceTable) -> &Swagger {
        for (name, schema) in &table.definitions {
            self.swagger
                .definitions
                .insert(name.clone(), schema.clone());
        }
        self.read(&table.resources)
    }

    /// Add one operation per resource method to the document.
    ///
    /// An operation already present for the same path and method is replaced.
    pub fn read(&mut self, resources: &[Resource]) -> &Swagger {
        info!(resources = resources.len(), "reading resources");
        for resource in resources {
            for tag in &resource.tags {
                if !self.swagger.tags.iter().any(|t| &t.name == tag) {
                    self.swagger.tags.push(Tag {
                        name: tag.clone(),
                        description: None,
                    });
                }
            }
            for method in &resource.methods {
                self.read_method(resource, method);
            }
        }
        &self.swagger
    }

    fn read_method(&mut self, resource: &Resource, method: &ResourceMethod) {
        let (path, path_parameters) = parse_path_template(&join_paths(
            &resource.path,
            method.path.as_deref(),
        ));
        if !PathItem::supports(&method.http_method) {
            warn!(
                path = %path,
                method = %method.http_method,
                "method cannot be expressed in Swagger 2.0; skipped"
            );
            return;
        }
        let operation = self.build_operation(resource, method, path_parameters);

        let item = self.swagger.paths.entry(path.clone()).or_default();
        match item.set(&method.http_method, operation) {
            Ok(Some(_)) => warn!(
                path = %path,
                method = %method.http_method,
                "replacing duplicate operation"
            ),
            Ok(None) => debug!(path = %path, method = %method.http_method, "added operation"),
            Err(_) => {
                if item.operations().next().is_none() {
                    self.swagger.paths.remove(&path);
                }
            }
        }
    }

    fn build_operation(
        &mut self,
        resource: &Resource,
        method: &ResourceMethod,
        path_parameters: Vec<Parameter>,
    ) -> Operation {
        let mut operation = Operation {
            tags: resource.tags.clone(),
            summary: method.summary.clone(),
            description: method.notes.clone(),
            operation_id: method.operation_id.clone(),
            consumes: method.consumes.clone(),
            produces: method.produces.clone(),
            deprecated: method.deprecated.then_some(true),
            ..Default::default()
        };
        // Declared parameters replace template-derived ones of the same name and location.
        operation.parameters = path_parameters
            .into_iter()
            .filter(|derived| {
                !method
                    .parameters
                    .iter()
                    .any(|p| p.name == derived.name && p.location == derived.location)
            })
            .collect();
        operation.parameters.extend(method.parameters.iter().cloned());
        operation.security = self.security(resource, method);

        let (default_code, additional_codes) = resolve_status_codes(
            &self.config,
            resource.status_codes.as_ref(),
            method.status_codes.as_ref(),
        );
        let cors_headers = resolve_cors_headers(&self.config, &resource.cors, &method.cors);

        for code in std::iter::once(default_code).chain(additional_codes.iter().copied()) {
            let mut response = Response {
                description: status_description(code),
                ..Default::default()
            };
            if code == default_code && code != 204 {
                if let Some(definition) = &method.response {
                    response.schema = Some(json!({ "$ref": format!("#/definitions/{definition}") }));
                }
            }
            if let Some(headers) = cors_headers {
                response.headers = headers
                    .keys()
                    .map(|name| (name.clone(), Header::string()))
                    .collect();
            }
            operation.responses.insert(code.to_string(), response);
        }

        let integration = self.integration(default_code, &additional_codes, cors_headers);
        operation
            .vendor_extensions
            .insert(INTEGRATION_EXTENSION.to_string(), integration);

        debug!(
            method = %method.http_method,
            default_code,
            cors = cors_headers.is_some(),
            secured = !operation.security.is_empty(),
            "built operation"
        );
        operation
    }

    fn integration(
        &self,
        default_code: u16,
        additional_codes: &[u16],
        cors_headers: Option<&BTreeMap<String, String>>,
    ) -> Value {
        let integration_response = |code: u16| {
            let mut response = Map::new();
            response.insert("statusCode".into(), Value::String(code.to_string()));
            if let Some(headers) = cors_headers {
                response.insert(
                    "responseParameters".into(),
                    Value::Object(response_parameters(headers)),
                );
            }
            Value::Object(response)
        };

        let mut responses = Map::new();
        responses.insert("default".into(), integration_response(default_code));
        for code in additional_codes {
            responses.insert(code.to_string(), integration_response(*code));
        }

        let mut integration = Map::new();
        integration.insert("type".into(), json!("aws_proxy"));
        integration.insert("httpMethod".into(), json!("POST"));
        if let Some(uri) = &self.config.lambda_uri {
            integration.insert("uri".into(), json!(uri));
        }
        if let Some(credentials) = &self.config.lambda_credential {
            integration.insert("credentials".into(), json!(credentials));
        }
        integration.insert("passthroughBehavior".into(), json!("when_no_match"));
        integration.insert("responses".into(), Value::Object(responses));
        Value::Object(integration)
    }

    fn security(&mut self, resource: &Resource, method: &ResourceMethod) -> Vec<SecurityRequirement> {
        let policy = match &method.security {
            SecurityPolicy::Inherit => &resource.security,
            policy => policy,
        };
        if !policy.is_restricted() {
            return Vec::new();
        }
        if !method.authorizations.is_empty() {
            return method
                .authorizations
                .iter()
                .map(|name| SecurityRequirement::from([(name.clone(), Vec::new())]))
                .collect();
        }

        let (name, definition) = match (self.config.auth_type, &self.config.authorizer) {
            (AuthType::None, _) => return Vec::new(),
            (AuthType::Iam, _) => (SIGV4_SECURITY_DEFINITION.to_string(), sigv4_definition()),
            (AuthType::Authorizer, Some(authorizer)) => {
                (authorizer.name.clone(), authorizer_definition(authorizer))
            }
            (AuthType::Authorizer, None) => {
                warn!("authType is 'authorizer' but no authorizer is configured");
                return Vec::new();
            }
        };
        self.swagger
            .security_definitions
            .entry(name.clone())
            .or_insert(definition);
        vec![SecurityRequirement::from([(name, Vec::new())])]
    }
}

fn sigv4_definition() -> SecuritySchemeDefinition {
    SecuritySchemeDefinition {
        scheme_type: "apiKey".to_string(),
        name: Some("Authorization".to_string()),
        location: Some("header".to_string()),
        vendor_extensions: BTreeMap::from([(AUTHTYPE_EXTENSION.to_string(), json!("awsSigv4"))]),
    }
}

fn authorizer_definition(authorizer: &AuthorizerConfig) -> SecuritySchemeDefinition {
    let (auth_type, authorizer_type) = match authorizer.authorizer_type {
        AuthorizerType::Token => ("custom", "token"),
        AuthorizerType::Request => ("custom", "request"),
        AuthorizerType::CognitoUserPools => ("cognito_user_pools", "cognito_user_pools"),
    };

    let mut settings = Map::new();
    settings.insert("type".into(), json!(authorizer_type));
    if let Some(uri) = &authorizer.uri {
        settings.insert("authorizerUri".into(), json!(uri));
    }
    if let Some(credentials) = &authorizer.credentials {
        settings.insert("authorizerCredentials".into(), json!(credentials));
    }
    if let Some(ttl) = authorizer.result_ttl_in_seconds {
        settings.insert("authorizerResultTtlInSeconds".into(), json!(ttl));
    }
    settings.insert(
        "identitySource".into(),
        json!(format!("method.request.header.{}", authorizer.identity_header)),
    );
    if !authorizer.provider_arns.is_empty() {
        settings.insert("providerARNs".into(), json!(authorizer.provider_arns));
    }

    SecuritySchemeDefinition {
        scheme_type: "apiKey".to_string(),
        name: Some(authorizer.identity_header.clone()),
        location: Some("header".to_string()),
        vendor_extensions: BTreeMap::from([
            (AUTHTYPE_EXTENSION.to_string(), json!(auth_type)),
            (AUTHORIZER_EXTENSION.to_string(), Value::Object(settings)),
        ]),
    }
}

/// Default and additional codes of the most specific declaration.
///
/// The chosen declaration is used wholesale; its unset fields fall back to
/// the configuration. Additional codes never repeat the default code.
fn resolve_status_codes(
    config: &AwsSwaggerConfiguration,
    resource: Option<&StatusCodes>,
    method: Option<&StatusCodes>,
) -> (u16, Vec<u16>) {
    let chosen = method.or(resource);
    let default_code = chosen
        .and_then(|c| c.default_code)
        .unwrap_or(config.default_status_code);
    let declared = chosen
        .and_then(|c| c.additional_codes.as_deref())
        .unwrap_or(&config.additional_status_codes);

    let mut additional = Vec::with_capacity(declared.len());
    for code in declared {
        if *code != default_code && !additional.contains(code) {
            additional.push(*code);
        }
    }
    (default_code, additional)
}

fn status_description(code: u16) -> String {
    http::StatusCode::from_u16(code)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Status {code}"))
}

/// Join a resource path and an optional method sub-path into `/a/b` form.
fn join_paths(base: &str, sub: Option<&str>) -> String {
    let segments: Vec<&str> = [base, sub.unwrap_or("")]
        .into_iter()
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

/// Strip regexes from template variables and derive the path parameters.
fn parse_path_template(path: &str) -> (String, Vec<Parameter>) {
    let mut parameters: Vec<Parameter> = Vec::new();
    for captures in PATH_TEMPLATE.captures_iter(path) {
        let name = captures[1].to_string();
        if parameters.iter().any(|p| p.name == name) {
            continue;
        }
        parameters.push(Parameter {
            name,
            location: "path".to_string(),
            required: true,
            param_type: Some("string".to_string()),
            pattern: captures
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|p| !p.is_empty()),
            description: None,
        });
    }
    let normalized = PATH_TEMPLATE.replace_all(path, "{$1}").into_owned();
    (normalized, parameters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths("/", Some("blub")), "/blub");
        assert_eq!(join_paths("base/", Some("/entity0")), "/base/entity0");
        assert_eq!(join_paths("/base", None), "/base");
        assert_eq!(join_paths("", None), "/");
    }

    #[test]
    fn test_path_template_parameters() {
        let (path, params) = parse_path_template("/users/{id: [0-9]{1,5}}/files/{name}");
        assert_eq!(path, "/users/{id}/files/{name}");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "id");
        assert_eq!(params[0].pattern.as_deref(), Some("[0-9]{1,5}"));
        assert!(params[0].required);
        assert_eq!(params[1].name, "name");
        assert_eq!(params[1].pattern, None);
    }

    #[test]
    fn test_status_codes_most_specific_wins_wholesale() {
        let config = AwsSwaggerConfiguration {
            additional_status_codes: vec![503],
            ..Default::default()
        };
        let resource = StatusCodes::new(204, [500]);
        let method = StatusCodes::new(200, [400, 404]);
        assert_eq!(
            resolve_status_codes(&config, Some(&resource), Some(&method)),
            (200, vec![400, 404])
        );
        assert_eq!(
            resolve_status_codes(&config, Some(&resource), None),
            (204, vec![500])
        );
        assert_eq!(
            resolve_status_codes(&config, None, Some(&StatusCodes::default_code(302))),
            (302, vec![503])
        );
        assert_eq!(resolve_status_codes(&config, None, None), (200, vec![503]));
    }

    #[test]
    fn test_additional_codes_skip_default() {
        let config = AwsSwaggerConfiguration::default();
        let codes = StatusCodes::new(200, [200, 404, 404]);
        assert_eq!(resolve_status_codes(&config, Some(&codes), None), (200, vec![404]));
    }

    #[test]
    fn test_status_description() {
        assert_eq!(status_description(404), "Not Found");
        assert_eq!(status_description(299), "Status 299");
    }
}
