use anyhow::Context;
use http::Method;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use super::model::Parameter;

/// CORS policy of a resource or one of its methods
///
/// Deserialized from:
/// - `true` → `Enabled` (configured CORS headers)
/// - `false` → `Disabled` (no CORS headers)
/// - `"inherit"` or missing → `Inherit`
/// - an object of header name to value → `Custom`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Defer to the enclosing resource, then to `defaultCorsEnabled`
    #[default]
    Inherit,
    Disabled,
    /// Use the configured CORS headers
    Enabled,
    /// Use these headers instead of the configured ones
    Custom(BTreeMap<String, String>),
}

impl CorsPolicy {
    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(CorsPolicy::Inherit),
            Value::Bool(true) => Ok(CorsPolicy::Enabled),
            Value::Bool(false) => Ok(CorsPolicy::Disabled),
            Value::String(s) if s == "inherit" => Ok(CorsPolicy::Inherit),
            Value::Object(obj) => obj
                .iter()
                .map(|(name, v)| match v.as_str() {
                    Some(s) => Ok((name.clone(), s.to_string())),
                    None => Err(format!("CORS header '{name}' must have a string value")),
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(CorsPolicy::Custom),
            other => Err(format!(
                "expected true, false, \"inherit\" or a header object for cors, got {other}"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for CorsPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        CorsPolicy::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Status codes an operation answers with
///
/// Unset fields fall back to the configured `defaultStatusCode` and
/// `additionalStatusCodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatusCodes {
    #[serde(default)]
    pub default_code: Option<u16>,
    #[serde(default)]
    pub additional_codes: Option<Vec<u16>>,
}

impl StatusCodes {
    pub fn new(default_code: u16, additional_codes: impl IntoIterator<Item = u16>) -> Self {
        Self {
            default_code: Some(default_code),
            additional_codes: Some(additional_codes.into_iter().collect()),
        }
    }

    pub fn default_code(code: u16) -> Self {
        Self {
            default_code: Some(code),
            additional_codes: None,
        }
    }

    pub fn additional_codes(codes: impl IntoIterator<Item = u16>) -> Self {
        Self {
            default_code: None,
            additional_codes: Some(codes.into_iter().collect()),
        }
    }
}

/// Access restriction of a resource or method
///
/// `denyAll` and `rolesAllowed` make an operation restricted; restricted
/// operations get the configured API Gateway authentication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecurityPolicy {
    #[default]
    Inherit,
    PermitAll,
    DenyAll,
    RolesAllowed(Vec<String>),
}

impl SecurityPolicy {
    pub fn is_restricted(&self) -> bool {
        matches!(self, SecurityPolicy::DenyAll | SecurityPolicy::RolesAllowed(_))
    }
}

/// One operation of a [`Resource`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceMethod {
    #[serde(rename = "method", deserialize_with = "deserialize_method")]
    pub http_method: Method,
    /// Sub-path appended to the resource path
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub consumes: Vec<String>,
    #[serde(default)]
    pub produces: Vec<String>,
    /// Name of the definition returned with the default status code
    #[serde(default)]
    pub response: Option<String>,
    /// Query, header and body parameters; path parameters come from the path template
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub cors: CorsPolicy,
    #[serde(default)]
    pub status_codes: Option<StatusCodes>,
    #[serde(default)]
    pub security: SecurityPolicy,
    /// Explicit security definitions, used instead of the configured auth type
    #[serde(default)]
    pub authorizations: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
}

fn deserialize_method<'de, D>(deserializer: D) -> Result<Method, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Method::from_bytes(raw.to_ascii_uppercase().as_bytes())
        .map_err(|_| serde::de::Error::custom(format!("invalid HTTP method '{raw}'")))
}

impl ResourceMethod {
    pub fn new(http_method: Method) -> Self {
        Self {
            http_method,
            path: None,
            operation_id: None,
            summary: None,
            notes: None,
            consumes: Vec::new(),
            produces: Vec::new(),
            response: None,
            parameters: Vec::new(),
            cors: CorsPolicy::Inherit,
            status_codes: None,
            security: SecurityPolicy::Inherit,
            authorizations: Vec::new(),
            deprecated: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_response(mut self, definition: impl Into<String>) -> Self {
        self.response = Some(definition.into());
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    pub fn with_status_codes(mut self, status_codes: StatusCodes) -> Self {
        self.status_codes = Some(status_codes);
        self
    }

    pub fn with_security(mut self, security: SecurityPolicy) -> Self {
        self.security = security;
        self
    }

    pub fn with_authorization(mut self, name: impl Into<String>) -> Self {
        self.authorizations.push(name.into());
        self
    }
}

/// A group of operations sharing a path prefix and defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Resource {
    pub path: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cors: CorsPolicy,
    #[serde(default)]
    pub status_codes: Option<StatusCodes>,
    #[serde(default)]
    pub security: SecurityPolicy,
    #[serde(default)]
    pub methods: Vec<ResourceMethod>,
}

impl Resource {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    pub fn with_status_codes(mut self, status_codes: StatusCodes) -> Self {
        self.status_codes = Some(status_codes);
        self
    }

    pub fn with_security(mut self, security: SecurityPolicy) -> Self {
        self.security = security;
        self
    }

    pub fn with_method(mut self, method: ResourceMethod) -> Self {
        self.methods.push(method);
        self
    }
}

/// Resources plus the schema definitions their responses reference
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceTable {
    #[serde(default)]
    pub definitions: BTreeMap<String, Value>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// Load a resource table from a `.yaml`/`.yml` or JSON file.
pub fn load_resources(path: &Path) -> anyhow::Result<ResourceTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read resource table '{}'", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let value: Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse resource table '{}'", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse resource table '{}'", path.display()))?
    };
    serde_json::from_value(value)
        .with_context(|| format!("invalid resource table '{}'", path.display()))
}
