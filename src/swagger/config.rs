use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::SwaggerConfigError;

/// Environment variable holding the path of the Swagger configuration file.
pub const CONFIGURATION_ENV: &str = "AWS_SWAGGER_CONFIGURATION";

/// How API Gateway authenticates callers of restricted operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// No API Gateway level authentication
    #[default]
    None,
    /// AWS Signature Version 4 (IAM)
    Iam,
    /// A Lambda or Cognito authorizer
    Authorizer,
}

/// Kind of API Gateway authorizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizerType {
    #[default]
    Token,
    Request,
    CognitoUserPools,
}

/// Authorizer referenced by restricted operations when `authType` is `authorizer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuthorizerConfig {
    /// Security definition name
    pub name: String,
    #[serde(rename = "type", default)]
    pub authorizer_type: AuthorizerType,
    /// Header carrying the credentials
    #[serde(default = "default_identity_header")]
    pub identity_header: String,
    /// Lambda authorizer invocation URI
    #[serde(default)]
    pub uri: Option<String>,
    /// Role API Gateway assumes to invoke the authorizer
    #[serde(default)]
    pub credentials: Option<String>,
    #[serde(default)]
    pub result_ttl_in_seconds: Option<u32>,
    /// Cognito user pool ARNs
    #[serde(default)]
    pub provider_arns: Vec<String>,
}

fn default_identity_header() -> String {
    "Authorization".to_string()
}

/// Configuration of [`AwsSwaggerReader`](super::AwsSwaggerReader).
///
/// ```json
/// {
///   "defaultCorsEnabled": true,
///   "corsHeaders": { "Access-Control-Allow-Origin": "*" },
///   "defaultStatusCode": 200,
///   "additionalStatusCodes": [500],
///   "authType": "authorizer",
///   "authorizer": { "name": "jwt", "uri": "arn:aws:apigateway:..." },
///   "lambdaUri": "arn:aws:apigateway:eu-central-1:lambda:path/..."
/// }
/// ```
///
/// Every key is optional; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AwsSwaggerConfiguration {
    #[serde(default = "default_true")]
    pub default_cors_enabled: bool,
    /// CORS response header name to its value
    #[serde(default = "default_cors_headers")]
    pub cors_headers: BTreeMap<String, String>,
    #[serde(default = "default_status_code")]
    pub default_status_code: u16,
    #[serde(default)]
    pub additional_status_codes: Vec<u16>,
    #[serde(default)]
    pub auth_type: AuthType,
    #[serde(default)]
    pub authorizer: Option<AuthorizerConfig>,
    /// Lambda invocation URI for `x-amazon-apigateway-integration`
    #[serde(default)]
    pub lambda_uri: Option<String>,
    /// Role API Gateway assumes to invoke the Lambda function
    #[serde(default)]
    pub lambda_credential: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_status_code() -> u16 {
    200
}

fn default_cors_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Access-Control-Allow-Origin".to_string(), "*".to_string())])
}

impl Default for AwsSwaggerConfiguration {
    fn default() -> Self {
        Self {
            default_cors_enabled: true,
            cors_headers: default_cors_headers(),
            default_status_code: default_status_code(),
            additional_status_codes: Vec::new(),
            auth_type: AuthType::None,
            authorizer: None,
            lambda_uri: None,
            lambda_credential: None,
        }
    }
}

impl AwsSwaggerConfiguration {
    /// Load the file named by [`CONFIGURATION_ENV`].
    pub fn from_env() -> Result<Self, SwaggerConfigError> {
        let location = std::env::var_os(CONFIGURATION_ENV).ok_or(
            SwaggerConfigError::MissingLocation {
                variable: CONFIGURATION_ENV,
            },
        )?;
        Self::load(Path::new(&location))
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, SwaggerConfigError> {
        if !path.is_file() {
            return Err(SwaggerConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| SwaggerConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&content).map_err(|source| SwaggerConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        debug!(path = %path.display(), auth_type = ?config.auth_type, "loaded swagger configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SwaggerConfigError> {
        let invalid = |reason: String| Err(SwaggerConfigError::Invalid { reason });

        for code in std::iter::once(&self.default_status_code).chain(&self.additional_status_codes) {
            if !(100..=599).contains(code) {
                return invalid(format!("status code {code} is outside 100..=599"));
            }
        }
        for name in self.cors_headers.keys() {
            if http::HeaderName::from_bytes(name.as_bytes()).is_err() {
                return invalid(format!("'{name}' is not a valid CORS header name"));
            }
        }
        match (&self.auth_type, &self.authorizer) {
            (AuthType::Authorizer, None) => {
                return invalid("authType 'authorizer' requires an 'authorizer' block".to_string())
            }
            (_, Some(authorizer)) if authorizer.name.trim().is_empty() => {
                return invalid("authorizer name must not be empty".to_string())
            }
            _ => {}
        }
        Ok(())
    }
}
