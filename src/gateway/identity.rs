use aws_lambda_events::apigw::ApiGatewayRequestIdentity;
use serde::{Deserialize, Serialize};

/// The `requestContext.identity` block API Gateway attaches to proxied events.
pub trait GatewayIdentity {
    fn cognito_identity_pool_id(&self) -> Option<&str>;
    fn account_id(&self) -> Option<&str>;
    fn cognito_identity_id(&self) -> Option<&str>;
    fn caller(&self) -> Option<&str>;
    fn api_key(&self) -> Option<&str>;
    fn source_ip(&self) -> Option<&str>;
    fn access_key(&self) -> Option<&str>;
    fn cognito_authentication_type(&self) -> Option<&str>;
    fn cognito_authentication_provider(&self) -> Option<&str>;
    fn user_arn(&self) -> Option<&str>;
    fn user_agent(&self) -> Option<&str>;
    fn user(&self) -> Option<&str>;
}

/// Deserializable [`GatewayIdentity`]; every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultGatewayIdentity {
    cognito_identity_pool_id: Option<String>,
    account_id: Option<String>,
    cognito_identity_id: Option<String>,
    caller: Option<String>,
    api_key: Option<String>,
    source_ip: Option<String>,
    access_key: Option<String>,
    cognito_authentication_type: Option<String>,
    cognito_authentication_provider: Option<String>,
    user_arn: Option<String>,
    user_agent: Option<String>,
    user: Option<String>,
}

impl DefaultGatewayIdentity {
    pub fn builder() -> DefaultGatewayIdentityBuilder {
        DefaultGatewayIdentityBuilder::default()
    }
}

impl From<&ApiGatewayRequestIdentity> for DefaultGatewayIdentity {
    fn from(identity: &ApiGatewayRequestIdentity) -> Self {
        Self {
            cognito_identity_pool_id: identity.cognito_identity_pool_id.clone(),
            account_id: identity.account_id.clone(),
            cognito_identity_id: identity.cognito_identity_id.clone(),
            caller: identity.caller.clone(),
            api_key: identity.api_key.clone(),
            source_ip: identity.source_ip.clone(),
            access_key: identity.access_key.clone(),
            cognito_authentication_type: identity.cognito_authentication_type.clone(),
            cognito_authentication_provider: identity.cognito_authentication_provider.clone(),
            user_arn: identity.user_arn.clone(),
            user_agent: identity.user_agent.clone(),
            user: identity.user.clone(),
        }
    }
}

macro_rules! identity_accessors {
    ($($field:ident),* $(,)?) => {
        impl GatewayIdentity for DefaultGatewayIdentity {
            $(
                fn $field(&self) -> Option<&str> {
                    self.$field.as_deref()
                }
            )*
        }

        /// Builds a [`DefaultGatewayIdentity`] field by field.
        #[derive(Debug, Default)]
        pub struct DefaultGatewayIdentityBuilder {
            identity: DefaultGatewayIdentity,
        }

        impl DefaultGatewayIdentityBuilder {
            $(
                pub fn $field(mut self, value: impl Into<String>) -> Self {
                    self.identity.$field = Some(value.into());
                    self
                }
            )*

            pub fn build(self) -> DefaultGatewayIdentity {
                self.identity
            }
        }
    };
}

identity_accessors!(
    cognito_identity_pool_id,
    account_id,
    cognito_identity_id,
    caller,
    api_key,
    source_ip,
    access_key,
    cognito_authentication_type,
    cognito_authentication_provider,
    user_arn,
    user_agent,
    user,
);
