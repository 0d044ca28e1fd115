use serde::{Deserialize, Serialize};

/// OpenID `address` claim members (OIDC Core, section 5.1.1).
pub trait OpenIdAddressClaims {
    /// Full mailing address, formatted for display
    fn formatted(&self) -> Option<&str>;
    fn street_address(&self) -> Option<&str>;
    /// City or locality
    fn locality(&self) -> Option<&str>;
    /// State, province, prefecture, or region
    fn region(&self) -> Option<&str>;
    fn postal_code(&self) -> Option<&str>;
    fn country(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressClaims {
    formatted: Option<String>,
    street_address: Option<String>,
    locality: Option<String>,
    region: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
}

impl OpenIdAddressClaims for AddressClaims {
    fn formatted(&self) -> Option<&str> {
        self.formatted.as_deref()
    }

    fn street_address(&self) -> Option<&str> {
        self.street_address.as_deref()
    }

    fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}
