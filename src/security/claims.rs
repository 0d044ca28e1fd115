use serde_json::{Map, Value};

use super::{AddressClaims, ClaimsError};

/// Claim keys of the OpenID Connect standard claims.
pub mod claim_names {
    pub const SUBJECT: &str = "sub";
    pub const NAME: &str = "name";
    pub const GIVEN_NAME: &str = "given_name";
    pub const FAMILY_NAME: &str = "family_name";
    pub const MIDDLE_NAME: &str = "middle_name";
    pub const NICKNAME: &str = "nickname";
    pub const PREFERRED_USERNAME: &str = "preferred_username";
    pub const PROFILE: &str = "profile";
    pub const PICTURE: &str = "picture";
    pub const WEBSITE: &str = "website";
    pub const EMAIL: &str = "email";
    pub const EMAIL_VERIFIED: &str = "email_verified";
    pub const GENDER: &str = "gender";
    pub const BIRTHDATE: &str = "birthdate";
    pub const ZONEINFO: &str = "zoneinfo";
    pub const LOCALE: &str = "locale";
    pub const PHONE_NUMBER: &str = "phone_number";
    pub const PHONE_NUMBER_VERIFIED: &str = "phone_number_verified";
    pub const ADDRESS: &str = "address";
    pub const UPDATED_AT: &str = "updated_at";
}

/// Access to the complete, untyped claim set.
pub trait Claims {
    fn all_claims(&self) -> &Map<String, Value>;
}

/// The `sub` claim.
pub trait OpenIdSubClaim {
    fn subject(&self) -> Option<&str>;
}

/// OpenID Connect standard claims.
///
/// See <http://openid.net/specs/openid-connect-core-1_0.html#StandardClaims>.
/// Every accessor returns `None` when the claim is absent; in particular the
/// `*_verified` claims are `None`, never `false`, when missing.
pub trait OpenIdStandardClaims: Claims + OpenIdSubClaim {
    /// Full name in displayable form
    fn name(&self) -> Option<&str>;
    fn given_name(&self) -> Option<&str>;
    fn family_name(&self) -> Option<&str>;
    fn middle_name(&self) -> Option<&str>;
    fn nickname(&self) -> Option<&str>;
    /// Shorthand name; not guaranteed to be unique
    fn preferred_username(&self) -> Option<&str>;
    /// URL of the profile page
    fn profile(&self) -> Option<&str>;
    /// URL of the profile picture
    fn picture(&self) -> Option<&str>;
    fn website(&self) -> Option<&str>;
    /// RFC 5322 addr-spec; not guaranteed to be unique
    fn email(&self) -> Option<&str>;
    fn email_verified(&self) -> Option<bool>;
    fn gender(&self) -> Option<&str>;
    /// ISO 8601 `YYYY-MM-DD` or `YYYY`
    fn birthdate(&self) -> Option<&str>;
    /// zoneinfo time zone, e.g. `Europe/Paris`
    fn zoneinfo(&self) -> Option<&str>;
    /// BCP47 language tag, e.g. `en-US`
    fn locale(&self) -> Option<&str>;
    fn phone_number(&self) -> Option<&str>;
    fn phone_number_verified(&self) -> Option<bool>;
    fn address(&self) -> Option<&AddressClaims>;
    /// Seconds since the epoch of the last profile update
    fn updated_at(&self) -> Option<i64>;
}

/// Validated [`OpenIdStandardClaims`].
///
/// Claim types are checked once in [`StandardClaims::from_claims`]. Cognito
/// user pool authorizers stringify every claim, so booleans are also accepted
/// as `"true"`/`"false"`, `updated_at` as a decimal string and `address` as a
/// JSON-encoded object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardClaims {
    all: Map<String, Value>,
    subject: Option<String>,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    middle_name: Option<String>,
    nickname: Option<String>,
    preferred_username: Option<String>,
    profile: Option<String>,
    picture: Option<String>,
    website: Option<String>,
    email: Option<String>,
    email_verified: Option<bool>,
    gender: Option<String>,
    birthdate: Option<String>,
    zoneinfo: Option<String>,
    locale: Option<String>,
    phone_number: Option<String>,
    phone_number_verified: Option<bool>,
    address: Option<AddressClaims>,
    updated_at: Option<i64>,
}

impl StandardClaims {
    pub fn from_claims(all: Map<String, Value>) -> Result<Self, ClaimsError> {
        use claim_names::*;

        Ok(Self {
            subject: string_claim(&all, SUBJECT)?,
            name: string_claim(&all, NAME)?,
            given_name: string_claim(&all, GIVEN_NAME)?,
            family_name: string_claim(&all, FAMILY_NAME)?,
            middle_name: string_claim(&all, MIDDLE_NAME)?,
            nickname: string_claim(&all, NICKNAME)?,
            preferred_username: string_claim(&all, PREFERRED_USERNAME)?,
            profile: string_claim(&all, PROFILE)?,
            picture: string_claim(&all, PICTURE)?,
            website: string_claim(&all, WEBSITE)?,
            email: string_claim(&all, EMAIL)?,
            email_verified: bool_claim(&all, EMAIL_VERIFIED)?,
            gender: string_claim(&all, GENDER)?,
            birthdate: string_claim(&all, BIRTHDATE)?,
            zoneinfo: string_claim(&all, ZONEINFO)?,
            locale: string_claim(&all, LOCALE)?,
            phone_number: string_claim(&all, PHONE_NUMBER)?,
            phone_number_verified: bool_claim(&all, PHONE_NUMBER_VERIFIED)?,
            address: address_claim(&all)?,
            updated_at: timestamp_claim(&all, UPDATED_AT)?,
            all,
        })
    }
}

impl TryFrom<Map<String, Value>> for StandardClaims {
    type Error = ClaimsError;

    fn try_from(all: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_claims(all)
    }
}

fn invalid(claim: &str, expected: &'static str) -> ClaimsError {
    ClaimsError::InvalidClaim {
        claim: claim.to_string(),
        expected,
    }
}

fn present<'a>(all: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    all.get(key).filter(|v| !v.is_null())
}

fn string_claim(all: &Map<String, Value>, key: &str) -> Result<Option<String>, ClaimsError> {
    present(all, key)
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(key, "a string"))
        })
        .transpose()
}

fn bool_claim(all: &Map<String, Value>, key: &str) -> Result<Option<bool>, ClaimsError> {
    present(all, key)
        .map(|v| match v {
            Value::Bool(b) => Ok(*b),
            Value::String(s) => s.parse::<bool>().map_err(|_| invalid(key, "a boolean")),
            _ => Err(invalid(key, "a boolean")),
        })
        .transpose()
}

fn timestamp_claim(all: &Map<String, Value>, key: &str) -> Result<Option<i64>, ClaimsError> {
    present(all, key)
        .map(|v| match v {
            Value::Number(n) => n.as_i64().ok_or_else(|| invalid(key, "an integer")),
            Value::String(s) => s.parse::<i64>().map_err(|_| invalid(key, "an integer")),
            _ => Err(invalid(key, "an integer")),
        })
        .transpose()
}

fn address_claim(all: &Map<String, Value>) -> Result<Option<AddressClaims>, ClaimsError> {
    let key = claim_names::ADDRESS;
    present(all, key)
        .map(|v| {
            let parsed = match v {
                Value::Object(_) => serde_json::from_value::<AddressClaims>(v.clone()),
                Value::String(s) => serde_json::from_str::<AddressClaims>(s),
                _ => return Err(invalid(key, "an object")),
            };
            parsed.map_err(|_| invalid(key, "an object"))
        })
        .transpose()
}

impl Claims for StandardClaims {
    fn all_claims(&self) -> &Map<String, Value> {
        &self.all
    }
}

impl OpenIdSubClaim for StandardClaims {
    fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }
}

impl OpenIdStandardClaims for StandardClaims {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn given_name(&self) -> Option<&str> {
        self.given_name.as_deref()
    }

    fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    fn preferred_username(&self) -> Option<&str> {
        self.preferred_username.as_deref()
    }

    fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }

    fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn email_verified(&self) -> Option<bool> {
        self.email_verified
    }

    fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    fn birthdate(&self) -> Option<&str> {
        self.birthdate.as_deref()
    }

    fn zoneinfo(&self) -> Option<&str> {
        self.zoneinfo.as_deref()
    }

    fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    fn phone_number_verified(&self) -> Option<bool> {
        self.phone_number_verified
    }

    fn address(&self) -> Option<&AddressClaims> {
        self.address.as_ref()
    }

    fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }
}
