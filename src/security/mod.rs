//! # Security Module
//!
//! OpenID Connect claims carried by API Gateway authorizers.
//!
//! ## Overview
//!
//! The claim traits mirror the layering of the OpenID Connect specification:
//!
//! - [`Claims`] - the raw claim set
//! - [`OpenIdSubClaim`] - the subject (`sub`)
//! - [`OpenIdStandardClaims`] - the standard profile claims
//! - [`OpenIdAddressClaims`] - members of the `address` claim
//!
//! [`StandardClaims`] implements all of them. Claim types are validated once,
//! when the claims are built, so accessors never fail:
//!
//! ```
//! use restgate::security::{OpenIdStandardClaims, StandardClaims};
//! use serde_json::json;
//!
//! let map = json!({"sub": "248289761001", "email": "a@b.com"});
//! let claims = StandardClaims::from_claims(map.as_object().cloned().unwrap_or_default())?;
//! assert_eq!(claims.email(), Some("a@b.com"));
//! assert_eq!(claims.email_verified(), None);
//! # Ok::<(), restgate::security::ClaimsError>(())
//! ```

mod address;
mod claims;
mod error;

pub use address::{AddressClaims, OpenIdAddressClaims};
pub use claims::{claim_names, Claims, OpenIdStandardClaims, OpenIdSubClaim, StandardClaims};
pub use error::ClaimsError;
