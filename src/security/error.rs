use std::fmt;

/// Claim set rejected while building typed claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    /// A claim is present but holds a value of the wrong JSON type
    InvalidClaim {
        /// Claim key, e.g. `email_verified`
        claim: String,
        /// Expected type description
        expected: &'static str,
    },
}

impl fmt::Display for ClaimsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimsError::InvalidClaim { claim, expected } => {
                write!(f, "claim '{claim}' must be {expected}")
            }
        }
    }
}

impl std::error::Error for ClaimsError {}
