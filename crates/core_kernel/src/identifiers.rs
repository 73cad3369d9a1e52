//! Strongly-typed identifiers for domain entities
//!
//! Schemes are identified by the numeric code assigned by the upstream
//! registry (e.g. `119551`). Wrapping the code keeps it from being mixed up
//! with arbitrary strings at API and adapter boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Maximum length of a scheme code accepted from callers
const MAX_SCHEME_CODE_LEN: usize = 12;

/// Identifier of a mutual fund scheme
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemeCode(String);

impl SchemeCode {
    /// Creates a scheme code after validating it
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the code is empty, too long, or
    /// contains anything other than ASCII digits.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        let trimmed = code.trim();

        if trimmed.is_empty() {
            return Err(CoreError::validation("Scheme code must not be empty"));
        }
        if trimmed.len() > MAX_SCHEME_CODE_LEN {
            return Err(CoreError::validation(format!(
                "Scheme code must be at most {} digits, got {}",
                MAX_SCHEME_CODE_LEN,
                trimmed.len()
            )));
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::validation(format!(
                "Scheme code must be numeric: {}",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SchemeCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SchemeCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SchemeCode> for String {
    fn from(code: SchemeCode) -> String {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_code_display() {
        let code = SchemeCode::new("119551").unwrap();
        assert_eq!(code.to_string(), "119551");
    }

    #[test]
    fn test_scheme_code_trims_whitespace() {
        let code: SchemeCode = " 120503 ".parse().unwrap();
        assert_eq!(code.as_str(), "120503");
    }

    #[test]
    fn test_scheme_code_rejects_invalid() {
        assert!(SchemeCode::new("").is_err());
        assert!(SchemeCode::new("12a45").is_err());
        assert!(SchemeCode::new("1234567890123").is_err());
    }

    #[test]
    fn test_scheme_code_serde_roundtrip() {
        let code = SchemeCode::new("100027").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"100027\"");

        let invalid: Result<SchemeCode, _> = serde_json::from_str("\"abc\"");
        assert!(invalid.is_err());
    }
}
