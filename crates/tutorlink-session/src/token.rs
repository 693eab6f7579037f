use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token must not be empty")]
    Empty,

    #[error("token contains characters not allowed in an HTTP header")]
    InvalidCharacters,
}

/// Opaque bearer credential issued by the API.
///
/// Never empty, and safe to place in an `Authorization` header. The value is
/// redacted from `Debug` output so it cannot leak through logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(value: impl Into<String>) -> Result<Self, TokenError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TokenError::Empty);
        }
        if !value.chars().all(|c| c.is_ascii_graphic()) {
            return Err(TokenError::InvalidCharacters);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

impl TryFrom<String> for BearerToken {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BearerToken> for String {
    fn from(token: BearerToken) -> Self {
        token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_token() {
        assert_eq!(BearerToken::new(""), Err(TokenError::Empty));
        assert_eq!(BearerToken::new("   "), Err(TokenError::Empty));
    }

    #[test]
    fn test_rejects_header_breaking_characters() {
        assert_eq!(
            BearerToken::new("abc\r\nX-Evil: 1"),
            Err(TokenError::InvalidCharacters)
        );
        assert_eq!(BearerToken::new("a b"), Err(TokenError::InvalidCharacters));
    }

    #[test]
    fn test_header_value() {
        let token = BearerToken::new("eyJhbGciOi.payload.sig").unwrap();
        assert_eq!(token.header_value(), "Bearer eyJhbGciOi.payload.sig");
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = BearerToken::new("secret-token").unwrap();
        assert!(!format!("{token:?}").contains("secret-token"));
    }

    #[test]
    fn test_deserialize_validates() {
        let token: BearerToken = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(token.as_str(), "abc");
        assert!(serde_json::from_str::<BearerToken>(r#""""#).is_err());
    }
}
