//! JWT identity tokens using HS256.
//!
//! Tokens are issued by the external authentication service and carry the
//! caller's id, email and role. This module validates them; token generation
//! exists for tooling and tests that need to mint a caller identity.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Role carried by an identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Student => write!(f, "student"),
        }
    }
}

/// JWT token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin or student ID)
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Configuration for JWT token validation.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Lifetime of tokens minted by [`JwtConfig::generate_token`] (7 days).
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 7 * 24 * 3600;

impl JwtConfig {
    /// Creates a new JwtConfig from a shared secret.
    pub fn new(secret: &str) -> Result<Self, JwtError> {
        Self::with_leeway(secret, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a new JwtConfig from a shared secret with custom leeway.
    pub fn with_leeway(secret: &str, leeway_secs: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidKey("JWT secret must not be empty".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway_secs,
        })
    }

    /// Generates a token for the given identity.
    pub fn generate_token(
        &self,
        subject: Uuid,
        email: &str,
        role: Role,
        expiry_secs: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            role,
            exp: (now + Duration::seconds(expiry_secs)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

/// Extracts the subject ID from validated claims.
pub fn extract_subject_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> JwtConfig {
        JwtConfig::with_leeway("test_secret_key_for_jwt_testing_12345", 0).unwrap()
    }

    #[test]
    fn test_generate_and_validate_admin_token() {
        let config = create_test_config();
        let admin_id = Uuid::new_v4();

        let token = config
            .generate_token(admin_id, "admin@school.test", Role::Admin, 3600)
            .unwrap();
        let claims = config.validate_token(&token).unwrap();

        assert_eq!(claims.sub, admin_id.to_string());
        assert_eq!(claims.email, "admin@school.test");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(extract_subject_id(&claims).unwrap(), admin_id);
    }

    #[test]
    fn test_student_role_round_trips() {
        let config = create_test_config();
        let token = config
            .generate_token(Uuid::new_v4(), "kid@school.test", Role::Student, 3600)
            .unwrap();

        let claims = config.validate_token(&token).unwrap();
        assert_eq!(claims.role, Role::Student);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = create_test_config();
        let token = config
            .generate_token(Uuid::new_v4(), "a@b.test", Role::Admin, -120)
            .unwrap();

        let result = config.validate_token(&token);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let config = create_test_config();
        let other = JwtConfig::new("a_completely_different_secret").unwrap();
        let token = other
            .generate_token(Uuid::new_v4(), "a@b.test", Role::Admin, 3600)
            .unwrap();

        let result = config.validate_token(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let config = create_test_config();
        assert!(config.validate_token("not.a.jwt").is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(JwtConfig::new(""), Err(JwtError::InvalidKey(_))));
    }

    #[test]
    fn test_extract_subject_id_invalid() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            email: String::new(),
            role: Role::Student,
            exp: 0,
            iat: 0,
        };
        assert!(extract_subject_id(&claims).is_err());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = create_test_config();
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test_secret_key"));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Student.to_string(), "student");
    }
}
