//! Access token issuing and validation
//!
//! Both services share one HS256 secret: the auth service signs tokens at
//! login and the API service validates them on every protected request.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    get_current_timestamp,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TokenError;
use crate::settings;

/// Token configuration
#[derive(Clone, Deserialize)]
pub struct TokenConfig {
    /// Shared signing secret
    #[serde(rename = "jwt_secret_key")]
    pub secret: String,
    /// Access token expiration time in seconds (default: 1 day)
    #[serde(rename = "jwt_access_token_expiry")]
    pub access_token_expiry: u64,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}

impl TokenConfig {
    /// Create a new TokenConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET_KEY`: signing secret (required)
    /// - `JWT_ACCESS_TOKEN_EXPIRY`: access token expiry in seconds (default: 86400)
    pub fn from_env() -> Result<Self, TokenError> {
        let config: Self = settings::from_env(&[("jwt_access_token_expiry", "86400")])
            .map_err(|e| TokenError::Configuration(e.to_string()))?;

        if config.secret.is_empty() {
            return Err(TokenError::Configuration(
                "JWT_SECRET_KEY must not be empty".to_string(),
            ));
        }

        Ok(config)
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Username at the time of login
    pub username: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Token service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: TokenConfig,
}

impl TokenService {
    /// Initialize a new token service
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        TokenService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Issue an access token for a user
    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String, TokenError> {
        let now = get_current_timestamp();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            iat: now,
            exp: now + self.config.access_token_expiry,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Get the access token expiry time
    pub fn access_token_expiry(&self) -> u64 {
        self.config.access_token_expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn service(secret: &str) -> TokenService {
        TokenService::new(TokenConfig {
            secret: secret.to_string(),
            access_token_expiry: 600,
        })
    }

    #[test]
    fn test_issued_token_verifies() {
        let tokens = service("test-secret");
        let user_id = Uuid::new_v4();

        let token = tokens.issue(user_id, "alice").unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, 600);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = service("one-secret").issue(Uuid::new_v4(), "bob").unwrap();
        assert!(service("another-secret").verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service("test-secret");
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: "carol".to_string(),
            iat: 1_000,
            exp: 2_000,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(service("test-secret").verify("not-a-token").is_err());
    }

    #[test]
    #[serial]
    fn test_token_config_requires_secret() {
        unsafe {
            std::env::remove_var("JWT_SECRET_KEY");
        }
        assert!(TokenConfig::from_env().is_err());

        unsafe {
            std::env::set_var("JWT_SECRET_KEY", "s3cret");
        }
        let config = TokenConfig::from_env().unwrap();
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.access_token_expiry, 86400);

        unsafe {
            std::env::remove_var("JWT_SECRET_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_numeric_looking_secret_is_kept_verbatim() {
        unsafe {
            std::env::set_var("JWT_SECRET_KEY", "007");
            std::env::set_var("JWT_ACCESS_TOKEN_EXPIRY", "120");
        }

        let config = TokenConfig::from_env().unwrap();
        assert_eq!(config.secret, "007");
        assert_eq!(config.access_token_expiry, 120);

        unsafe {
            std::env::set_var("JWT_SECRET_KEY", "1.0");
        }
        assert_eq!(TokenConfig::from_env().unwrap().secret, "1.0");

        unsafe {
            std::env::remove_var("JWT_SECRET_KEY");
            std::env::remove_var("JWT_ACCESS_TOKEN_EXPIRY");
        }
    }
}
