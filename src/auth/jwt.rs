use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AuthConfig;
use crate::error::{GalleryError, Result};

pub const MIN_SECRET_LENGTH: usize = 16;
pub const ISSUER: &str = "oriani";

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Account email
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// Signs and checks access tokens
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    issuer: String,
    access_token_duration: Duration,
}

impl JwtManager {
    pub fn new(secret: &str, algorithm: &str, issuer: &str, expire_minutes: i64) -> Result<Self> {
        Self::validate_secret_strength(secret)?;
        let algorithm = Self::parse_algorithm(algorithm)?;

        if expire_minutes <= 0 {
            return Err(GalleryError::config("Access token expiry must be positive"));
        }

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 30;
        validation.validate_exp = true;
        validation.validate_aud = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            header: Header::new(algorithm),
            validation,
            issuer: issuer.to_string(),
            access_token_duration: Duration::minutes(expire_minutes),
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        Self::new(
            &config.jwt_secret,
            &config.jwt_algorithm,
            ISSUER,
            config.access_token_expire_minutes,
        )
    }

    fn validate_secret_strength(secret: &str) -> Result<()> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(GalleryError::config(format!(
                "JWT secret must be at least {} characters long. Current length: {}",
                MIN_SECRET_LENGTH,
                secret.len()
            )));
        }
        Ok(())
    }

    fn parse_algorithm(name: &str) -> Result<Algorithm> {
        match name {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(GalleryError::config(format!(
                "Unsupported JWT algorithm: {}",
                other
            ))),
        }
    }

    /// Issue an access token for the given account email
    pub fn generate_access_token(&self, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.access_token_duration).timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| GalleryError::internal(format!("JWT encoding error: {}", e)))
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Rejected token: {}", e);
                GalleryError::authentication("Could not validate credentials")
            })?;

        Ok(token_data.claims)
    }

    /// Access token lifetime in seconds
    pub fn access_token_duration_secs(&self) -> i64 {
        self.access_token_duration.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-0123456789";

    fn manager() -> JwtManager {
        JwtManager::new(SECRET, "HS256", ISSUER, 30).unwrap()
    }

    #[test]
    fn test_token_round_trip_claims() {
        let manager = manager();
        let token = manager.generate_access_token("admin@oriani.com.br").unwrap();

        let claims = manager.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, "admin@oriani.com.br");
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_rejects_short_secret_and_unknown_algorithm() {
        assert!(JwtManager::new("short", "HS256", ISSUER, 30).is_err());
        assert!(JwtManager::new(SECRET, "RS256", ISSUER, 30).is_err());
        assert!(JwtManager::new(SECRET, "HS256", ISSUER, 0).is_err());
    }

    #[test]
    fn test_rejects_foreign_tokens() {
        let manager = manager();
        let other = JwtManager::new("another-secret-9876543210", "HS256", ISSUER, 30).unwrap();
        let other_issuer = JwtManager::new(SECRET, "HS256", "someone-else", 30).unwrap();

        let token = other.generate_access_token("a@b.com").unwrap();
        assert!(manager.validate_access_token(&token).is_err());

        let token = other_issuer.generate_access_token("a@b.com").unwrap();
        assert!(manager.validate_access_token(&token).is_err());

        assert!(manager.validate_access_token("not-a-token").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let manager = manager();
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "a@b.com".to_string(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(5)).timestamp(),
            iss: ISSUER.to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = manager.validate_access_token(&token).unwrap_err();
        assert!(matches!(err, GalleryError::Authentication(_)));
    }

    #[test]
    fn test_hs512_tokens() {
        let manager = JwtManager::new(SECRET, "HS512", ISSUER, 5).unwrap();
        let token = manager.generate_access_token("a@b.com").unwrap();
        assert_eq!(manager.validate_access_token(&token).unwrap().sub, "a@b.com");
        assert_eq!(manager.access_token_duration_secs(), 300);
    }
}
