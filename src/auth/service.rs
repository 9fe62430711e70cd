use std::sync::Arc;
use tracing::{info, warn};

use super::jwt::JwtManager;
use super::models::{AuthContext, AuthToken, Credentials};
use super::password::{hash_password, verify_password};
use crate::config::AuthConfig;
use crate::database::{DatabaseError, UserRepository};
use crate::error::{GalleryError, Result};
use crate::validation::InputValidator;

const INVALID_LOGIN: &str = "Incorrect email or password";
const INVALID_TOKEN: &str = "Could not validate credentials";

/// Login, registration and token checks
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    jwt: Arc<JwtManager>,
    config: Arc<AuthConfig>,
}

impl AuthService {
    pub fn new(users: UserRepository, jwt: Arc<JwtManager>, config: AuthConfig) -> Self {
        Self {
            users,
            jwt,
            config: Arc::new(config),
        }
    }

    pub fn jwt(&self) -> &JwtManager {
        &self.jwt
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken> {
        let Some((admin_email, admin_password)) = self.config.admin_credentials() else {
            return Err(GalleryError::config("Admin credentials not configured"));
        };

        let email = normalize_email(&credentials.email);

        // The admin account is governed by configuration alone
        if email == normalize_email(admin_email) {
            if credentials.password != admin_password {
                warn!("Failed admin login attempt for {}", email);
                return Err(GalleryError::authentication(INVALID_LOGIN));
            }
            self.ensure_user(&email, admin_password).await?;
            info!("Admin logged in: {}", email);
            return self.issue(&email);
        }

        let verified = match self.users.find_by_email(&email).await? {
            Some(user) => verify_password(&credentials.password, &user.password_hash).await,
            None => false,
        };

        if !verified {
            warn!("Failed login attempt for {}", email);
            return Err(GalleryError::authentication(INVALID_LOGIN));
        }

        info!("User logged in: {}", email);
        self.issue(&email)
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<AuthToken> {
        if !self.config.allow_registration {
            return Err(GalleryError::forbidden("Registration is disabled"));
        }

        let email = InputValidator::validate_email(&credentials.email)?;
        InputValidator::validate_password(&credentials.password)?;

        let hash = hash_password(&credentials.password).await?;
        match self.users.create(&email, &hash).await {
            Ok(_) => {
                info!("Registered user: {}", email);
                self.issue(&email)
            }
            Err(DatabaseError::Duplicate) => {
                Err(GalleryError::conflict("Email already registered"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a bearer token to the account it was issued for
    pub async fn authenticate(&self, token: &str) -> Result<AuthContext> {
        let claims = self.jwt.validate_access_token(token)?;

        match self.users.find_by_email(&claims.sub).await? {
            Some(user) => Ok(AuthContext { email: user.email }),
            None => {
                warn!("Token for unknown account {}", claims.sub);
                Err(GalleryError::authentication(INVALID_TOKEN))
            }
        }
    }

    /// Keep the stored admin account in step with the configured password
    async fn ensure_user(&self, email: &str, password: &str) -> Result<()> {
        if let Some(user) = self.users.find_by_email(email).await? {
            if !verify_password(password, &user.password_hash).await {
                let hash = hash_password(password).await?;
                self.users.update_password(&user.id, &hash).await?;
                info!("Refreshed stored password for {}", email);
            }
            return Ok(());
        }

        let hash = hash_password(password).await?;
        match self.users.create(email, &hash).await {
            // Another request created it first
            Ok(_) | Err(DatabaseError::Duplicate) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn issue(&self, email: &str) -> Result<AuthToken> {
        let token = self.jwt.generate_access_token(email)?;
        Ok(AuthToken::bearer(token))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
