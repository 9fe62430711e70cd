use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::database::surrealdb::SurrealConfig;

pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: SurrealConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body, uploads included
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_algorithm: String,
    pub access_token_expire_minutes: i64,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub allow_registration: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `*` allows any origin
    pub allowed_origins: Vec<String>,
}

/// Business details shown on the pages
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub business_name: String,
    pub whatsapp_number: String,
    pub phone: String,
    pub email: String,
    pub city: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_algorithm: "HS256".to_string(),
            access_token_expire_minutes: 1440,
            admin_email: None,
            admin_password: None,
            allow_registration: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            business_name: "Oriani Multissoluções".to_string(),
            whatsapp_number: "5519971387382".to_string(),
            phone: "(11) 99999-9999".to_string(),
            email: "contato@oriani.com.br".to_string(),
            city: "São Paulo - SP".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

impl AuthConfig {
    /// Admin email and password, when both are set and non-empty
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (self.admin_email.as_deref(), self.admin_password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        }
    }
}

impl Config {
    /// Defaults, then the TOML file when given, then the environment
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };

        dotenvy::dotenv().ok(); // Load .env file if present
        config.apply_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Load configuration from a TOML file (oriani.toml)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server configuration
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = parse_var("SERVER_PORT", &port)?;
        }
        if let Some(bytes) = lookup("MAX_UPLOAD_BYTES") {
            self.server.max_upload_bytes = parse_var("MAX_UPLOAD_BYTES", &bytes)?;
        }

        // Database configuration
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.endpoint = url;
        }
        if let Some(namespace) = lookup("DB_NAMESPACE") {
            self.database.namespace = namespace;
        }
        if let Some(name) = lookup("DB_NAME") {
            self.database.database = name;
        }
        if let Some(user) = lookup("DB_USER") {
            self.database.username = Some(user);
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            self.database.password = Some(password);
        }

        // Auth configuration
        if let Some(secret) = lookup("JWT_SECRET_KEY") {
            self.auth.jwt_secret = secret;
        }
        if let Some(algorithm) = lookup("JWT_ALGORITHM") {
            self.auth.jwt_algorithm = algorithm;
        }
        if let Some(minutes) = lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            self.auth.access_token_expire_minutes =
                parse_var("ACCESS_TOKEN_EXPIRE_MINUTES", &minutes)?;
        }
        if let Some(email) = lookup("ADMIN_EMAIL") {
            self.auth.admin_email = Some(email);
        }
        if let Some(password) = lookup("ADMIN_PASSWORD") {
            self.auth.admin_password = Some(password);
        }
        if let Some(allow) = lookup("ALLOW_REGISTRATION") {
            self.auth.allow_registration = parse_var("ALLOW_REGISTRATION", &allow)?;
        }

        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.cors.allowed_origins = origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
        }

        if let Some(number) = lookup("WHATSAPP_NUMBER") {
            self.site.whatsapp_number = number;
        }

        // Logging configuration
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = match format.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                other => anyhow::bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other),
            };
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.auth.jwt_secret == DEFAULT_JWT_SECRET {
            anyhow::bail!("JWT secret must be changed from default value");
        }

        if !matches!(self.auth.jwt_algorithm.as_str(), "HS256" | "HS384" | "HS512") {
            anyhow::bail!("Unsupported JWT algorithm: {}", self.auth.jwt_algorithm);
        }

        if self.auth.access_token_expire_minutes <= 0 {
            anyhow::bail!("Access token expiry must be positive");
        }

        if self.site.whatsapp_number.is_empty()
            || !self.site.whatsapp_number.chars().all(|c| c.is_ascii_digit())
        {
            anyhow::bail!("WhatsApp number must contain digits only");
        }

        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {} ({})", key, value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.auth.jwt_secret = "a-long-enough-test-secret".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.site.whatsapp_number, "5519971387382");
        assert_eq!(config.database.endpoint, "mem://");
        assert!(config.cors.allows_any_origin());
        assert!(config.auth.admin_credentials().is_none());
        assert!(!config.auth.allow_registration);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SERVER_PORT", "9000"),
            ("DATABASE_URL", "ws://localhost:8000"),
            ("ADMIN_EMAIL", "admin@oriani.com.br"),
            ("ADMIN_PASSWORD", "segredo123"),
            ("ALLOW_REGISTRATION", "true"),
            ("CORS_ORIGINS", "https://oriani.com.br, http://localhost:3000"),
            ("LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.endpoint, "ws://localhost:8000");
        assert_eq!(
            config.auth.admin_credentials(),
            Some(("admin@oriani.com.br", "segredo123"))
        );
        assert!(config.auth.allow_registration);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://oriani.com.br", "http://localhost:3000"]
        );
        assert!(!config.cors.allows_any_origin());
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_env_value_is_an_error() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == "SERVER_PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn test_validate() {
        assert!(valid_config().validate().is_ok());
        assert!(Config::default().validate().is_err());

        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.auth.jwt_algorithm = "RS256".to_string();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.auth.access_token_expire_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_admin_password_is_not_configured() {
        let mut config = Config::default();
        config.auth.admin_email = Some("admin@oriani.com.br".to_string());
        config.auth.admin_password = Some(String::new());
        assert!(config.auth.admin_credentials().is_none());
    }

    #[tokio::test]
    async fn test_from_file_with_partial_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[site]
city = "Campinas - SP"

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.site.city, "Campinas - SP");
        assert_eq!(config.site.whatsapp_number, "5519971387382");
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
