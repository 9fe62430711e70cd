use serde::{Deserialize, Serialize};

/// Email/password pair used by both login and registration
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Token handed out on successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
}

impl AuthToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// The authenticated account behind a request
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_serializes_with_bearer_type() {
        let token = AuthToken::bearer("abc".to_string());
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
    }
}
