pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;

pub use jwt::{Claims, JwtManager};
pub use middleware::{AdminSession, AuthExtractor, ACCESS_TOKEN_COOKIE};
pub use models::{AuthContext, AuthToken, Credentials};
pub use service::AuthService;
