use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::connection::{SurrealConnectionError, SurrealResult};

/// SurrealDB 连接协议
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SurrealProtocol {
    /// 内嵌内存引擎
    Memory,
    /// WebSocket 连接
    WebSocket,
    /// HTTP 连接
    Http,
}

/// SurrealDB 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurrealConfig {
    /// 连接地址
    /// - Memory: "mem://"
    /// - WebSocket: "ws://host:port"
    /// - HTTP: "http://host:port"
    pub endpoint: String,

    pub namespace: String,

    pub database: String,

    /// 远程服务器的 root 用户
    pub username: Option<String>,

    pub password: Option<String>,

    /// 启动时定义表和索引
    pub run_initialization: bool,

    pub retry: RetryConfig,
}

/// 连接重试策略
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: usize,

    pub initial_interval_ms: u64,

    pub multiplier: f64,

    pub max_interval_ms: u64,

    pub exponential_backoff: bool,
}

impl Default for SurrealConfig {
    fn default() -> Self {
        Self {
            endpoint: "mem://".to_string(),
            namespace: "oriani".to_string(),
            database: "oriani_db".to_string(),
            username: None,
            password: None,
            run_initialization: true,
            retry: RetryConfig::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_interval_ms: 1000,
            multiplier: 2.0,
            max_interval_ms: 30000,
            exponential_backoff: true,
        }
    }
}

impl SurrealConfig {
    /// In-memory database, used by tests and `oriani serve` without a server
    pub fn memory() -> Self {
        Self {
            retry: RetryConfig {
                max_attempts: 1,
                ..RetryConfig::default()
            },
            ..Self::default()
        }
    }

    /// Protocol implied by the endpoint scheme
    pub fn protocol(&self) -> SurrealResult<SurrealProtocol> {
        Self::detect_protocol(&self.endpoint)
    }

    fn detect_protocol(endpoint: &str) -> SurrealResult<SurrealProtocol> {
        if endpoint.starts_with("mem://") {
            Ok(SurrealProtocol::Memory)
        } else if endpoint.starts_with("ws://") || endpoint.starts_with("wss://") {
            Ok(SurrealProtocol::WebSocket)
        } else if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            Ok(SurrealProtocol::Http)
        } else {
            Err(SurrealConnectionError::Config(format!(
                "Unsupported SurrealDB endpoint: {}",
                endpoint
            )))
        }
    }

    pub fn initial_retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry.initial_interval_ms)
    }

    pub fn max_retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry.max_interval_ms)
    }

    /// Remote engines with configured credentials sign in as root
    pub fn requires_auth(&self) -> bool {
        matches!(
            self.protocol(),
            Ok(SurrealProtocol::WebSocket) | Ok(SurrealProtocol::Http)
        ) && (self.username.is_some() || self.password.is_some())
    }

    /// 第 N 次失败后的等待时间（从 1 开始）
    pub fn retry_interval(&self, attempt: usize) -> Duration {
        let initial = self.initial_retry_interval();
        if !self.retry.exponential_backoff || attempt <= 1 {
            return initial.min(self.max_retry_interval());
        }

        let factor = self.retry.multiplier.powi((attempt - 1) as i32);
        let millis = (initial.as_millis() as f64 * factor) as u64;
        Duration::from_millis(millis).min(self.max_retry_interval())
    }
}
