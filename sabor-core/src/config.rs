//! 应用配置
//!
//! JSON 文件配置 + 环境变量覆盖。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sabor_client::{ClientConfig, RetryPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// 应用配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | SABOR_API_URL | http://localhost:3000 | 菜单 API 地址 |
/// | SABOR_DATA_DIR | ./data | 数据目录 (菜单缓存) |
/// | SABOR_REQUEST_TIMEOUT | 30 | 请求超时 (秒) |
/// | SABOR_RETRY_ATTEMPTS | 3 | 菜单拉取最大尝试次数 |
/// | SABOR_RETRY_BASE_DELAY_MS | 1000 | 首次重试等待 (毫秒, 之后翻倍) |
/// | SABOR_INLINE_IMAGE_MAX_BYTES | 262144 | 内联图片上限 (解码后字节) |
/// | SABOR_DEFAULT_CONTACT | 5511999999999 | 默认服务员电话 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录, 未设置则输出到 stdout |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub data_dir: PathBuf,
    /// 秒
    pub request_timeout: u64,
    pub retry_attempts: u32,
    pub retry_base_delay_ms: u64,
    /// Cap on images embedded as `data:` URIs, in raw (decoded) bytes
    pub inline_image_max_bytes: usize,
    /// Phone used when the chosen waiter has no contact of their own
    pub default_contact: String,
    /// Waiter name -> phone
    pub waiters: BTreeMap<String, String>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_INLINE_IMAGE_MAX_BYTES: usize = 256 * 1024;
pub const DEFAULT_CONTACT: &str = "5511999999999";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from("./data"),
            request_timeout: 30,
            retry_attempts: sabor_client::retry::DEFAULT_MAX_ATTEMPTS,
            retry_base_delay_ms: 1000,
            inline_image_max_bytes: DEFAULT_INLINE_IMAGE_MAX_BYTES,
            default_contact: DEFAULT_CONTACT.to_string(),
            waiters: BTreeMap::new(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparsable environment variable");
            None
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置, 未设置的项使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Overlay whichever environment variables are set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("SABOR_API_URL") {
            self.api_url = url;
        }
        if let Ok(dir) = std::env::var("SABOR_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(timeout) = env_parse("SABOR_REQUEST_TIMEOUT") {
            self.request_timeout = timeout;
        }
        if let Some(attempts) = env_parse("SABOR_RETRY_ATTEMPTS") {
            self.retry_attempts = attempts;
        }
        if let Some(delay) = env_parse("SABOR_RETRY_BASE_DELAY_MS") {
            self.retry_base_delay_ms = delay;
        }
        if let Some(max) = env_parse("SABOR_INLINE_IMAGE_MAX_BYTES") {
            self.inline_image_max_bytes = max;
        }
        if let Ok(contact) = std::env::var("SABOR_DEFAULT_CONTACT") {
            self.default_contact = contact;
        }
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.log_level = level;
        }
        if let Ok(dir) = std::env::var("LOG_DIR") {
            self.log_dir = Some(dir);
        }
        self
    }

    /// 从文件加载配置, 文件不存在时返回默认值
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone()).with_timeout(self.request_timeout)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
        )
    }
}
