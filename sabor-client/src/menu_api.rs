//! Typed access to the remote menu API
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/menu | GET | 完整菜单文档 |
//! | /api/menu | PUT | 整体替换菜单文档 |
//! | /api/upload | POST | 上传图片 (multipart, 字段 `image`) |
//! | /health | GET | 存活探测 |

use shared::Menu;
use shared::client::UploadResponse;

use crate::client::{FileUpload, HttpClient};
use crate::{ClientResult, RetryPolicy};

pub const MENU_PATH: &str = "/api/menu";
pub const UPLOAD_PATH: &str = "/api/upload";
pub const HEALTH_PATH: &str = "/health";

/// Multipart field name expected by the upload endpoint
pub const UPLOAD_FIELD: &str = "image";

/// Menu API client over any `HttpClient` transport
#[derive(Debug, Clone)]
pub struct MenuApi<C: HttpClient> {
    http: C,
    retry: RetryPolicy,
}

impl<C: HttpClient> MenuApi<C> {
    pub fn new(http: C) -> Self {
        Self {
            http,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy used by `fetch_menu`
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// `GET /api/menu`, retried on gateway-class failures
    pub async fn fetch_menu(&self) -> ClientResult<Menu> {
        self.retry
            .run(|attempt| {
                tracing::debug!(attempt, "Fetching menu");
                self.http.get::<Menu>(MENU_PATH)
            })
            .await
    }

    /// `PUT /api/menu` with the whole document; single attempt
    pub async fn replace_menu(&self, menu: &Menu) -> ClientResult<()> {
        let _ack: serde_json::Value = self.http.put(MENU_PATH, menu).await?;
        tracing::debug!(dishes = menu.len(), "Menu pushed");
        Ok(())
    }

    /// `POST /api/upload`; returns the stored image URL
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<String> {
        let size = bytes.len();
        let response: UploadResponse = self
            .http
            .post_file(UPLOAD_PATH, FileUpload::new(UPLOAD_FIELD, file_name, bytes))
            .await?;
        tracing::debug!(file_name, size, url = %response.image_url, "Image uploaded");
        Ok(response.image_url)
    }

    /// `GET /health`
    pub async fn health(&self) -> ClientResult<()> {
        self.http.ping(HEALTH_PATH).await
    }
}
