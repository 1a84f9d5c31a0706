// sabor-client/src/client/http_oneshot.rs
// Oneshot HTTP 客户端 - 内存通信
//
// 需要启用 "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request, header};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use super::http::{FileUpload, HttpClient};
use crate::error::decode_body;
use crate::{ClientError, ClientResult};

const MULTIPART_BOUNDARY: &str = "sabor-oneshot-boundary";

/// Oneshot HTTP 客户端 (内存调用)
///
/// 使用 Tower Service 的 oneshot 模式直接调用 Router，
/// 适用于同进程的服务器-客户端通信，零网络开销。
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use sabor_client::{MenuApi, OneshotHttpClient};
///
/// let router: Router = fake_menu_api();
/// let api = MenuApi::new(OneshotHttpClient::new(router));
/// let menu = api.fetch_menu().await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
}

impl OneshotHttpClient {
    /// 创建新的 Oneshot HTTP 客户端
    ///
    /// # Arguments
    /// * `router` - 已初始化的 Axum Router (with_state 已调用)
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    fn build_request(&self, method: Method, path: &str, body: Body) -> ClientResult<Request<Body>> {
        Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    /// 执行请求，返回状态码和响应体
    async fn execute(&self, request: Request<Body>) -> ClientResult<Vec<u8>> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes).to_string();
            return Err(ClientError::from_status(status, text));
        }

        Ok(body_bytes.to_vec())
    }
}

/// Percent-encode `"`, CR and LF so a header parameter stays on one line
fn escape_header_param(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Encode one file as a `multipart/form-data` body
fn multipart_body(file: &FileUpload) -> Vec<u8> {
    let mut body = Vec::with_capacity(file.bytes.len() + 256);
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            escape_header_param(&file.field),
            escape_header_param(&file.file_name),
            file.content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::GET, path, Body::empty())?;
        let bytes = self.execute(request).await?;
        decode_body(&bytes)
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body_bytes = serde_json::to_vec(body)?;
        let request = self.build_request(Method::PUT, path, Body::from(body_bytes))?;
        let bytes = self.execute(request).await?;
        decode_body(&bytes)
    }

    async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file: FileUpload,
    ) -> ClientResult<T> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(multipart_body(&file)))
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))?;
        let bytes = self.execute(request).await?;
        decode_body(&bytes)
    }

    async fn ping(&self, path: &str) -> ClientResult<()> {
        let request = self.build_request(Method::GET, path, Body::empty())?;
        self.execute(request).await.map(|_| ())
    }
}
