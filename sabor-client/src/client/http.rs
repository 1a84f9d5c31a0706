// sabor-client/src/client/http.rs
// HTTP 客户端 - 网络通信

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::decode_body;
use crate::{ClientConfig, ClientError, ClientResult};

/// A single file sent as `multipart/form-data`
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Form field name
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Guess the content type from the file name
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            field: field.into(),
            file_name,
            content_type,
            bytes,
        }
    }
}

/// HTTP 客户端 trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_file<T: DeserializeOwned>(&self, path: &str, file: FileUpload)
    -> ClientResult<T>;
    /// GET that only checks for a success status; the body is ignored
    async fn ping(&self, path: &str) -> ClientResult<()>;
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url is empty".into()));
        }
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status, text));
        }
        let bytes = response.bytes().await?;
        decode_body(&bytes)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file: FileUpload,
    ) -> ClientResult<T> {
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = reqwest::multipart::Form::new().part(file.field, part);
        let response = self.client.post(self.url(path)).multipart(form).send().await?;
        self.handle_response(response).await
    }

    async fn ping(&self, path: &str) -> ClientResult<()> {
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status, text));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = NetworkHttpClient::new(&ClientConfig::new("http://api.local/")).unwrap();
        assert_eq!(client.base_url(), "http://api.local");
        assert_eq!(client.url("/api/menu"), "http://api.local/api/menu");
        assert_eq!(client.url("health"), "http://api.local/health");
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        assert!(matches!(
            NetworkHttpClient::new(&ClientConfig::new("  ")),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_file_upload_guesses_content_type() {
        let upload = FileUpload::new("image", "feijoada.png", vec![1, 2, 3]);
        assert_eq!(upload.content_type, "image/png");
        let upload = FileUpload::new("image", "blob", vec![]);
        assert_eq!(upload.content_type, "application/octet-stream");
    }
}
