//! Sabor Client - HTTP client for the remote menu API
//!
//! Provides the `HttpClient` seam (network via reqwest, or in-process via an
//! axum `Router`), the bounded retry policy used for menu loads, and the
//! typed `MenuApi` on top of both.

pub mod client;
pub mod config;
pub mod error;
pub mod menu_api;
pub mod retry;

pub use client::{FileUpload, HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use menu_api::MenuApi;
pub use retry::RetryPolicy;

// Re-export shared types for convenience
pub use shared::client::{HealthResponse, UploadResponse};
