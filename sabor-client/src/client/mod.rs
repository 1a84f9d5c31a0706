//! Client module - transport implementations behind `HttpClient`.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

// Re-export main types
pub use http::{FileUpload, HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
