//! Mock state with failure injection and request counters

use std::sync::Arc;

use axum::http::StatusCode;
use shared::Menu;
use tokio::sync::Mutex;

/// Request counters, one per endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestCounts {
    pub get_menu: u32,
    pub put_menu: u32,
    pub upload: u32,
    pub health: u32,
}

/// An image received by `POST /api/upload`
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: usize,
}

#[derive(Debug)]
struct Inner {
    menu: Menu,
    /// (remaining, status) for upcoming `GET /api/menu` calls
    get_failures: Option<(u32, StatusCode)>,
    put_failure: Option<StatusCode>,
    upload_failure: Option<StatusCode>,
    health_failure: Option<StatusCode>,
    counts: RequestCounts,
    images: Vec<StoredImage>,
}

/// Shared mock state
#[derive(Debug, Clone)]
pub struct MockState {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self::new(Menu::fallback())
    }
}

impl MockState {
    pub fn new(menu: Menu) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                menu,
                get_failures: None,
                put_failure: None,
                upload_failure: None,
                health_failure: None,
                counts: RequestCounts::default(),
                images: Vec::new(),
            })),
        }
    }

    /// Answer the next `times` menu fetches with `status`
    pub async fn fail_next_fetches(&self, times: u32, status: StatusCode) {
        self.inner.lock().await.get_failures = Some((times, status));
    }

    /// Answer every menu fetch with `status` until cleared
    pub async fn fail_all_fetches(&self, status: StatusCode) {
        self.fail_next_fetches(u32::MAX, status).await;
    }

    pub async fn fail_puts(&self, status: Option<StatusCode>) {
        self.inner.lock().await.put_failure = status;
    }

    pub async fn fail_uploads(&self, status: Option<StatusCode>) {
        self.inner.lock().await.upload_failure = status;
    }

    pub async fn fail_health(&self, status: Option<StatusCode>) {
        self.inner.lock().await.health_failure = status;
    }

    /// Take the whole API down (every endpoint answers 503) or bring it back
    pub async fn set_down(&self, down: bool) {
        let status = down.then_some(StatusCode::SERVICE_UNAVAILABLE);
        let mut inner = self.inner.lock().await;
        inner.get_failures = status.map(|s| (u32::MAX, s));
        inner.put_failure = status;
        inner.upload_failure = status;
        inner.health_failure = status;
    }

    pub async fn menu(&self) -> Menu {
        self.inner.lock().await.menu.clone()
    }

    pub async fn set_menu(&self, menu: Menu) {
        self.inner.lock().await.menu = menu;
    }

    pub async fn counts(&self) -> RequestCounts {
        self.inner.lock().await.counts
    }

    pub async fn images(&self) -> Vec<StoredImage> {
        self.inner.lock().await.images.clone()
    }

    // ========== Handler side ==========

    pub(crate) async fn take_menu_fetch(&self) -> Result<Menu, StatusCode> {
        let mut inner = self.inner.lock().await;
        inner.counts.get_menu += 1;
        if let Some((remaining, status)) = inner.get_failures {
            inner.get_failures = match remaining {
                u32::MAX => Some((u32::MAX, status)),
                0 | 1 => None,
                n => Some((n - 1, status)),
            };
            if remaining > 0 {
                return Err(status);
            }
        }
        Ok(inner.menu.clone())
    }

    pub(crate) async fn replace_menu(&self, menu: Menu) -> Result<(), StatusCode> {
        let mut inner = self.inner.lock().await;
        inner.counts.put_menu += 1;
        if let Some(status) = inner.put_failure {
            return Err(status);
        }
        inner.menu = menu;
        Ok(())
    }

    pub(crate) async fn record_upload(&self) -> Result<(), StatusCode> {
        let mut inner = self.inner.lock().await;
        inner.counts.upload += 1;
        match inner.upload_failure {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    pub(crate) async fn store_image(&self, image: StoredImage) -> usize {
        let mut inner = self.inner.lock().await;
        inner.images.push(image);
        inner.images.len()
    }

    pub(crate) async fn check_health(&self) -> Result<(), StatusCode> {
        let mut inner = self.inner.lock().await;
        inner.counts.health += 1;
        match inner.health_failure {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }
}
