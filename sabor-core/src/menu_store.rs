//! MenuStore - 菜单状态 + 远程同步
//!
//! # 加载流程
//!
//! 1. `GET /api/menu` (有界重试, 仅 502/503/504 重试)
//! 2. 失败 -> 本地缓存
//! 3. 无缓存 -> 内置默认菜单
//!
//! 远程失败时设置 offline 标记。
//!
//! # 写入
//!
//! 本地先改, 再整体 `PUT /api/menu`。推送失败不回滚本地修改,
//! 只标记 offline + pending, 由 `reconnect()` 恢复并补推一次。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sabor_client::{HttpClient, MenuApi};
use serde::Serialize;
use shared::{Category, DishCreate, DishRecord, Menu};

use crate::admin::{ImageInput, NewDish};
use crate::config::DEFAULT_INLINE_IMAGE_MAX_BYTES;
use crate::menu_cache::MenuCache;

/// Where the live menu came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSource {
    Remote,
    Cache,
    Fallback,
}

/// Result of pushing a local change to the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Remote now matches the local menu
    Synced,
    /// Already offline; nothing was sent
    Offline,
    /// The push was attempted and failed; the change is kept locally
    LocalOnly { reason: String },
    /// Nothing changed locally, so nothing was sent
    Unchanged,
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced | SyncOutcome::Unchanged)
    }
}

/// What happened to the image of a new dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageOutcome {
    /// Stored by reference (given URL or upload result)
    Linked,
    /// Upload not possible; embedded as a `data:` URI
    Inlined { size: usize },
    /// Upload not possible and too large to embed
    Dropped { size: usize, max: usize },
}

/// Result of `MenuStore::add_dish`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DishAdded {
    pub category: Category,
    pub dish: DishRecord,
    pub sync: SyncOutcome,
    /// `None` when the dish has no image
    pub image: Option<ImageOutcome>,
}

/// Menu state owner
pub struct MenuStore<C: HttpClient> {
    api: MenuApi<C>,
    cache: Box<dyn MenuCache>,
    menu: Menu,
    source: MenuSource,
    offline: bool,
    loading: bool,
    pending_changes: bool,
    inline_image_max_bytes: usize,
}

impl<C: HttpClient> std::fmt::Debug for MenuStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuStore")
            .field("dishes", &self.menu.len())
            .field("source", &self.source)
            .field("offline", &self.offline)
            .field("loading", &self.loading)
            .field("pending_changes", &self.pending_changes)
            .finish()
    }
}

impl<C: HttpClient> MenuStore<C> {
    /// Starts on the built-in menu until `load` runs
    pub fn new(api: MenuApi<C>, cache: Box<dyn MenuCache>) -> Self {
        Self {
            api,
            cache,
            menu: Menu::fallback(),
            source: MenuSource::Fallback,
            offline: false,
            loading: false,
            pending_changes: false,
            inline_image_max_bytes: DEFAULT_INLINE_IMAGE_MAX_BYTES,
        }
    }

    /// Cap on embedded images, in raw (decoded) image bytes
    pub fn with_inline_image_max_bytes(mut self, max: usize) -> Self {
        self.inline_image_max_bytes = max;
        self
    }

    // ========== Observable state ==========

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn source(&self) -> MenuSource {
        self.source
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Local changes the remote API has not seen yet
    pub fn has_pending_changes(&self) -> bool {
        self.pending_changes
    }

    pub fn api(&self) -> &MenuApi<C> {
        &self.api
    }

    // ========== Load ==========

    /// Fetch the menu, degrading to cache then to the built-in menu
    ///
    /// Never fails: the store always ends up with a renderable menu.
    /// A successful fetch replaces any unsynced local changes; a failed one
    /// keeps them.
    pub async fn load(&mut self) -> MenuSource {
        self.loading = true;

        match self.api.fetch_menu().await {
            Ok(menu) => {
                if self.pending_changes {
                    tracing::warn!("Unsynced local menu changes replaced by the remote menu");
                }
                if let Err(e) = self.cache.save(&menu) {
                    tracing::warn!(error = %e, "Failed to cache menu");
                }
                tracing::info!(dishes = menu.len(), "Menu loaded from API");
                self.menu = menu;
                self.source = MenuSource::Remote;
                self.offline = false;
                self.pending_changes = false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Menu fetch failed, switching to offline mode");
                self.offline = true;
                if self.pending_changes {
                    tracing::info!("Keeping in-memory menu with unsynced changes");
                    self.loading = false;
                    return self.source;
                }
                let (menu, source) = self.load_local();
                self.menu = menu;
                self.source = source;
            }
        }

        self.loading = false;
        self.source
    }

    fn load_local(&self) -> (Menu, MenuSource) {
        match self.cache.load() {
            Ok(Some(menu)) => {
                tracing::info!(dishes = menu.len(), "Menu loaded from cache");
                (menu, MenuSource::Cache)
            }
            Ok(None) => {
                tracing::info!("No cached menu, using built-in menu");
                (Menu::fallback(), MenuSource::Fallback)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Menu cache unreadable, using built-in menu");
                (Menu::fallback(), MenuSource::Fallback)
            }
        }
    }

    // ========== Mutations ==========

    /// Append a validated dish and push the menu when online
    ///
    /// The dish stays in the local menu whatever the push outcome.
    pub async fn add_dish(&mut self, new_dish: NewDish) -> DishAdded {
        let NewDish {
            category,
            name,
            description,
            price,
            image,
        } = new_dish;

        let (image, image_outcome) = match image {
            Some(input) => {
                let (url, outcome) = self.resolve_image(input).await;
                (url, Some(outcome))
            }
            None => (None, None),
        };

        let dish = self
            .menu
            .add(
                category,
                DishCreate {
                    name,
                    description,
                    price,
                    image,
                },
            )
            .clone();
        tracing::info!(%category, id = dish.id, name = %dish.name, "Dish added");

        let sync = self.push().await;
        DishAdded {
            category,
            dish,
            sync,
            image: image_outcome,
        }
    }

    /// Remove a dish; an absent id is a no-op with no write
    pub async fn remove_dish(&mut self, category: Category, id: i64) -> SyncOutcome {
        match self.menu.remove(category, id) {
            Some(dish) => {
                tracing::info!(%category, id, name = %dish.name, "Dish removed");
                self.push().await
            }
            None => {
                tracing::debug!(%category, id, "Dish not in menu, nothing to remove");
                SyncOutcome::Unchanged
            }
        }
    }

    /// Leave offline mode if the API answers, then flush pending changes
    ///
    /// Returns `Offline` when the probe fails, otherwise the outcome of the
    /// flush (`Unchanged` when nothing was pending).
    pub async fn reconnect(&mut self) -> SyncOutcome {
        if let Err(e) = self.api.health().await {
            tracing::warn!(error = %e, "API still unreachable");
            self.offline = true;
            return SyncOutcome::Offline;
        }

        self.offline = false;
        tracing::info!(pending = self.pending_changes, "API reachable again");
        if self.pending_changes {
            self.push().await
        } else {
            SyncOutcome::Unchanged
        }
    }

    /// Liveness probe; failures are logged only
    pub async fn health_check(&self) -> bool {
        match self.api.health().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Health check failed");
                false
            }
        }
    }

    /// Send the whole menu; single attempt
    async fn push(&mut self) -> SyncOutcome {
        if self.offline {
            self.pending_changes = true;
            tracing::debug!("Offline, menu change kept locally");
            return SyncOutcome::Offline;
        }

        match self.api.replace_menu(&self.menu).await {
            Ok(()) => {
                self.pending_changes = false;
                if let Err(e) = self.cache.save(&self.menu) {
                    tracing::warn!(error = %e, "Failed to cache menu");
                }
                SyncOutcome::Synced
            }
            Err(e) => {
                tracing::warn!(error = %e, "Menu push failed, change kept locally");
                self.offline = true;
                self.pending_changes = true;
                SyncOutcome::LocalOnly {
                    reason: e.to_string(),
                }
            }
        }
    }

    // ========== Images ==========

    /// Turn an image input into the string stored on the dish
    ///
    /// Files are uploaded when online; otherwise, or when the upload fails,
    /// they are inlined as a `data:` URI if under the size cap.
    async fn resolve_image(&mut self, input: ImageInput) -> (Option<String>, ImageOutcome) {
        match input {
            ImageInput::Url(url) => {
                if let Some(size) = data_uri_payload_size(&url)
                    && size > self.inline_image_max_bytes
                {
                    tracing::warn!(size, max = self.inline_image_max_bytes, "Inline image over the size cap, dropped");
                    return (
                        None,
                        ImageOutcome::Dropped {
                            size,
                            max: self.inline_image_max_bytes,
                        },
                    );
                }
                (Some(url), ImageOutcome::Linked)
            }
            ImageInput::File { file_name, bytes } => {
                if !self.offline {
                    match self.api.upload_image(&file_name, bytes.clone()).await {
                        Ok(url) => return (Some(url), ImageOutcome::Linked),
                        Err(e) => {
                            tracing::warn!(error = %e, file_name = %file_name, "Image upload failed");
                            self.offline = true;
                        }
                    }
                }
                self.inline_image(&file_name, &bytes)
            }
        }
    }

    fn inline_image(&self, file_name: &str, bytes: &[u8]) -> (Option<String>, ImageOutcome) {
        let size = bytes.len();
        if size > self.inline_image_max_bytes {
            tracing::warn!(file_name, size, max = self.inline_image_max_bytes, "Image too large to inline, dropped");
            return (
                None,
                ImageOutcome::Dropped {
                    size,
                    max: self.inline_image_max_bytes,
                },
            );
        }
        (
            Some(data_uri(file_name, bytes)),
            ImageOutcome::Inlined { size },
        )
    }
}

/// Decoded image size of a `data:` URI; `None` for any other URL
///
/// Non-base64 payloads are measured as written.
pub fn data_uri_payload_size(url: &str) -> Option<usize> {
    let rest = url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',').unwrap_or((rest, ""));
    if meta.ends_with(";base64") {
        let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
        Some((payload.len() / 4 * 3).saturating_sub(padding))
    } else {
        Some(payload.len())
    }
}

/// `data:<mime>;base64,<payload>`
pub fn data_uri(file_name: &str, bytes: &[u8]) -> String {
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
