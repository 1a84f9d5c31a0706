//! MenuCache - 菜单本地缓存
//!
//! Holds the most recent menu known to match the remote API. Written after
//! each successful remote fetch or push, read only when the remote fetch
//! fails.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use shared::Menu;
use thiserror::Error;

/// Cache file name under the data directory
pub const MENU_CACHE_FILE: &str = "menu_cache.json";

#[derive(Debug, Error)]
pub enum MenuCacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable single-slot menu storage
pub trait MenuCache: Send + Sync {
    /// `Ok(None)` when nothing was cached yet
    fn load(&self) -> Result<Option<Menu>, MenuCacheError>;
    fn save(&self, menu: &Menu) -> Result<(), MenuCacheError>;
}

impl<T: MenuCache + ?Sized> MenuCache for Arc<T> {
    fn load(&self) -> Result<Option<Menu>, MenuCacheError> {
        (**self).load()
    }

    fn save(&self, menu: &Menu) -> Result<(), MenuCacheError> {
        (**self).save(menu)
    }
}

/// JSON file cache: `{data_dir}/menu_cache.json`
#[derive(Debug, Clone)]
pub struct FileMenuCache {
    file_path: PathBuf,
}

impl FileMenuCache {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join(MENU_CACHE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl MenuCache for FileMenuCache {
    fn load(&self) -> Result<Option<Menu>, MenuCacheError> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, menu: &Menu) -> Result<(), MenuCacheError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(menu)?;
        // write-then-rename
        let tmp_path = self.file_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.file_path)?;
        tracing::debug!(path = %self.file_path.display(), dishes = menu.len(), "Menu cached");
        Ok(())
    }
}

/// In-memory cache, for tests and cache-less sessions
#[derive(Debug, Default)]
pub struct MemoryMenuCache {
    slot: Mutex<Option<Menu>>,
}

impl MemoryMenuCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_menu(menu: Menu) -> Self {
        Self {
            slot: Mutex::new(Some(menu)),
        }
    }
}

impl MenuCache for MemoryMenuCache {
    fn load(&self) -> Result<Option<Menu>, MenuCacheError> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, menu: &Menu) -> Result<(), MenuCacheError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(menu.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Category, DishCreate, Money};

    #[test]
    fn test_file_cache_empty_then_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileMenuCache::new(dir.path());
        assert!(cache.load().unwrap().is_none());

        let mut menu = Menu::fallback();
        menu.add(
            Category::Bebidas,
            DishCreate {
                name: "Caipirinha".into(),
                description: "Limão, açúcar e cachaça".into(),
                price: Money::from_cents(1890),
                image: Some("data:image/png;base64,AAAA".into()),
            },
        );
        cache.save(&menu).unwrap();

        assert_eq!(cache.load().unwrap(), Some(menu));
        assert!(cache.path().ends_with(MENU_CACHE_FILE));
    }

    #[test]
    fn test_file_cache_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileMenuCache::new(&dir.path().join("a/b"));
        cache.save(&Menu::new()).unwrap();
        assert!(cache.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MENU_CACHE_FILE), "[1, 2").unwrap();
        let cache = FileMenuCache::new(dir.path());
        assert!(matches!(cache.load(), Err(MenuCacheError::Json(_))));
    }

    #[test]
    fn test_memory_cache() {
        let cache = MemoryMenuCache::new();
        assert!(cache.load().unwrap().is_none());
        cache.save(&Menu::fallback()).unwrap();
        assert_eq!(cache.load().unwrap(), Some(Menu::fallback()));
    }
}
