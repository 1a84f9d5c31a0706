//! Sabor Core - 点餐前端核心
//!
//! State behind the menu, cart and admin views:
//!
//! - `cart`: cart lines and totals
//! - `menu_store`: menu load with retry/cache/fallback, optimistic edits
//! - `order_message`: order text and WhatsApp deep-link
//! - `admin`: admin form validation
//! - `session`: owner of the stores for one session

pub mod admin;
pub mod cart;
pub mod config;
pub mod logger;
pub mod menu_cache;
pub mod menu_store;
pub mod order_message;
pub mod session;

pub use admin::{AdminError, DishForm, ImageInput, NewDish};
pub use cart::CartStore;
pub use config::{AppConfig, ConfigError};
pub use menu_cache::{FileMenuCache, MemoryMenuCache, MenuCache, MenuCacheError};
pub use menu_store::{DishAdded, ImageOutcome, MenuSource, MenuStore, SyncOutcome};
pub use order_message::{
    OrderError, OrderHandoff, WaiterDirectory, build_order_message, whatsapp_link,
};
pub use session::{AppSession, SessionError};

/// Load `.env`, read the environment config and start logging
pub fn setup_environment() -> AppConfig {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env();
    logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
