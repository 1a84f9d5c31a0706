//! AppSession - 会话状态
//!
//! Owns the cart and menu stores for one customer/admin session. The
//! presentation layer issues commands here and reads state back; network
//! and storage failures never surface as errors, only as state.

use sabor_client::{ClientResult, HttpClient, MenuApi, NetworkHttpClient};
use shared::Category;
use thiserror::Error;

use crate::admin::{AdminError, DishForm};
use crate::cart::CartStore;
use crate::config::AppConfig;
use crate::menu_cache::{FileMenuCache, MenuCache};
use crate::menu_store::{DishAdded, MenuSource, MenuStore, SyncOutcome};
use crate::order_message::{OrderError, OrderHandoff, WaiterDirectory, prepare_order};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Dish {id} not found in {category}")]
    DishNotFound { category: Category, id: i64 },

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

/// One session: cart + menu + order context
#[derive(Debug)]
pub struct AppSession<C: HttpClient> {
    cart: CartStore,
    menu: MenuStore<C>,
    waiters: WaiterDirectory,
    table: Option<String>,
    waiter: Option<String>,
}

impl AppSession<NetworkHttpClient> {
    /// Network client + file cache under `config.data_dir`
    pub fn from_config(config: &AppConfig) -> ClientResult<Self> {
        let http = config.client_config().build_http_client()?;
        let cache = FileMenuCache::new(&config.data_dir);
        Ok(Self::new(config, http, Box::new(cache)))
    }
}

impl<C: HttpClient> AppSession<C> {
    pub fn new(config: &AppConfig, http: C, cache: Box<dyn MenuCache>) -> Self {
        let api = MenuApi::new(http).with_retry(config.retry_policy());
        let menu = MenuStore::new(api, cache)
            .with_inline_image_max_bytes(config.inline_image_max_bytes);

        let mut waiters = WaiterDirectory::new(config.default_contact.clone());
        for (name, phone) in &config.waiters {
            waiters.insert(name, phone.clone());
        }

        Self {
            cart: CartStore::new(),
            menu,
            waiters,
            table: None,
            waiter: None,
        }
    }

    /// Probe the API, then load the menu
    pub async fn start(&mut self) -> MenuSource {
        if !self.menu.health_check().await {
            tracing::info!("API not healthy at startup, loading anyway");
        }
        self.menu.load().await
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    pub fn menu(&self) -> &MenuStore<C> {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuStore<C> {
        &mut self.menu
    }

    // ========== Customer ==========

    /// Add one unit of a dish from the live menu
    pub fn add_to_cart(&mut self, category: Category, dish_id: i64) -> Result<u32, SessionError> {
        let dish = self
            .menu
            .menu()
            .find(category, dish_id)
            .ok_or(SessionError::DishNotFound {
                category,
                id: dish_id,
            })?;
        Ok(self.cart.add_item(dish, category))
    }

    pub fn set_table(&mut self, table: Option<String>) {
        self.table = table;
    }

    pub fn set_waiter(&mut self, waiter: Option<String>) {
        self.waiter = waiter;
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn waiter(&self) -> Option<&str> {
        self.waiter.as_deref()
    }

    /// Build the handoff for the current cart; the cart is left as is
    pub fn prepare_order(&self) -> Result<OrderHandoff, SessionError> {
        Ok(prepare_order(
            &self.cart,
            self.table.as_deref(),
            self.waiter.as_deref(),
            &self.waiters,
        )?)
    }

    // ========== Admin ==========

    /// Validate the form and add the dish; a rejected form adds nothing
    pub async fn submit_dish(&mut self, form: &DishForm) -> Result<DishAdded, SessionError> {
        let new_dish = form.validate()?;
        Ok(self.menu.add_dish(new_dish).await)
    }

    pub async fn remove_dish(&mut self, category: Category, id: i64) -> SyncOutcome {
        self.menu.remove_dish(category, id).await
    }

    pub async fn reconnect(&mut self) -> SyncOutcome {
        self.menu.reconnect().await
    }
}
