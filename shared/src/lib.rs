//! Shared types for the Sabor ordering core
//!
//! Menu and cart models, the `Money` price type and the DTOs of the
//! remote menu API. Used by both `sabor-client` and `sabor-core`.

pub mod client;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use models::{CartLine, Category, DishCreate, DishRecord, Menu};
pub use money::{Money, MoneyError};
pub use serde::{Deserialize, Serialize};
