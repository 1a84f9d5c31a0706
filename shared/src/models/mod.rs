//! Data models
//!
//! Shared between the ordering core and the menu API client.

pub mod cart;
pub mod category;
pub mod dish;
pub mod menu;

// Re-exports
pub use cart::*;
pub use category::*;
pub use dish::*;
pub use menu::*;
