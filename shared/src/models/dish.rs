//! Dish Model

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Dish entity
///
/// `id` is unique within its category only. Records are never edited in
/// place: admin edits are remove + add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Money,
    /// Image URL, or an inline `data:` URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Create dish payload (id is assigned by the menu store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: Option<String>,
}

impl DishCreate {
    pub fn into_record(self, id: i64) -> DishRecord {
        DishRecord {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image: self.image,
        }
    }
}
