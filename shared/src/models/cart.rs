//! Cart line Model

use serde::{Deserialize, Serialize};

use super::{Category, DishRecord};
use crate::money::Money;

/// One distinct (dish, category) entry in the cart
///
/// Display fields are copied from the dish when the line is created, so
/// later menu edits do not change lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub dish_id: i64,
    pub category: Category,
    pub name: String,
    pub description: String,
    pub price: Money,
    /// Always >= 1
    pub quantity: u32,
}

impl CartLine {
    /// New line with quantity 1
    pub fn from_dish(dish: &DishRecord, category: Category) -> Self {
        Self {
            dish_id: dish.id,
            category,
            name: dish.name.clone(),
            description: dish.description.clone(),
            price: dish.price,
            quantity: 1,
        }
    }

    pub fn matches(&self, dish_id: i64, category: Category) -> bool {
        self.dish_id == dish_id && self.category == category
    }

    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}
