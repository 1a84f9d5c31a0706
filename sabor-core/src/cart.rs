//! CartStore - 购物车状态
//!
//! Ordered list of lines keyed by (dish id, category). Insertion order is
//! kept; a line never exists with quantity 0.

use serde::Serialize;
use shared::{CartLine, Category, DishRecord, Money};

/// In-memory cart, one per session
#[derive(Debug, Clone, Default, Serialize)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `dish` under `category`
    ///
    /// Returns the line's quantity after the add. The caller is expected to
    /// open the cart view.
    pub fn add_item(&mut self, dish: &DishRecord, category: Category) -> u32 {
        if let Some(line) = self.find_mut(dish.id, category) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        self.lines.push(CartLine::from_dish(dish, category));
        tracing::debug!(dish_id = dish.id, %category, "Cart line added");
        1
    }

    /// Remove the matching line; returns whether one was removed
    pub fn remove_item(&mut self, dish_id: i64, category: Category) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| !l.matches(dish_id, category));
        before != self.lines.len()
    }

    /// Apply `delta` to the matching line's quantity
    ///
    /// A result <= 0 removes the line. Returns the new quantity, or `None`
    /// when the line was removed or did not exist.
    pub fn adjust_quantity(&mut self, dish_id: i64, category: Category, delta: i32) -> Option<u32> {
        let index = self.lines.iter().position(|l| l.matches(dish_id, category))?;
        let new_quantity = i64::from(self.lines[index].quantity) + i64::from(delta);
        if new_quantity > 0 {
            let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
            self.lines[index].quantity = quantity;
            Some(quantity)
        } else {
            self.lines.remove(index);
            None
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, dish_id: i64, category: Category) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(dish_id, category))
    }

    /// Number of distinct lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities (cart badge)
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total_money(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total as `"100,70"` (no currency prefix)
    pub fn total(&self) -> String {
        self.total_money().format_amount()
    }

    fn find_mut(&mut self, dish_id: i64, category: Category) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.matches(dish_id, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: i64, name: &str, cents: i64) -> DishRecord {
        DishRecord {
            id,
            name: name.to_string(),
            description: format!("{name} da casa"),
            price: Money::from_cents(cents),
            image: None,
        }
    }

    #[test]
    fn test_add_same_dish_twice_increments() {
        let mut cart = CartStore::new();
        let bruschetta = dish(1, "Bruschetta", 1890);

        assert_eq!(cart.add_item(&bruschetta, Category::Entradas), 1);
        assert_eq!(cart.add_item(&bruschetta, Category::Entradas), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_same_id_in_other_category_is_distinct() {
        let mut cart = CartStore::new();
        cart.add_item(&dish(1, "Bruschetta", 1890), Category::Entradas);
        cart.add_item(&dish(1, "Água", 690), Category::Bebidas);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(1, Category::Bebidas).unwrap().name, "Água");
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = CartStore::new();
        cart.add_item(&dish(3, "C", 100), Category::Sobremesas);
        cart.add_item(&dish(1, "A", 100), Category::Entradas);
        cart.add_item(&dish(3, "C", 100), Category::Sobremesas);

        let names: Vec<&str> = cart.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["C", "A"]);
    }

    #[test]
    fn test_line_snapshot_survives_menu_edit() {
        let mut cart = CartStore::new();
        let mut carpaccio = dish(2, "Carpaccio", 2990);
        cart.add_item(&carpaccio, Category::Entradas);

        carpaccio.name = "Carpaccio Especial".to_string();
        carpaccio.price = Money::from_cents(3990);
        cart.add_item(&carpaccio, Category::Entradas);

        let line = cart.get(2, Category::Entradas).unwrap();
        assert_eq!(line.name, "Carpaccio");
        assert_eq!(line.price, Money::from_cents(2990));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = CartStore::new();
        cart.add_item(&dish(1, "A", 100), Category::Entradas);

        assert!(!cart.remove_item(1, Category::Bebidas));
        assert!(cart.remove_item(1, Category::Entradas));
        assert!(cart.is_empty());
        assert!(!cart.remove_item(1, Category::Entradas));
    }

    #[test]
    fn test_adjust_quantity() {
        let mut cart = CartStore::new();
        let a = dish(1, "A", 100);
        cart.add_item(&a, Category::Entradas);

        assert_eq!(cart.adjust_quantity(1, Category::Entradas, 4), Some(5));
        assert_eq!(cart.adjust_quantity(1, Category::Entradas, -1), Some(4));
        assert_eq!(cart.adjust_quantity(9, Category::Entradas, 1), None);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_adjust_to_zero_removes_line() {
        let mut cart = CartStore::new();
        let a = dish(1, "A", 100);
        cart.add_item(&a, Category::Entradas);
        cart.add_item(&a, Category::Entradas);

        assert_eq!(cart.adjust_quantity(1, Category::Entradas, -2), None);
        assert!(cart.get(1, Category::Entradas).is_none());

        cart.add_item(&a, Category::Entradas);
        assert_eq!(cart.adjust_quantity(1, Category::Entradas, -10), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total() {
        let mut cart = CartStore::new();
        let bruschetta = dish(1, "Bruschetta", 1890);
        cart.add_item(&bruschetta, Category::Entradas);
        cart.add_item(&bruschetta, Category::Entradas);
        cart.add_item(&dish(1, "Filé", 6290), Category::PratosPrincipais);

        assert_eq!(cart.total(), "100,70");
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_total_of_empty_cart() {
        assert_eq!(CartStore::new().total(), "0,00");
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::new();
        cart.add_item(&dish(1, "A", 100), Category::Entradas);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
