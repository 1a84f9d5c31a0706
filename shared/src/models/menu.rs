//! Menu Model
//!
//! The whole menu is one document: category key -> ordered dish list.
//! It is replaced wholesale on fetch and pushed wholesale on every edit.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Category, DishCreate, DishRecord};
use crate::money::Money;
use crate::util::now_millis;

/// Menu document
///
/// Every category is always present (possibly empty), in `Category::ALL`
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Menu {
    categories: BTreeMap<Category, Vec<DishRecord>>,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    /// Empty menu with all categories present
    pub fn new() -> Self {
        Self {
            categories: Category::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
        }
    }

    /// Dishes of one category, in menu order
    pub fn dishes(&self, category: Category) -> &[DishRecord] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate categories in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[DishRecord])> {
        self.categories.iter().map(|(c, d)| (*c, d.as_slice()))
    }

    pub fn find(&self, category: Category, id: i64) -> Option<&DishRecord> {
        self.dishes(category).iter().find(|d| d.id == id)
    }

    pub fn contains(&self, category: Category, id: i64) -> bool {
        self.find(category, id).is_some()
    }

    /// Total number of dishes across categories
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Timestamp-based id not yet used in `category`
    pub fn next_id(&self, category: Category) -> i64 {
        let mut id = now_millis();
        while self.contains(category, id) {
            id += 1;
        }
        id
    }

    /// Append a dish record as-is
    pub fn push(&mut self, category: Category, dish: DishRecord) {
        self.categories.entry(category).or_default().push(dish);
    }

    /// Assign a fresh id and append; returns the stored record
    pub fn add(&mut self, category: Category, dish: DishCreate) -> &DishRecord {
        let id = self.next_id(category);
        let list = self.categories.entry(category).or_default();
        list.push(dish.into_record(id));
        &list[list.len() - 1]
    }

    /// Remove a dish by id; `None` if it was not there
    pub fn remove(&mut self, category: Category, id: i64) -> Option<DishRecord> {
        let list = self.categories.get_mut(&category)?;
        let index = list.iter().position(|d| d.id == id)?;
        Some(list.remove(index))
    }

    /// Built-in menu used when neither the remote API nor a cache is available
    pub fn fallback() -> Self {
        fn dish(id: i64, name: &str, description: &str, cents: i64) -> DishRecord {
            DishRecord {
                id,
                name: name.to_string(),
                description: description.to_string(),
                price: Money::from_cents(cents),
                image: None,
            }
        }

        let mut menu = Self::new();
        for record in [
            dish(1, "Bruschetta Tradicional", "Pão italiano tostado com tomates, alho e manjericão", 1890),
            dish(2, "Carpaccio", "Finas fatias de carne com molho especial e parmesão", 2990),
            dish(3, "Camarão Empanado", "Camarões empanados com molho tártaro", 3290),
        ] {
            menu.push(Category::Entradas, record);
        }
        for record in [
            dish(1, "Filé Mignon ao Molho Madeira", "Filé mignon grelhado coberto com molho madeira e cogumelos", 6290),
            dish(2, "Risoto de Camarão", "Arroz arbóreo cremoso com camarões e ervas finas", 5890),
            dish(3, "Feijoada Completa", "Tradicional feijoada com acompanhamentos", 4990),
            dish(4, "Salmão Grelhado", "Filé de salmão grelhado com molho de ervas e legumes", 6490),
        ] {
            menu.push(Category::PratosPrincipais, record);
        }
        for record in [
            dish(1, "Petit Gateau", "Bolo quente de chocolate com sorvete de creme", 2290),
            dish(2, "Pudim de Leite", "Pudim caseiro com calda de caramelo", 1690),
            dish(3, "Cheesecake", "Torta de cream cheese com calda de frutas vermelhas", 1990),
        ] {
            menu.push(Category::Sobremesas, record);
        }
        for record in [
            dish(1, "Água Mineral", "Com ou sem gás (500ml)", 690),
            dish(2, "Refrigerante", "Diversos sabores (lata)", 790),
            dish(3, "Suco Natural", "Laranja, abacaxi, maracujá ou limão", 1290),
            dish(4, "Taça de Vinho", "Tinto, branco ou rosé", 2290),
        ] {
            menu.push(Category::Bebidas, record);
        }
        menu
    }
}

impl<'de> Deserialize<'de> for Menu {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<DishRecord>>::deserialize(deserializer)?;
        let mut menu = Menu::new();
        for (key, dishes) in raw {
            match key.parse::<Category>() {
                Ok(category) => {
                    menu.categories.insert(category, dishes);
                }
                Err(_) => {
                    tracing::warn!(category = %key, count = dishes.len(), "Skipping unknown menu category");
                }
            }
        }
        Ok(menu)
    }
}
