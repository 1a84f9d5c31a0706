//! Admin form validation
//!
//! Turns raw admin input into a `NewDish` the menu store can append.
//! Nothing is submitted unless every required field is present and the
//! price parses.

use shared::money::CURRENCY_PREFIX;
use shared::{Category, Money, MoneyError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminError {
    #[error("Name is required")]
    MissingName,

    #[error("Description is required")]
    MissingDescription,

    #[error("Price is required")]
    MissingPrice,

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] MoneyError),
}

/// Image attached to a new dish
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// Already hosted somewhere (or a `data:` URI pasted as-is)
    Url(String),
    /// Raw file picked by the admin; uploaded or inlined by the store
    File { file_name: String, bytes: Vec<u8> },
}

/// Raw admin form, exactly as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishForm {
    pub category: Category,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: Option<ImageInput>,
}

/// Validated dish, ready for `MenuStore::add_dish`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDish {
    pub category: Category,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: Option<ImageInput>,
}

/// Prepend the currency prefix when the admin left it out
///
/// `"45,90"` -> `"R$ 45,90"`; `"R$ 45,90"` is returned trimmed.
pub fn normalize_price(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with(CURRENCY_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{CURRENCY_PREFIX} {trimmed}")
    }
}

impl DishForm {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            name: String::new(),
            description: String::new(),
            price: String::new(),
            image: None,
        }
    }

    /// Validate without consuming, so a rejected form keeps its contents
    pub fn validate(&self) -> Result<NewDish, AdminError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AdminError::MissingName);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(AdminError::MissingDescription);
        }
        if self.price.trim().is_empty() {
            return Err(AdminError::MissingPrice);
        }
        let price = Money::parse(&normalize_price(&self.price))?;

        let image = match &self.image {
            Some(ImageInput::Url(url)) if url.trim().is_empty() => None,
            Some(ImageInput::Url(url)) => Some(ImageInput::Url(url.trim().to_string())),
            Some(ImageInput::File { bytes, .. }) if bytes.is_empty() => None,
            other => other.clone(),
        };

        Ok(NewDish {
            category: self.category,
            name: name.to_string(),
            description: description.to_string(),
            price,
            image,
        })
    }
}
