//! Order message builder
//!
//! Pure formatting of the cart into the text sent to the waiter, plus the
//! WhatsApp deep-link that carries it. No I/O happens here.
//!
//! ```text
//! *Pedido - Mesa 12*
//! 2x Bruschetta Tradicional (Entradas) - R$ 18,90
//! 1x Filé Mignon ao Molho Madeira (Pratos Principais) - R$ 62,90
//! Total: R$ 100,70
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::cart::CartStore;
use crate::config::DEFAULT_CONTACT;

/// Table marker when the customer did not give one
pub const TABLE_NOT_INFORMED: &str = "Não informada";

pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Contact has no phone digits: {0:?}")]
    InvalidContact(String),

    #[error("Failed to build link: {0}")]
    Link(String),
}

/// Waiter name -> phone lookup with a default contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaiterDirectory {
    contacts: BTreeMap<String, String>,
    default_contact: String,
}

impl Default for WaiterDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_CONTACT)
    }
}

impl WaiterDirectory {
    pub fn new(default_contact: impl Into<String>) -> Self {
        Self {
            contacts: BTreeMap::new(),
            default_contact: default_contact.into(),
        }
    }

    pub fn with_waiter(mut self, name: &str, phone: impl Into<String>) -> Self {
        self.insert(name, phone);
        self
    }

    pub fn insert(&mut self, name: &str, phone: impl Into<String>) {
        self.contacts.insert(normalize_name(name), phone.into());
    }

    pub fn default_contact(&self) -> &str {
        &self.default_contact
    }

    /// Phone for `waiter`; unknown or unset waiters get the default contact
    pub fn contact_for(&self, waiter: Option<&str>) -> &str {
        waiter
            .and_then(|name| self.contacts.get(&normalize_name(name)))
            .map(String::as_str)
            .unwrap_or(&self.default_contact)
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Render the order text; an empty cart gives an empty string
pub fn build_order_message(cart: &CartStore, table: Option<&str>) -> String {
    if cart.is_empty() {
        return String::new();
    }

    let table = table
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(TABLE_NOT_INFORMED);

    let mut lines = Vec::with_capacity(cart.len() + 2);
    lines.push(format!("*Pedido - Mesa {table}*"));
    for line in cart.lines() {
        lines.push(format!(
            "{}x {} ({}) - {}",
            line.quantity,
            line.name,
            line.category.label(),
            line.price
        ));
    }
    lines.push(format!("Total: R$ {}", cart.total()));
    lines.join("\n")
}

/// `https://wa.me/<digits>?text=<encoded text>`
pub fn whatsapp_link(phone: &str, text: &str) -> Result<String, OrderError> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(OrderError::InvalidContact(phone.to_string()));
    }
    let url = reqwest::Url::parse_with_params(&format!("{WHATSAPP_BASE_URL}{digits}"), &[("text", text)])
        .map_err(|e| OrderError::Link(e.to_string()))?;
    Ok(url.into())
}

/// Everything the presentation layer needs to hand the order off
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderHandoff {
    pub phone: String,
    pub message: String,
    pub link: String,
}

/// Message + destination + deep-link for the current cart
pub fn prepare_order(
    cart: &CartStore,
    table: Option<&str>,
    waiter: Option<&str>,
    directory: &WaiterDirectory,
) -> Result<OrderHandoff, OrderError> {
    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }
    let message = build_order_message(cart, table);
    let phone = directory.contact_for(waiter).to_string();
    let link = whatsapp_link(&phone, &message)?;
    tracing::info!(lines = cart.len(), total = %cart.total(), "Order prepared");
    Ok(OrderHandoff {
        phone,
        message,
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Category, DishRecord, Money};

    fn sample_cart() -> CartStore {
        let bruschetta = DishRecord {
            id: 1,
            name: "Bruschetta Tradicional".into(),
            description: "Pão italiano".into(),
            price: Money::from_cents(1890),
            image: None,
        };
        let file = DishRecord {
            id: 1,
            name: "Filé Mignon ao Molho Madeira".into(),
            description: "Filé".into(),
            price: Money::from_cents(6290),
            image: None,
        };
        let mut cart = CartStore::new();
        cart.add_item(&bruschetta, Category::Entradas);
        cart.add_item(&bruschetta, Category::Entradas);
        cart.add_item(&file, Category::PratosPrincipais);
        cart
    }

    #[test]
    fn test_message_layout() {
        let message = build_order_message(&sample_cart(), Some("12"));
        assert_eq!(
            message,
            "*Pedido - Mesa 12*\n\
             2x Bruschetta Tradicional (Entradas) - R$ 18,90\n\
             1x Filé Mignon ao Molho Madeira (Pratos Principais) - R$ 62,90\n\
             Total: R$ 100,70"
        );
    }

    #[test]
    fn test_empty_cart_gives_empty_message() {
        assert_eq!(build_order_message(&CartStore::new(), Some("3")), "");
    }

    #[test]
    fn test_missing_table_is_marked() {
        let cart = sample_cart();
        for table in [None, Some(""), Some("   ")] {
            let message = build_order_message(&cart, table);
            assert!(message.starts_with("*Pedido - Mesa Não informada*"), "{message}");
        }
    }

    #[test]
    fn test_waiter_lookup() {
        let directory = WaiterDirectory::new("5511000000000")
            .with_waiter("Ana", "5511911112222")
            .with_waiter("Bruno", "5511933334444");

        assert_eq!(directory.contact_for(Some("Ana")), "5511911112222");
        assert_eq!(directory.contact_for(Some(" bruno ")), "5511933334444");
        assert_eq!(directory.contact_for(Some("Carla")), "5511000000000");
        assert_eq!(directory.contact_for(None), "5511000000000");
    }

    #[test]
    fn test_whatsapp_link_encodes_text() {
        let link = whatsapp_link("+55 (11) 91111-2222", "2x Pão & Café\nTotal: R$ 5,00").unwrap();
        assert!(link.starts_with("https://wa.me/5511911112222?text="));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
        assert!(link.contains("%26"));

        let parsed = reqwest::Url::parse(&link).unwrap();
        let (_, text) = parsed.query_pairs().find(|(k, _)| k == "text").unwrap();
        assert_eq!(text, "2x Pão & Café\nTotal: R$ 5,00");
    }

    #[test]
    fn test_whatsapp_link_needs_digits() {
        assert!(matches!(
            whatsapp_link("n/a", "oi"),
            Err(OrderError::InvalidContact(_))
        ));
    }

    #[test]
    fn test_prepare_order() {
        let directory = WaiterDirectory::new("5511000000000").with_waiter("Ana", "5511911112222");
        let handoff = prepare_order(&sample_cart(), Some("7"), Some("Ana"), &directory).unwrap();
        assert_eq!(handoff.phone, "5511911112222");
        assert!(handoff.message.ends_with("Total: R$ 100,70"));
        assert!(handoff.link.starts_with("https://wa.me/5511911112222?text="));

        assert_eq!(
            prepare_order(&CartStore::new(), None, None, &directory),
            Err(OrderError::EmptyCart)
        );
    }
}
