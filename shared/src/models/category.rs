//! Category Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Menu category
///
/// Fixed set. The wire key is the camelCase variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Entradas,
    PratosPrincipais,
    Sobremesas,
    Bebidas,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [
        Category::Entradas,
        Category::PratosPrincipais,
        Category::Sobremesas,
        Category::Bebidas,
    ];

    /// Wire key (`"pratosPrincipais"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Entradas => "entradas",
            Category::PratosPrincipais => "pratosPrincipais",
            Category::Sobremesas => "sobremesas",
            Category::Bebidas => "bebidas",
        }
    }

    /// Human-readable section title
    pub fn label(&self) -> &'static str {
        match self {
            Category::Entradas => "Entradas",
            Category::PratosPrincipais => "Pratos Principais",
            Category::Sobremesas => "Sobremesas",
            Category::Bebidas => "Bebidas",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown category key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
