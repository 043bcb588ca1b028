//! # User-Facing Messages
//!
//! Toast texts shown when a cart operation fails. Two catalogs ship: English
//! and Brazilian Portuguese (the storefront's original language).
//!
//! Failures collapse into four notices. Callers that need the precise cause
//! look at the typed error instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message catalog selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English.
    #[default]
    #[serde(rename = "en")]
    En,

    /// Brazilian Portuguese.
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::PtBr => write!(f, "pt-BR"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "pt" | "pt-br" => Ok(Locale::PtBr),
            other => Err(format!(
                "Unknown locale: '{}'. Valid options: en, pt-BR",
                other
            )),
        }
    }
}

/// The notices a cart operation can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Requested amount is above available stock.
    OutOfStock,
    /// Adding a product failed.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Changing a line amount failed.
    UpdateFailed,
}

impl Notice {
    /// Returns the toast text for this notice.
    pub fn text(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Notice::OutOfStock) => "Requested quantity out of stock",
            (Locale::En, Notice::AddFailed) => "Failed to add product",
            (Locale::En, Notice::RemoveFailed) => "Failed to remove product",
            (Locale::En, Notice::UpdateFailed) => "Failed to update product quantity",
            (Locale::PtBr, Notice::OutOfStock) => "Quantidade solicitada fora de estoque",
            (Locale::PtBr, Notice::AddFailed) => "Erro na adição do produto",
            (Locale::PtBr, Notice::RemoveFailed) => "Erro na remoção do produto",
            (Locale::PtBr, Notice::UpdateFailed) => "Erro na alteração de quantidade do produto",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parsing() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("pt_br".parse::<Locale>().unwrap(), Locale::PtBr);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_catalogs() {
        assert_eq!(
            Notice::OutOfStock.text(Locale::PtBr),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(Notice::RemoveFailed.text(Locale::En), "Failed to remove product");
    }
}
