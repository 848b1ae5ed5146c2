//! Product entity and category enumeration.

use serde::{Deserialize, Serialize};

use crate::config::DUOC_DISCOUNT_MULTIPLIER;

/// Product categories carried over from the Level-Up Gamer web catalog.
/// Unknown wire values normalize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    BoardGames,
    SteamKeys,
    Accessories,
    Consoles,
    GamingPcs,
    GamingChairs,
    Mice,
    MousePads,
    CustomTees,
    Other,
}

impl ProductCategory {
    /// Human-readable label for listings
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductCategory::BoardGames => "Board Games",
            ProductCategory::SteamKeys => "Steam Keys",
            ProductCategory::Accessories => "Accessories",
            ProductCategory::Consoles => "Consoles",
            ProductCategory::GamingPcs => "Gaming PCs",
            ProductCategory::GamingChairs => "Gaming Chairs",
            ProductCategory::Mice => "Mice",
            ProductCategory::MousePads => "Mousepads",
            ProductCategory::CustomTees => "Custom Tees",
            ProductCategory::Other => "Other",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::BoardGames => "BOARD_GAMES",
            ProductCategory::SteamKeys => "STEAM_KEYS",
            ProductCategory::Accessories => "ACCESSORIES",
            ProductCategory::Consoles => "CONSOLES",
            ProductCategory::GamingPcs => "GAMING_PCS",
            ProductCategory::GamingChairs => "GAMING_CHAIRS",
            ProductCategory::Mice => "MICE",
            ProductCategory::MousePads => "MOUSE_PADS",
            ProductCategory::CustomTees => "CUSTOM_TEES",
            ProductCategory::Other => "OTHER",
        }
    }
}

impl From<&str> for ProductCategory {
    fn from(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "BOARD_GAMES" => ProductCategory::BoardGames,
            "STEAM_KEYS" => ProductCategory::SteamKeys,
            "ACCESSORIES" => ProductCategory::Accessories,
            "CONSOLES" => ProductCategory::Consoles,
            "GAMING_PCS" => ProductCategory::GamingPcs,
            "GAMING_CHAIRS" => ProductCategory::GamingChairs,
            "MICE" => ProductCategory::Mice,
            "MOUSE_PADS" => ProductCategory::MousePads,
            "CUSTOM_TEES" => ProductCategory::CustomTees,
            _ => ProductCategory::Other,
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog product.
///
/// `id` is the local surrogate key assigned by the catalog store (0 =
/// not yet persisted); `code` is the stable external business identifier.
/// `average_rating` and `review_count` are always recomputed from the
/// review ledger for this code, never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_ref: String,
    pub category: ProductCategory,
    pub stock: u32,
    pub average_rating: f32,
    pub review_count: u32,
}

impl Product {
    /// True while there is stock to sell
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Price after the DUOC student discount, when eligible
    pub fn discounted_price(&self, duoc_eligible: bool) -> f64 {
        if duoc_eligible {
            self.price * DUOC_DISCOUNT_MULTIPLIER
        } else {
            self.price
        }
    }

    /// Price with thousands separators, e.g. `$1.299.990`
    pub fn formatted_price(&self) -> String {
        let digits = (self.price as i64).to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        format!("${grouped}")
    }

    /// Whole stars earned so far, truncated like the source app renders them
    pub fn full_stars(&self) -> u8 {
        (self.average_rating as u8).min(5)
    }
}
