//! Cart line and cart snapshot types.

use serde::{Deserialize, Serialize};

use crate::config::DUOC_DISCOUNT_MULTIPLIER;
use crate::domain::{Product, ProductCategory};

/// Denormalized cart line: a copy of the product fields taken at add-time
/// plus the quantity. A quantity of zero is never stored; the line is
/// deleted instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: u64,
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_ref: String,
    pub category: ProductCategory,
    pub stock: u32,
    pub average_rating: f32,
    pub review_count: u32,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a product into a cart line
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            code: product.code.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image_ref: product.image_ref.clone(),
            category: product.category,
            stock: product.stock,
            average_rating: product.average_rating,
            review_count: product.review_count,
            quantity,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Sum of `price * quantity` over lines, with the loyalty discount applied
/// when eligible. Presentation-time computation, never persisted per line.
pub fn cart_total(lines: &[CartLine], discount_eligible: bool) -> f64 {
    let subtotal: f64 = lines.iter().map(CartLine::subtotal).sum();
    if discount_eligible {
        subtotal * DUOC_DISCOUNT_MULTIPLIER
    } else {
        subtotal
    }
}

/// Point-in-time view of the cart handed to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: f64,
    pub undiscounted_total: f64,
    pub discount_applied: bool,
}

impl CartSnapshot {
    pub fn new(lines: Vec<CartLine>, discount_eligible: bool) -> Self {
        let total = cart_total(&lines, discount_eligible);
        let undiscounted_total = cart_total(&lines, false);
        Self {
            lines,
            total,
            undiscounted_total,
            discount_applied: discount_eligible,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total item count across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// What the discount saved, zero when not applied
    pub fn savings(&self) -> f64 {
        self.undiscounted_total - self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: u64, price: f64, quantity: u32) -> CartLine {
        CartLine {
            product_id,
            code: format!("P{product_id:03}"),
            name: "Product".to_string(),
            description: String::new(),
            price,
            image_ref: String::new(),
            category: ProductCategory::Other,
            stock: 10,
            average_rating: 0.0,
            review_count: 0,
            quantity,
        }
    }

    #[test]
    fn test_cart_total_with_and_without_discount() {
        let lines = vec![line(1, 1000.0, 2), line(2, 500.0, 1)];
        assert_eq!(cart_total(&lines, false), 2500.0);
        assert_eq!(cart_total(&lines, true), 2000.0);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(cart_total(&[], true), 0.0);
    }

    #[test]
    fn test_snapshot_helpers() {
        let snapshot = CartSnapshot::new(vec![line(1, 1000.0, 2), line(2, 500.0, 1)], true);
        assert_eq!(snapshot.item_count(), 3);
        assert_eq!(snapshot.savings(), 500.0);
        assert!(!snapshot.is_empty());
    }
}
