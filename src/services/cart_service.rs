//! Cart service - the active cart's line management and totals.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{CartLine, CartSnapshot, Product};
use crate::errors::StoreResult;
use crate::infra::repositories::CartRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cart service trait for dependency injection.
///
/// Lines are keyed by product id and never carry a zero quantity; a
/// quantity driven to zero deletes the line.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CartService: Send + Sync {
    /// Add a product, merging into the existing line when present
    async fn add_product(&self, product: &Product, quantity: u32) -> StoreResult<()>;

    /// Set an exact quantity; zero removes the line
    async fn set_quantity(&self, product_id: u64, quantity: u32) -> StoreResult<()>;

    async fn remove_product(&self, product_id: u64) -> StoreResult<()>;

    async fn clear(&self) -> StoreResult<()>;

    /// Order total with the loyalty discount applied when eligible
    async fn total(&self, discount_eligible: bool) -> StoreResult<f64>;

    /// Point-in-time view of the cart with both totals
    async fn snapshot(&self, discount_eligible: bool) -> StoreResult<CartSnapshot>;

    /// Total item count across all lines
    async fn item_count(&self) -> StoreResult<u32>;

    /// Live feed of the cart lines
    fn watch(&self) -> watch::Receiver<Vec<CartLine>>;
}

/// Concrete implementation of CartService over the cart store.
pub struct CartKeeper<R: CartRepository> {
    cart: Arc<R>,
}

impl<R: CartRepository> CartKeeper<R> {
    pub fn new(cart: Arc<R>) -> Self {
        Self { cart }
    }
}

#[async_trait]
impl<R: CartRepository> CartService for CartKeeper<R> {
    async fn add_product(&self, product: &Product, quantity: u32) -> StoreResult<()> {
        if quantity == 0 {
            return Ok(());
        }
        let line = match self.cart.find_by_product_id(product.id).await? {
            Some(existing) => CartLine {
                quantity: existing.quantity + quantity,
                ..CartLine::from_product(product, quantity)
            },
            None => CartLine::from_product(product, quantity),
        };
        self.cart.insert(&line).await
    }

    async fn set_quantity(&self, product_id: u64, quantity: u32) -> StoreResult<()> {
        if quantity == 0 {
            self.cart.remove(product_id).await
        } else {
            self.cart.update_quantity(product_id, quantity).await
        }
    }

    async fn remove_product(&self, product_id: u64) -> StoreResult<()> {
        self.cart.remove(product_id).await
    }

    async fn clear(&self) -> StoreResult<()> {
        self.cart.clear().await
    }

    async fn total(&self, discount_eligible: bool) -> StoreResult<f64> {
        let lines = self.cart.list().await?;
        Ok(crate::domain::cart_total(&lines, discount_eligible))
    }

    async fn snapshot(&self, discount_eligible: bool) -> StoreResult<CartSnapshot> {
        let lines = self.cart.list().await?;
        Ok(CartSnapshot::new(lines, discount_eligible))
    }

    async fn item_count(&self) -> StoreResult<u32> {
        let lines = self.cart.list().await?;
        Ok(lines.iter().map(|l| l.quantity).sum())
    }

    fn watch(&self) -> watch::Receiver<Vec<CartLine>> {
        self.cart.watch()
    }
}
