//! Cart repository - the persistent-store contract for the active cart.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::CartLine;
use crate::errors::StoreResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Store contract consumed by the cart ledger. One line per product id.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Insert or replace the line for the product
    async fn insert(&self, line: &CartLine) -> StoreResult<()>;

    async fn find_by_product_id(&self, product_id: u64) -> StoreResult<Option<CartLine>>;

    /// Set the quantity on an existing line; missing lines are a no-op
    async fn update_quantity(&self, product_id: u64, quantity: u32) -> StoreResult<()>;

    async fn remove(&self, product_id: u64) -> StoreResult<()>;

    async fn clear(&self) -> StoreResult<()>;

    async fn list(&self) -> StoreResult<Vec<CartLine>>;

    /// Σ price × quantity over all lines, before any discount
    async fn total(&self) -> StoreResult<f64>;

    /// Live feed of the cart lines
    fn watch(&self) -> watch::Receiver<Vec<CartLine>>;
}

/// In-memory cart store with reactive reads.
pub struct CartStore {
    rows: RwLock<HashMap<u64, CartLine>>,
    feed: watch::Sender<Vec<CartLine>>,
}

impl CartStore {
    pub fn new() -> Self {
        let (feed, _) = watch::channel(Vec::new());
        Self {
            rows: RwLock::new(HashMap::new()),
            feed,
        }
    }

    fn snapshot(&self) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = self.rows.read().unwrap().values().cloned().collect();
        lines.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        lines
    }

    fn publish(&self) {
        let _ = self.feed.send(self.snapshot());
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartRepository for CartStore {
    async fn insert(&self, line: &CartLine) -> StoreResult<()> {
        self.rows
            .write()
            .unwrap()
            .insert(line.product_id, line.clone());
        self.publish();
        Ok(())
    }

    async fn find_by_product_id(&self, product_id: u64) -> StoreResult<Option<CartLine>> {
        Ok(self.rows.read().unwrap().get(&product_id).cloned())
    }

    async fn update_quantity(&self, product_id: u64, quantity: u32) -> StoreResult<()> {
        {
            let mut rows = self.rows.write().unwrap();
            if let Some(line) = rows.get_mut(&product_id) {
                line.quantity = quantity;
            }
        }
        self.publish();
        Ok(())
    }

    async fn remove(&self, product_id: u64) -> StoreResult<()> {
        self.rows.write().unwrap().remove(&product_id);
        self.publish();
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        self.rows.write().unwrap().clear();
        self.publish();
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<CartLine>> {
        Ok(self.snapshot())
    }

    async fn total(&self) -> StoreResult<f64> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .map(CartLine::subtotal)
            .sum())
    }

    fn watch(&self) -> watch::Receiver<Vec<CartLine>> {
        self.feed.subscribe()
    }
}
