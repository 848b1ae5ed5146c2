//! Product repository - the persistent-store contract for the catalog.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{Product, ProductCategory};
use crate::errors::{StoreError, StoreResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Store contract consumed by the catalog service, importer, review
/// ledger (rating write-back) and admin panel.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product, assigning a fresh surrogate id when `id == 0`;
    /// an existing id replaces on conflict. Returns the stored product.
    async fn insert(&self, product: &Product) -> StoreResult<Product>;

    /// Batch insert with the same replace-on-conflict semantics
    async fn insert_many(&self, products: &[Product]) -> StoreResult<()>;

    async fn find_by_id(&self, id: u64) -> StoreResult<Option<Product>>;

    /// Point read by the stable business code
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Product>>;

    /// Case-insensitive exact name lookup (importer dedup)
    async fn find_by_exact_name(&self, name: &str) -> StoreResult<Option<Product>>;

    /// All products ordered by name
    async fn list(&self) -> StoreResult<Vec<Product>>;

    async fn list_by_category(&self, category: ProductCategory) -> StoreResult<Vec<Product>>;

    /// Case-insensitive name substring search
    async fn search(&self, query: &str) -> StoreResult<Vec<Product>>;

    async fn list_in_stock(&self) -> StoreResult<Vec<Product>>;

    /// Ordered by rating desc, then review count desc
    async fn list_top_rated(&self) -> StoreResult<Vec<Product>>;

    /// Replace an existing product record
    async fn update(&self, product: &Product) -> StoreResult<()>;

    /// Targeted stock update
    async fn update_stock(&self, id: u64, stock: u32) -> StoreResult<()>;

    /// Targeted rating write-back, keyed by business code
    async fn update_rating(&self, code: &str, average: f32, count: u32) -> StoreResult<()>;

    async fn delete(&self, id: u64) -> StoreResult<()>;

    async fn delete_all(&self) -> StoreResult<()>;

    async fn count(&self) -> StoreResult<u64>;

    /// Σ price × stock over the whole catalog
    async fn inventory_value(&self) -> StoreResult<f64>;

    /// Live feed of all products, ordered by name
    fn watch(&self) -> watch::Receiver<Vec<Product>>;
}

struct ProductRows {
    by_id: HashMap<u64, Product>,
    next_id: u64,
}

/// In-memory catalog store with reactive reads.
pub struct ProductStore {
    rows: RwLock<ProductRows>,
    feed: watch::Sender<Vec<Product>>,
}

fn by_name(a: &Product, b: &Product) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

impl ProductStore {
    pub fn new() -> Self {
        let (feed, _) = watch::channel(Vec::new());
        Self {
            rows: RwLock::new(ProductRows {
                by_id: HashMap::new(),
                next_id: 1,
            }),
            feed,
        }
    }

    fn sorted_by_name(&self) -> Vec<Product> {
        let rows = self.rows.read().unwrap();
        let mut products: Vec<Product> = rows.by_id.values().cloned().collect();
        products.sort_by(by_name);
        products
    }

    fn publish(&self) {
        let _ = self.feed.send(self.sorted_by_name());
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn insert(&self, product: &Product) -> StoreResult<Product> {
        let stored = {
            let mut rows = self.rows.write().unwrap();
            let mut stored = product.clone();
            if stored.id == 0 {
                stored.id = rows.next_id;
                rows.next_id += 1;
            } else {
                rows.next_id = rows.next_id.max(stored.id + 1);
            }
            rows.by_id.insert(stored.id, stored.clone());
            stored
        };
        self.publish();
        Ok(stored)
    }

    async fn insert_many(&self, products: &[Product]) -> StoreResult<()> {
        {
            let mut rows = self.rows.write().unwrap();
            for product in products {
                let mut stored = product.clone();
                if stored.id == 0 {
                    stored.id = rows.next_id;
                    rows.next_id += 1;
                } else {
                    rows.next_id = rows.next_id.max(stored.id + 1);
                }
                rows.by_id.insert(stored.id, stored);
            }
        }
        self.publish();
        Ok(())
    }

    async fn find_by_id(&self, id: u64) -> StoreResult<Option<Product>> {
        Ok(self.rows.read().unwrap().by_id.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Product>> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .by_id
            .values()
            .find(|p| p.code == code)
            .cloned())
    }

    async fn find_by_exact_name(&self, name: &str) -> StoreResult<Option<Product>> {
        let needle = name.to_lowercase();
        Ok(self
            .rows
            .read()
            .unwrap()
            .by_id
            .values()
            .find(|p| p.name.to_lowercase() == needle)
            .cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(self.sorted_by_name())
    }

    async fn list_by_category(&self, category: ProductCategory) -> StoreResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .rows
            .read()
            .unwrap()
            .by_id
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect();
        products.sort_by(by_name);
        Ok(products)
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Product>> {
        let needle = query.to_lowercase();
        let mut products: Vec<Product> = self
            .rows
            .read()
            .unwrap()
            .by_id
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        products.sort_by(by_name);
        Ok(products)
    }

    async fn list_in_stock(&self) -> StoreResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .rows
            .read()
            .unwrap()
            .by_id
            .values()
            .filter(|p| p.stock > 0)
            .cloned()
            .collect();
        products.sort_by(by_name);
        Ok(products)
    }

    async fn list_top_rated(&self) -> StoreResult<Vec<Product>> {
        let mut products: Vec<Product> =
            self.rows.read().unwrap().by_id.values().cloned().collect();
        products.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(Ordering::Equal)
                .then(b.review_count.cmp(&a.review_count))
        });
        Ok(products)
    }

    async fn update(&self, product: &Product) -> StoreResult<()> {
        {
            let mut rows = self.rows.write().unwrap();
            if !rows.by_id.contains_key(&product.id) {
                return Err(StoreError::NotFound);
            }
            rows.by_id.insert(product.id, product.clone());
        }
        self.publish();
        Ok(())
    }

    async fn update_stock(&self, id: u64, stock: u32) -> StoreResult<()> {
        {
            let mut rows = self.rows.write().unwrap();
            if let Some(product) = rows.by_id.get_mut(&id) {
                product.stock = stock;
            }
        }
        self.publish();
        Ok(())
    }

    async fn update_rating(&self, code: &str, average: f32, count: u32) -> StoreResult<()> {
        {
            let mut rows = self.rows.write().unwrap();
            if let Some(product) = rows.by_id.values_mut().find(|p| p.code == code) {
                product.average_rating = average;
                product.review_count = count;
            }
        }
        self.publish();
        Ok(())
    }

    async fn delete(&self, id: u64) -> StoreResult<()> {
        {
            let mut rows = self.rows.write().unwrap();
            rows.by_id.remove(&id);
        }
        self.publish();
        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<()> {
        self.rows.write().unwrap().by_id.clear();
        self.publish();
        Ok(())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.rows.read().unwrap().by_id.len() as u64)
    }

    async fn inventory_value(&self) -> StoreResult<f64> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .by_id
            .values()
            .map(|p| p.price * p.stock as f64)
            .sum())
    }

    fn watch(&self) -> watch::Receiver<Vec<Product>> {
        self.feed.subscribe()
    }
}
