//! Catalog service - product queries, admin maintenance and seeding.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::seed::{initial_products, initial_reviews};
use crate::domain::{Product, ProductCategory, Review};
use crate::errors::{OptionExt, StoreError, StoreResult};
use crate::infra::live;
use crate::infra::repositories::{ProductRepository, ReviewRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Catalog service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Create a product, rejecting a duplicate business code
    async fn add_product(&self, product: Product) -> StoreResult<Product>;

    async fn get_product(&self, id: u64) -> StoreResult<Product>;

    async fn get_product_by_code(&self, code: &str) -> StoreResult<Product>;

    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    async fn products_by_category(&self, category: ProductCategory) -> StoreResult<Vec<Product>>;

    /// Case-insensitive name substring search
    async fn search_products(&self, query: &str) -> StoreResult<Vec<Product>>;

    async fn products_in_stock(&self) -> StoreResult<Vec<Product>>;

    async fn top_rated_products(&self) -> StoreResult<Vec<Product>>;

    async fn update_product(&self, product: Product) -> StoreResult<()>;

    async fn update_stock(&self, id: u64, stock: u32) -> StoreResult<()>;

    /// Delete a product and its reviews
    async fn delete_product(&self, id: u64) -> StoreResult<()>;

    async fn product_count(&self) -> StoreResult<u64>;

    /// Σ price × stock over the whole catalog (admin panel)
    async fn inventory_value(&self) -> StoreResult<f64>;

    /// Load the starter catalog and demo reviews into an empty store;
    /// a populated store is left untouched
    async fn seed(&self) -> StoreResult<()>;

    /// Live feed of all products, ordered by name
    fn watch(&self) -> watch::Receiver<Vec<Product>>;

    /// Live feed filtered to one category
    fn watch_category(&self, category: ProductCategory) -> watch::Receiver<Vec<Product>>;

    /// Live feed filtered to in-stock products
    fn watch_in_stock(&self) -> watch::Receiver<Vec<Product>>;
}

fn check_price(price: f64) -> StoreResult<()> {
    if price < 0.0 || !price.is_finite() {
        return Err(StoreError::validation("Price must be zero or greater"));
    }
    Ok(())
}

/// Concrete implementation of CatalogService over the product and
/// review stores.
pub struct CatalogManager<P: ProductRepository, R: ReviewRepository> {
    products: Arc<P>,
    reviews: Arc<R>,
}

impl<P: ProductRepository, R: ReviewRepository> CatalogManager<P, R> {
    pub fn new(products: Arc<P>, reviews: Arc<R>) -> Self {
        Self { products, reviews }
    }

    /// Write the demo reviews and their aggregates for the seeded catalog
    async fn seed_reviews(&self) -> StoreResult<()> {
        for input in initial_reviews() {
            let review = Review {
                id: Uuid::new_v4(),
                product_code: input.product_code,
                user_id: input.user_id,
                user_name: input.user_name,
                rating: input.rating,
                comment: input.comment,
                posted_at: Utc::now(),
            };
            self.reviews.insert(&review).await?;
        }
        for product in self.products.list().await? {
            let average = self
                .reviews
                .average_for_product(&product.code)
                .await?
                .unwrap_or(0.0);
            let count = self.reviews.count_for_product(&product.code).await?;
            if count > 0 {
                self.products
                    .update_rating(&product.code, average, count)
                    .await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<P: ProductRepository, R: ReviewRepository> CatalogService for CatalogManager<P, R> {
    async fn add_product(&self, product: Product) -> StoreResult<Product> {
        check_price(product.price)?;
        if self.products.find_by_code(&product.code).await?.is_some() {
            return Err(StoreError::AlreadyExists(product.name));
        }
        self.products.insert(&product).await
    }

    async fn get_product(&self, id: u64) -> StoreResult<Product> {
        self.products.find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_product_by_code(&self, code: &str) -> StoreResult<Product> {
        self.products.find_by_code(code).await?.ok_or_not_found()
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.products.list().await
    }

    async fn products_by_category(&self, category: ProductCategory) -> StoreResult<Vec<Product>> {
        self.products.list_by_category(category).await
    }

    async fn search_products(&self, query: &str) -> StoreResult<Vec<Product>> {
        self.products.search(query).await
    }

    async fn products_in_stock(&self) -> StoreResult<Vec<Product>> {
        self.products.list_in_stock().await
    }

    async fn top_rated_products(&self) -> StoreResult<Vec<Product>> {
        self.products.list_top_rated().await
    }

    async fn update_product(&self, product: Product) -> StoreResult<()> {
        check_price(product.price)?;
        self.products.update(&product).await
    }

    async fn update_stock(&self, id: u64, stock: u32) -> StoreResult<()> {
        self.products.update_stock(id, stock).await
    }

    async fn delete_product(&self, id: u64) -> StoreResult<()> {
        let product = self.products.find_by_id(id).await?.ok_or_not_found()?;
        self.products.delete(id).await?;
        self.reviews.delete_for_product(&product.code).await?;
        tracing::info!(code = %product.code, "product deleted");
        Ok(())
    }

    async fn product_count(&self) -> StoreResult<u64> {
        self.products.count().await
    }

    async fn inventory_value(&self) -> StoreResult<f64> {
        self.products.inventory_value().await
    }

    async fn seed(&self) -> StoreResult<()> {
        if self.products.count().await? > 0 {
            return Ok(());
        }
        self.products.insert_many(&initial_products()).await?;
        self.seed_reviews().await?;
        tracing::info!("starter catalog seeded");
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<Vec<Product>> {
        self.products.watch()
    }

    fn watch_category(&self, category: ProductCategory) -> watch::Receiver<Vec<Product>> {
        live::derive(self.products.watch(), move |products| {
            products
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect()
        })
    }

    fn watch_in_stock(&self) -> watch::Receiver<Vec<Product>> {
        live::derive(self.products.watch(), |products| {
            products.iter().filter(|p| p.in_stock()).cloned().collect()
        })
    }
}
