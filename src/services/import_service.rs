//! Importer - brings remote catalog products into the local store.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::Product;
use crate::errors::{StoreError, StoreResult};
use crate::infra::RemoteCatalog;
use crate::infra::repositories::ProductRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Outcome of a batch import
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub total: usize,
    pub imported: usize,
    pub duplicated: usize,
    pub errors: Vec<String>,
}

/// Importer trait for dependency injection.
///
/// Deduplication is by exact product name, case-insensitive. Imported
/// products get a locally assigned id regardless of what the source
/// carried.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogImporter: Send + Sync {
    /// Import one product, rejecting a name already in the catalog
    async fn import(&self, product: Product) -> StoreResult<Product>;

    /// Import a batch, never aborting: duplicates and per-item failures
    /// are tallied in the report while the rest proceed
    async fn import_many(&self, products: Vec<Product>) -> ImportReport;

    /// Fetch the remote catalog and import everything it returns
    async fn sync_from_remote(&self) -> StoreResult<ImportReport>;
}

/// Concrete implementation of CatalogImporter.
pub struct ImportManager<P: ProductRepository> {
    products: Arc<P>,
    remote: Arc<dyn RemoteCatalog>,
}

impl<P: ProductRepository> ImportManager<P> {
    pub fn new(products: Arc<P>, remote: Arc<dyn RemoteCatalog>) -> Self {
        Self { products, remote }
    }
}

#[async_trait]
impl<P: ProductRepository> CatalogImporter for ImportManager<P> {
    async fn import(&self, product: Product) -> StoreResult<Product> {
        if self
            .products
            .find_by_exact_name(&product.name)
            .await?
            .is_some()
        {
            return Err(StoreError::AlreadyExists(product.name));
        }
        let mut product = product;
        // The local store owns identity
        product.id = 0;
        self.products.insert(&product).await
    }

    async fn import_many(&self, products: Vec<Product>) -> ImportReport {
        let mut report = ImportReport {
            total: products.len(),
            ..ImportReport::default()
        };
        for product in products {
            let name = product.name.clone();
            match self.import(product).await {
                Ok(_) => report.imported += 1,
                Err(StoreError::AlreadyExists(_)) => {
                    report.duplicated += 1;
                    report.errors.push(format!("'{name}' already exists"));
                }
                Err(e) => {
                    report.errors.push(format!("'{name}': {}", e.user_message()));
                }
            }
        }
        tracing::info!(
            total = report.total,
            imported = report.imported,
            duplicated = report.duplicated,
            "catalog import finished"
        );
        report
    }

    async fn sync_from_remote(&self) -> StoreResult<ImportReport> {
        match self.remote.fetch_all().await {
            crate::infra::ApiResult::Success(products) => Ok(self.import_many(products).await),
            other => Err(StoreError::internal(
                other.error_message("remote catalog unavailable"),
            )),
        }
    }
}
