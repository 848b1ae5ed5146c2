//! Service container - centralized service access.
//!
//! SOLID (DIP): depends on service traits, not implementations.

use std::sync::Arc;

use super::{
    AccountManager, AccountService, CartKeeper, CartService, CatalogImporter, CatalogManager,
    CatalogService, CheckoutOrchestrator, CheckoutService, ImportManager, ReviewManager,
    ReviewService,
};
use crate::config::Config;
use crate::errors::StoreResult;
use crate::infra::repositories::{CartStore, ProductStore, ReviewStore, UserStore};
use crate::infra::{HttpCatalog, SessionStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all storefront services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn accounts(&self) -> Arc<dyn AccountService>;

    fn reviews(&self) -> Arc<dyn ReviewService>;

    fn cart(&self) -> Arc<dyn CartService>;

    fn catalog(&self) -> Arc<dyn CatalogService>;

    fn importer(&self) -> Arc<dyn CatalogImporter>;

    fn checkout(&self) -> Arc<dyn CheckoutService>;

    /// The process-wide session store
    fn session(&self) -> Arc<SessionStore>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    account_service: Arc<dyn AccountService>,
    review_service: Arc<dyn ReviewService>,
    cart_service: Arc<dyn CartService>,
    catalog_service: Arc<dyn CatalogService>,
    import_service: Arc<dyn CatalogImporter>,
    checkout_service: Arc<dyn CheckoutService>,
    session_store: Arc<SessionStore>,
}

impl Services {
    /// Create a new service container from already-built services
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        account_service: Arc<dyn AccountService>,
        review_service: Arc<dyn ReviewService>,
        cart_service: Arc<dyn CartService>,
        catalog_service: Arc<dyn CatalogService>,
        import_service: Arc<dyn CatalogImporter>,
        checkout_service: Arc<dyn CheckoutService>,
        session_store: Arc<SessionStore>,
    ) -> Self {
        Self {
            account_service,
            review_service,
            cart_service,
            catalog_service,
            import_service,
            checkout_service,
            session_store,
        }
    }

    /// Wire the full stack over the in-memory stores.
    ///
    /// The remote catalog client points at the configured API base URL.
    pub fn in_memory(config: Config) -> StoreResult<Self> {
        let users = Arc::new(UserStore::new());
        let products = Arc::new(ProductStore::new());
        let reviews = Arc::new(ReviewStore::new());
        let cart = Arc::new(CartStore::new());
        let session_store = Arc::new(SessionStore::new());
        let remote = Arc::new(HttpCatalog::new(config.catalog_api_url.clone())?);

        let account_service: Arc<dyn AccountService> =
            Arc::new(AccountManager::new(users, config));
        let review_service: Arc<dyn ReviewService> =
            Arc::new(ReviewManager::new(reviews.clone(), products.clone()));
        let cart_service: Arc<dyn CartService> = Arc::new(CartKeeper::new(cart));
        let catalog_service: Arc<dyn CatalogService> =
            Arc::new(CatalogManager::new(products.clone(), reviews));
        let import_service: Arc<dyn CatalogImporter> =
            Arc::new(ImportManager::new(products, remote));
        let checkout_service: Arc<dyn CheckoutService> = Arc::new(CheckoutOrchestrator::new(
            account_service.clone(),
            cart_service.clone(),
            session_store.clone(),
        ));

        Ok(Self {
            account_service,
            review_service,
            cart_service,
            catalog_service,
            import_service,
            checkout_service,
            session_store,
        })
    }
}

impl ServiceContainer for Services {
    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }

    fn cart(&self) -> Arc<dyn CartService> {
        self.cart_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    fn importer(&self) -> Arc<dyn CatalogImporter> {
        self.import_service.clone()
    }

    fn checkout(&self) -> Arc<dyn CheckoutService> {
        self.checkout_service.clone()
    }

    fn session(&self) -> Arc<SessionStore> {
        self.session_store.clone()
    }
}
