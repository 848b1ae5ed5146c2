//! Service layer - business logic orchestration.
//!
//! Each service is a trait plus one concrete implementation over the
//! store contracts, composed by the `ServiceContainer`.

mod account_service;
mod cart_service;
mod catalog_service;
mod checkout_service;
mod container;
mod import_service;
mod review_service;

pub use account_service::{AccountManager, AccountService};
pub use cart_service::{CartKeeper, CartService};
pub use catalog_service::{CatalogManager, CatalogService};
pub use checkout_service::{CheckoutOrchestrator, CheckoutService, Receipt};
pub use container::{ServiceContainer, Services};
pub use import_service::{CatalogImporter, ImportManager, ImportReport};
pub use review_service::{ReviewManager, ReviewService};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use account_service::MockAccountService;
#[cfg(any(test, feature = "test-utils"))]
pub use cart_service::MockCartService;
#[cfg(any(test, feature = "test-utils"))]
pub use catalog_service::MockCatalogService;
#[cfg(any(test, feature = "test-utils"))]
pub use checkout_service::MockCheckoutService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use import_service::MockCatalogImporter;
#[cfg(any(test, feature = "test-utils"))]
pub use review_service::MockReviewService;
