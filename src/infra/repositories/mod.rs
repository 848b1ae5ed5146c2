//! Repository layer - Data access abstraction
//!
//! Repositories define the read/write contract the storefront core needs
//! from its persistent store, following the Repository pattern for clean
//! separation of concerns. The `*Store` types are the default in-memory
//! implementations; a database-backed store plugs in at the same traits.

mod cart_repository;
mod product_repository;
pub(crate) mod records;
mod review_repository;
mod user_repository;

pub use cart_repository::{CartRepository, CartStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use review_repository::{ReviewRepository, ReviewStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use cart_repository::MockCartRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use review_repository::MockReviewRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
