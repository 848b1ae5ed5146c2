//! Level-Up Gamer storefront core
//!
//! Business-rule library behind a gaming storefront: loyalty points and
//! levels, referral bonuses, the DUOC student discount, purchase-gated
//! product reviews, a cart with discounted totals, checkout
//! orchestration and remote catalog import.
//!
//! # Architecture Layers
//!
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (stores, sessions, remote API)
//! - **errors**: Centralized error handling
//!
//! # Usage
//!
//! ```ignore
//! let config = Config::from_env()?;
//! let services = Services::in_memory(config)?;
//! services.catalog().seed().await?;
//!
//! let user = services.accounts().register(input).await?;
//! services.session().save_user_session((&user).into());
//! let receipt = services.checkout().checkout().await?;
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{Password, Product, ProductCategory, Review, User, UserRole};
pub use errors::{StoreError, StoreResult};
pub use infra::SessionStore;
pub use services::{Receipt, ServiceContainer, Services};
