//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! storefront concepts independent of infrastructure concerns:
//! products, users with loyalty points, reviews and cart lines.

pub mod cart;
pub mod password;
pub mod product;
pub mod review;
pub mod seed;
pub mod user;

pub use cart::{cart_total, CartLine, CartSnapshot};
pub use password::Password;
pub use product::{Product, ProductCategory};
pub use review::{NewReview, Review, ReviewStats};
pub use user::{
    generate_referral_code, is_duoc_email, level_for_points, Credentials, RegisterUser, User,
    UserRole, UserStats,
};
