//! Infrastructure layer - stores, sessions, and remote access.

pub mod live;
pub mod remote;
pub mod repositories;
pub mod session;

pub use remote::{ApiResult, HttpCatalog, ProductDto, RemoteCatalog};
pub use session::{AdminSession, SessionStore, UserSession};

#[cfg(any(test, feature = "test-utils"))]
pub use remote::MockRemoteCatalog;
