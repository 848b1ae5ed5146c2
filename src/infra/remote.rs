//! Remote catalog contract and HTTP client.
//!
//! The hosted product API is an external collaborator: every call
//! reports its outcome through the `ApiResult` tagged union instead of
//! erroring across the boundary, and connection failures become
//! `ApiResult::Error` with a message rather than a panic or retry.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Product, ProductCategory};
use crate::errors::{StoreError, StoreResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Request timeout applied to every remote call
const REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a remote catalog operation
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    /// Request in flight (streamed to reactive callers before the outcome)
    Loading,
    Success(T),
    Error {
        message: String,
        http_code: Option<u16>,
    },
}

impl<T> ApiResult<T> {
    pub fn error(message: impl Into<String>, http_code: Option<u16>) -> Self {
        ApiResult::Error {
            message: message.into(),
            http_code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ApiResult::Error { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ApiResult::Loading)
    }

    /// Payload on success, `None` otherwise
    pub fn data_or_none(self) -> Option<T> {
        match self {
            ApiResult::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Error message, or the supplied default for non-error states
    pub fn error_message(&self, default: &str) -> String {
        match self {
            ApiResult::Error { message, .. } => message.clone(),
            _ => default.to_string(),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResult<U> {
        match self {
            ApiResult::Success(data) => ApiResult::Success(f(data)),
            ApiResult::Loading => ApiResult::Loading,
            ApiResult::Error { message, http_code } => ApiResult::Error { message, http_code },
        }
    }
}

/// Product as the hosted API serializes it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: u64,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub stock: u32,
}

impl ProductDto {
    /// Map a wire product into the domain.
    ///
    /// Identity resets to 0 so the local store assigns its own key; a
    /// missing code is derived from the remote id; unknown categories
    /// normalize to `Other`; ratings start at zero (the review ledger
    /// owns aggregates).
    pub fn into_product(self) -> Product {
        Product {
            id: 0,
            code: self.code.unwrap_or_else(|| format!("API-{}", self.id)),
            name: self.name,
            description: self.description,
            price: self.price,
            image_ref: self.image_url.unwrap_or_else(|| "placeholder".to_string()),
            category: ProductCategory::from(self.category.as_deref().unwrap_or("OTHER")),
            stock: self.stock,
            average_rating: 0.0,
            review_count: 0,
        }
    }

    /// Map a domain product onto the wire shape
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            code: Some(product.code.clone()),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image_url: Some(product.image_ref.clone()),
            category: Some(product.category.as_str().to_string()),
            stock: product.stock,
        }
    }
}

/// Remote catalog operations, consumed upstream of the importer.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    async fn fetch_all(&self) -> ApiResult<Vec<Product>>;

    async fn fetch_by_id(&self, id: u64) -> ApiResult<Product>;

    async fn create(&self, product: &Product) -> ApiResult<Product>;

    async fn update(&self, id: u64, product: &Product) -> ApiResult<Product>;

    async fn delete(&self, id: u64) -> ApiResult<()>;
}

/// `RemoteCatalog` over HTTP.
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REMOTE_TIMEOUT)
            .build()
            .map_err(|e| StoreError::internal(format!("HTTP client init failed: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn decode_list(response: reqwest::Response) -> ApiResult<Vec<Product>> {
        let status = response.status();
        if !status.is_success() {
            return ApiResult::error(
                format!("Failed to fetch products: {}", status.as_u16()),
                Some(status.as_u16()),
            );
        }
        match response.json::<Vec<ProductDto>>().await {
            Ok(dtos) => {
                ApiResult::Success(dtos.into_iter().map(ProductDto::into_product).collect())
            }
            Err(e) => ApiResult::error(format!("Malformed product list: {e}"), None),
        }
    }

    async fn decode_one(response: reqwest::Response) -> ApiResult<Product> {
        let status = response.status();
        if !status.is_success() {
            return ApiResult::error(
                format!("Failed to fetch product: {}", status.as_u16()),
                Some(status.as_u16()),
            );
        }
        match response.json::<ProductDto>().await {
            Ok(dto) => ApiResult::Success(dto.into_product()),
            Err(e) => ApiResult::error(format!("Malformed product: {e}"), None),
        }
    }
}

#[async_trait]
impl RemoteCatalog for HttpCatalog {
    async fn fetch_all(&self) -> ApiResult<Vec<Product>> {
        match self.client.get(self.url("products")).send().await {
            Ok(response) => Self::decode_list(response).await,
            Err(e) => ApiResult::error(format!("Connection error: {e}"), None),
        }
    }

    async fn fetch_by_id(&self, id: u64) -> ApiResult<Product> {
        match self.client.get(self.url(&format!("products/{id}"))).send().await {
            Ok(response) => Self::decode_one(response).await,
            Err(e) => ApiResult::error(format!("Connection error: {e}"), None),
        }
    }

    async fn create(&self, product: &Product) -> ApiResult<Product> {
        let dto = ProductDto::from_product(product);
        match self
            .client
            .post(self.url("products"))
            .json(&dto)
            .send()
            .await
        {
            Ok(response) => Self::decode_one(response).await,
            Err(e) => ApiResult::error(format!("Connection error: {e}"), None),
        }
    }

    async fn update(&self, id: u64, product: &Product) -> ApiResult<Product> {
        let dto = ProductDto::from_product(product);
        match self
            .client
            .put(self.url(&format!("products/{id}")))
            .json(&dto)
            .send()
            .await
        {
            Ok(response) => Self::decode_one(response).await,
            Err(e) => ApiResult::error(format!("Connection error: {e}"), None),
        }
    }

    async fn delete(&self, id: u64) -> ApiResult<()> {
        match self
            .client
            .delete(self.url(&format!("products/{id}")))
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    ApiResult::Success(())
                } else {
                    ApiResult::error(
                        format!("Failed to delete product: {}", status.as_u16()),
                        Some(status.as_u16()),
                    )
                }
            }
            Err(e) => ApiResult::error(format!("Connection error: {e}"), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_result_combinators() {
        let ok: ApiResult<i32> = ApiResult::Success(2);
        assert!(ok.is_success());
        assert_eq!(ok.clone().map(|n| n * 2).data_or_none(), Some(4));

        let err: ApiResult<i32> = ApiResult::error("boom", Some(500));
        assert!(err.is_error());
        assert_eq!(err.error_message("fallback"), "boom");
        assert_eq!(err.data_or_none(), None);

        let loading: ApiResult<i32> = ApiResult::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.error_message("fallback"), "fallback");
    }

    #[test]
    fn test_dto_mapping_resets_identity_and_aggregates() {
        let dto = ProductDto {
            id: 42,
            code: None,
            name: "HyperX Keyboard".to_string(),
            description: "Mechanical RGB".to_string(),
            price: 49_990.0,
            image_url: None,
            category: Some("ACCESSORIES".to_string()),
            stock: 15,
        };

        let product = dto.into_product();
        assert_eq!(product.id, 0);
        assert_eq!(product.code, "API-42");
        assert_eq!(product.image_ref, "placeholder");
        assert_eq!(product.category, ProductCategory::Accessories);
        assert_eq!(product.average_rating, 0.0);
        assert_eq!(product.review_count, 0);
    }

    #[test]
    fn test_dto_mapping_normalizes_unknown_category() {
        let dto = ProductDto {
            id: 1,
            code: Some("KB-001".to_string()),
            name: "Keyboard".to_string(),
            description: String::new(),
            price: 1.0,
            image_url: Some("kb".to_string()),
            category: Some("KEYBOARDS".to_string()),
            stock: 1,
        };
        assert_eq!(dto.into_product().category, ProductCategory::Other);
    }
}
