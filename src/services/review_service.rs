//! Review service - the review ledger and its rating write-back.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;
use validator::Validate;

use crate::config::{COMMENT_MAX_LENGTH, COMMENT_MIN_LENGTH, DEFAULT_LATEST_REVIEWS_LIMIT, RATING_MAX, RATING_MIN};
use crate::domain::{NewReview, Review, ReviewStats};
use crate::errors::{OptionExt, StoreError, StoreResult};
use crate::infra::repositories::{ProductRepository, ReviewRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Review service trait for dependency injection.
///
/// Every write recomputes the reviewed product's aggregates from the
/// ledger and writes them back to the catalog.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Post a review. At most one per user per product.
    async fn add_review(&self, input: NewReview) -> StoreResult<Review>;

    async fn update_review(&self, id: Uuid, rating: u8, comment: String) -> StoreResult<Review>;

    async fn delete_review(&self, id: Uuid) -> StoreResult<()>;

    async fn has_reviewed(&self, user_id: Uuid, product_code: &str) -> StoreResult<bool>;

    async fn reviews_for_product(&self, product_code: &str) -> StoreResult<Vec<Review>>;

    async fn reviews_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Review>>;

    /// The community's most recent reviews across all products
    async fn latest_reviews(&self) -> StoreResult<Vec<Review>>;

    /// Aggregates straight from the ledger, zeroed with no reviews
    async fn product_stats(&self, product_code: &str) -> StoreResult<ReviewStats>;

    /// Live feed of all reviews, newest first
    fn watch_reviews(&self) -> watch::Receiver<Vec<Review>>;
}

/// Concrete implementation of ReviewService over the review and
/// product stores.
pub struct ReviewManager<R: ReviewRepository, P: ProductRepository> {
    reviews: Arc<R>,
    products: Arc<P>,
}

impl<R: ReviewRepository, P: ProductRepository> ReviewManager<R, P> {
    pub fn new(reviews: Arc<R>, products: Arc<P>) -> Self {
        Self { reviews, products }
    }

    /// Recompute the product's aggregates from the ledger and write
    /// them back to the catalog row
    async fn refresh_aggregates(&self, product_code: &str) -> StoreResult<()> {
        let average = self
            .reviews
            .average_for_product(product_code)
            .await?
            .unwrap_or(0.0);
        let count = self.reviews.count_for_product(product_code).await?;
        self.products
            .update_rating(product_code, average, count)
            .await
    }

    fn check_comment(comment: &str) -> StoreResult<()> {
        let len = comment.trim().chars().count();
        if len < COMMENT_MIN_LENGTH || len > COMMENT_MAX_LENGTH {
            return Err(StoreError::validation("Comment must be 10-500 characters"));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: ReviewRepository, P: ProductRepository> ReviewService for ReviewManager<R, P> {
    async fn add_review(&self, input: NewReview) -> StoreResult<Review> {
        input.validate()?;
        // The length rule counts raw characters; an all-whitespace
        // comment would slip through it
        Self::check_comment(&input.comment)?;

        if self.reviews.exists(input.user_id, &input.product_code).await? {
            return Err(StoreError::DuplicateReview);
        }

        let review = Review {
            id: Uuid::new_v4(),
            product_code: input.product_code,
            user_id: input.user_id,
            user_name: input.user_name,
            rating: input.rating,
            comment: input.comment.trim().to_string(),
            posted_at: Utc::now(),
        };
        self.reviews.insert(&review).await?;
        self.refresh_aggregates(&review.product_code).await?;

        tracing::debug!(product = %review.product_code, rating = review.rating, "review posted");
        Ok(review)
    }

    async fn update_review(&self, id: Uuid, rating: u8, comment: String) -> StoreResult<Review> {
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(StoreError::validation("Rating must be between 1 and 5"));
        }
        Self::check_comment(&comment)?;

        let mut review = self.reviews.find_by_id(id).await?.ok_or_not_found()?;
        review.rating = rating;
        review.comment = comment.trim().to_string();
        self.reviews.update(&review).await?;
        self.refresh_aggregates(&review.product_code).await?;
        Ok(review)
    }

    async fn delete_review(&self, id: Uuid) -> StoreResult<()> {
        let review = self.reviews.find_by_id(id).await?.ok_or_not_found()?;
        self.reviews.delete(id).await?;
        self.refresh_aggregates(&review.product_code).await
    }

    async fn has_reviewed(&self, user_id: Uuid, product_code: &str) -> StoreResult<bool> {
        self.reviews.exists(user_id, product_code).await
    }

    async fn reviews_for_product(&self, product_code: &str) -> StoreResult<Vec<Review>> {
        self.reviews.list_for_product(product_code).await
    }

    async fn reviews_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Review>> {
        self.reviews.list_for_user(user_id).await
    }

    async fn latest_reviews(&self) -> StoreResult<Vec<Review>> {
        self.reviews.latest(DEFAULT_LATEST_REVIEWS_LIMIT).await
    }

    async fn product_stats(&self, product_code: &str) -> StoreResult<ReviewStats> {
        Ok(ReviewStats {
            average_rating: self
                .reviews
                .average_for_product(product_code)
                .await?
                .unwrap_or(0.0),
            review_count: self.reviews.count_for_product(product_code).await?,
        })
    }

    fn watch_reviews(&self) -> watch::Receiver<Vec<Review>> {
        self.reviews.watch()
    }
}
