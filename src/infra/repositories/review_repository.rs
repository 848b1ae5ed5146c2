//! Review repository - the persistent-store contract for reviews.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::Review;
use crate::errors::{StoreError, StoreResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Store contract consumed by the review ledger.
///
/// All ordered reads return newest-first by `posted_at`. Aggregates read
/// as zero/None when no rows match rather than failing.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn insert(&self, review: &Review) -> StoreResult<()>;

    async fn update(&self, review: &Review) -> StoreResult<()>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Review>>;

    /// One-review-per-user-per-product existence check
    async fn exists(&self, user_id: Uuid, product_code: &str) -> StoreResult<bool>;

    async fn list_for_product(&self, product_code: &str) -> StoreResult<Vec<Review>>;

    async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Review>>;

    /// The community's most recent reviews
    async fn latest(&self, limit: usize) -> StoreResult<Vec<Review>>;

    /// Arithmetic mean of ratings for a product, `None` with no reviews
    async fn average_for_product(&self, product_code: &str) -> StoreResult<Option<f32>>;

    async fn count_for_product(&self, product_code: &str) -> StoreResult<u32>;

    /// Drop all reviews of a product (admin product deletion)
    async fn delete_for_product(&self, product_code: &str) -> StoreResult<()>;

    /// Live feed of all reviews, newest first
    fn watch(&self) -> watch::Receiver<Vec<Review>>;
}

/// In-memory review store with reactive reads.
pub struct ReviewStore {
    rows: RwLock<HashMap<Uuid, Review>>,
    feed: watch::Sender<Vec<Review>>,
}

fn newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
}

impl ReviewStore {
    pub fn new() -> Self {
        let (feed, _) = watch::channel(Vec::new());
        Self {
            rows: RwLock::new(HashMap::new()),
            feed,
        }
    }

    fn publish(&self) {
        let mut reviews: Vec<Review> = self.rows.read().unwrap().values().cloned().collect();
        newest_first(&mut reviews);
        let _ = self.feed.send(reviews);
    }
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn insert(&self, review: &Review) -> StoreResult<()> {
        self.rows.write().unwrap().insert(review.id, review.clone());
        self.publish();
        Ok(())
    }

    async fn update(&self, review: &Review) -> StoreResult<()> {
        {
            let mut rows = self.rows.write().unwrap();
            if !rows.contains_key(&review.id) {
                return Err(StoreError::NotFound);
            }
            rows.insert(review.id, review.clone());
        }
        self.publish();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.rows.write().unwrap().remove(&id);
        self.publish();
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Review>> {
        Ok(self.rows.read().unwrap().get(&id).cloned())
    }

    async fn exists(&self, user_id: Uuid, product_code: &str) -> StoreResult<bool> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .any(|r| r.user_id == user_id && r.product_code == product_code))
    }

    async fn list_for_product(&self, product_code: &str) -> StoreResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .rows
            .read()
            .unwrap()
            .values()
            .filter(|r| r.product_code == product_code)
            .cloned()
            .collect();
        newest_first(&mut reviews);
        Ok(reviews)
    }

    async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .rows
            .read()
            .unwrap()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut reviews);
        Ok(reviews)
    }

    async fn latest(&self, limit: usize) -> StoreResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self.rows.read().unwrap().values().cloned().collect();
        newest_first(&mut reviews);
        reviews.truncate(limit);
        Ok(reviews)
    }

    async fn average_for_product(&self, product_code: &str) -> StoreResult<Option<f32>> {
        let rows = self.rows.read().unwrap();
        let ratings: Vec<u8> = rows
            .values()
            .filter(|r| r.product_code == product_code)
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return Ok(None);
        }
        let sum: u32 = ratings.iter().map(|r| *r as u32).sum();
        Ok(Some(sum as f32 / ratings.len() as f32))
    }

    async fn count_for_product(&self, product_code: &str) -> StoreResult<u32> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .filter(|r| r.product_code == product_code)
            .count() as u32)
    }

    async fn delete_for_product(&self, product_code: &str) -> StoreResult<()> {
        self.rows
            .write()
            .unwrap()
            .retain(|_, r| r.product_code != product_code);
        self.publish();
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<Vec<Review>> {
        self.feed.subscribe()
    }
}
