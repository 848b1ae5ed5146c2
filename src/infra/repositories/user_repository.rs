//! User repository - the persistent-store contract for accounts.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use super::records::UserRecord;
use crate::domain::User;
use crate::errors::{StoreError, StoreResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Store contract consumed by the account ledger.
///
/// Write operations replace on conflict; targeted updates that match no
/// row are no-ops, as the underlying store's field updates behave.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or replace a user by id
    async fn insert(&self, user: &User) -> StoreResult<()>;

    /// Replace an existing user record
    async fn update(&self, user: &User) -> StoreResult<()>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Exact (case-sensitive) email match
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_referral_code(&self, code: &str) -> StoreResult<Option<User>>;

    /// Targeted update of the loyalty fields
    async fn update_points_and_level(&self, id: Uuid, points: i64, level: i64) -> StoreResult<()>;

    /// Targeted update of the purchased-products blob
    async fn update_purchased_codes(&self, id: Uuid, codes_json: &str) -> StoreResult<()>;

    /// Bump the referral counter of the code's owner
    async fn increment_referrals(&self, referral_code: &str) -> StoreResult<()>;

    async fn count(&self) -> StoreResult<u64>;

    async fn count_duoc(&self) -> StoreResult<u64>;

    /// Live feed of all users, newest registration first
    fn watch(&self) -> watch::Receiver<Vec<User>>;
}

/// In-memory user store with reactive reads.
pub struct UserStore {
    rows: RwLock<HashMap<Uuid, UserRecord>>,
    feed: watch::Sender<Vec<User>>,
}

impl UserStore {
    pub fn new() -> Self {
        let (feed, _) = watch::channel(Vec::new());
        Self {
            rows: RwLock::new(HashMap::new()),
            feed,
        }
    }

    fn publish(&self) {
        let rows = self.rows.read().unwrap();
        let mut users: Vec<User> = rows.values().map(User::from).collect();
        users.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
        drop(rows);
        // No subscribers is fine
        let _ = self.feed.send(users);
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn insert(&self, user: &User) -> StoreResult<()> {
        self.rows
            .write()
            .unwrap()
            .insert(user.id, UserRecord::from(user));
        self.publish();
        Ok(())
    }

    async fn update(&self, user: &User) -> StoreResult<()> {
        {
            let mut rows = self.rows.write().unwrap();
            if !rows.contains_key(&user.id) {
                return Err(StoreError::NotFound);
            }
            rows.insert(user.id, UserRecord::from(user));
        }
        self.publish();
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.rows.read().unwrap().get(&id).map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .find(|r| r.email == email)
            .map(User::from))
    }

    async fn find_by_referral_code(&self, code: &str) -> StoreResult<Option<User>> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .find(|r| r.referral_code == code)
            .map(User::from))
    }

    async fn update_points_and_level(&self, id: Uuid, points: i64, level: i64) -> StoreResult<()> {
        {
            let mut rows = self.rows.write().unwrap();
            if let Some(record) = rows.get_mut(&id) {
                record.points = points;
                record.level = level;
            }
        }
        self.publish();
        Ok(())
    }

    async fn update_purchased_codes(&self, id: Uuid, codes_json: &str) -> StoreResult<()> {
        {
            let mut rows = self.rows.write().unwrap();
            if let Some(record) = rows.get_mut(&id) {
                record.purchased_codes_json = codes_json.to_string();
            }
        }
        self.publish();
        Ok(())
    }

    async fn increment_referrals(&self, referral_code: &str) -> StoreResult<()> {
        {
            let mut rows = self.rows.write().unwrap();
            if let Some(record) = rows
                .values_mut()
                .find(|r| r.referral_code == referral_code)
            {
                record.referral_count += 1;
            }
        }
        self.publish();
        Ok(())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.rows.read().unwrap().len() as u64)
    }

    async fn count_duoc(&self) -> StoreResult<u64> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .filter(|r| r.duoc_eligible)
            .count() as u64)
    }

    fn watch(&self) -> watch::Receiver<Vec<User>> {
        self.feed.subscribe()
    }
}
