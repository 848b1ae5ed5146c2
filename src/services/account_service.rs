//! Account service - registration, login and the loyalty ledger.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;
use validator::Validate;

use crate::config::{
    Config, CURRENCY_PER_POINT, MAX_REFERRAL_CODE_ATTEMPTS, MIN_AGE, MIN_NAME_LENGTH,
    REFERRAL_BONUS_POINTS, REVIEW_BONUS_POINTS,
};
use crate::domain::{
    generate_referral_code, is_duoc_email, level_for_points, Credentials, Password, RegisterUser,
    User, UserRole, UserStats,
};
use crate::errors::{OptionExt, StoreError, StoreResult};
use crate::infra::repositories::records::encode_purchased_codes;
use crate::infra::repositories::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new account, crediting referral bonuses when a valid
    /// referral code is supplied
    async fn register(&self, input: RegisterUser) -> StoreResult<User>;

    /// Verify credentials. `Ok(None)` on unknown email or bad password;
    /// errors are reserved for store failures.
    async fn login(&self, credentials: &Credentials) -> StoreResult<Option<User>>;

    /// Verify the configured admin credentials
    fn login_admin(&self, username: &str, password: &str) -> bool;

    async fn get_user(&self, id: Uuid) -> StoreResult<User>;

    /// Credit one point per 1000 CLP of order total, returning the
    /// points earned
    async fn add_points_for_purchase(&self, user_id: Uuid, order_total: f64) -> StoreResult<i64>;

    /// Credit the flat review bonus
    async fn add_points_for_review(&self, user_id: Uuid) -> StoreResult<()>;

    /// Append product codes to the user's purchase history (idempotent
    /// per code)
    async fn record_purchase(&self, user_id: Uuid, product_codes: &[String]) -> StoreResult<()>;

    /// Update mutable profile fields; `None` leaves a field untouched
    async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        age: Option<u8>,
    ) -> StoreResult<User>;

    /// Whether a referral code belongs to an existing user
    async fn validate_referral_code(&self, code: &str) -> StoreResult<bool>;

    async fn user_stats(&self) -> StoreResult<UserStats>;

    /// Live feed of all users, newest registration first
    fn watch_users(&self) -> watch::Receiver<Vec<User>>;
}

/// Concrete implementation of AccountService over the user store.
pub struct AccountManager<R: UserRepository> {
    users: Arc<R>,
    config: Config,
}

impl<R: UserRepository> AccountManager<R> {
    pub fn new(users: Arc<R>, config: Config) -> Self {
        Self { users, config }
    }

    /// Generate a referral code not yet owned by any user
    async fn unique_referral_code(&self) -> StoreResult<String> {
        for _ in 0..MAX_REFERRAL_CODE_ATTEMPTS {
            let code = generate_referral_code();
            if self.users.find_by_referral_code(&code).await?.is_none() {
                return Ok(code);
            }
        }
        Err(StoreError::internal("referral code space exhausted"))
    }

    /// Credit points and recompute the level from the new balance
    async fn credit_points(&self, user: &User, bonus: i64) -> StoreResult<()> {
        let points = user.points + bonus;
        self.users
            .update_points_and_level(user.id, points, level_for_points(points))
            .await
    }
}

#[async_trait]
impl<R: UserRepository> AccountService for AccountManager<R> {
    async fn register(&self, input: RegisterUser) -> StoreResult<User> {
        input.validate()?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(StoreError::DuplicateEmail);
        }

        // An unknown or empty referral code earns nothing but never
        // blocks registration
        let referrer = match input.referral_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => self.users.find_by_referral_code(code).await?,
            _ => None,
        };
        let starting_points = if referrer.is_some() {
            REFERRAL_BONUS_POINTS
        } else {
            0
        };

        let duoc_eligible = is_duoc_email(&input.email);
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            age: input.age,
            password_hash: Password::new(&input.password)?.into_string(),
            points: starting_points,
            level: level_for_points(starting_points),
            referral_code: self.unique_referral_code().await?,
            referred_by: referrer.as_ref().map(|r| r.referral_code.clone()),
            referral_count: 0,
            duoc_eligible,
            purchased_codes: Vec::new(),
            role: UserRole::User,
            registered_at: Utc::now(),
        };
        self.users.insert(&user).await?;

        if let Some(referrer) = referrer {
            self.credit_points(&referrer, REFERRAL_BONUS_POINTS).await?;
            self.users
                .increment_referrals(&referrer.referral_code)
                .await?;
        }

        tracing::info!(user_id = %user.id, duoc = user.duoc_eligible, "user registered");
        Ok(user)
    }

    async fn login(&self, credentials: &Credentials) -> StoreResult<Option<User>> {
        match self.users.find_by_email(&credentials.email).await? {
            Some(user) => {
                if Password::from_hash(user.password_hash.clone()).verify(&credentials.password) {
                    Ok(Some(user))
                } else {
                    Ok(None)
                }
            }
            None => {
                // Burn comparable time so unknown emails are not
                // distinguishable by response latency
                let _ = Password::new(&credentials.password);
                Ok(None)
            }
        }
    }

    fn login_admin(&self, username: &str, password: &str) -> bool {
        self.config.verify_admin(username, password)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<User> {
        self.users.find_by_id(id).await?.ok_or_not_found()
    }

    async fn add_points_for_purchase(&self, user_id: Uuid, order_total: f64) -> StoreResult<i64> {
        let earned = (order_total / CURRENCY_PER_POINT).floor() as i64;
        if earned > 0 {
            let user = self.get_user(user_id).await?;
            self.credit_points(&user, earned).await?;
        }
        Ok(earned)
    }

    async fn add_points_for_review(&self, user_id: Uuid) -> StoreResult<()> {
        let user = self.get_user(user_id).await?;
        self.credit_points(&user, REVIEW_BONUS_POINTS).await
    }

    async fn record_purchase(&self, user_id: Uuid, product_codes: &[String]) -> StoreResult<()> {
        let user = self.get_user(user_id).await?;
        let mut codes = user.purchased_codes;
        for code in product_codes {
            if !codes.contains(code) {
                codes.push(code.clone());
            }
        }
        self.users
            .update_purchased_codes(user_id, &encode_purchased_codes(&codes))
            .await
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        age: Option<u8>,
    ) -> StoreResult<User> {
        let mut user = self.get_user(user_id).await?;
        if let Some(name) = name {
            if name.trim().chars().count() < MIN_NAME_LENGTH {
                return Err(StoreError::validation(
                    "Name must be at least 3 characters",
                ));
            }
            user.name = name.trim().to_string();
        }
        if let Some(age) = age {
            if age < MIN_AGE {
                return Err(StoreError::validation("You must be at least 18 years old"));
            }
            user.age = age;
        }
        self.users.update(&user).await?;
        Ok(user)
    }

    async fn validate_referral_code(&self, code: &str) -> StoreResult<bool> {
        Ok(self.users.find_by_referral_code(code).await?.is_some())
    }

    async fn user_stats(&self) -> StoreResult<UserStats> {
        let total_users = self.users.count().await?;
        let duoc_users = self.users.count_duoc().await?;
        Ok(UserStats {
            total_users,
            duoc_users,
            regular_users: total_users - duoc_users,
        })
    }

    fn watch_users(&self) -> watch::Receiver<Vec<User>> {
        self.users.watch()
    }
}
