//! Checkout service - turns the cart into a purchase.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::{StoreError, StoreResult};
use crate::infra::SessionStore;
use crate::services::{AccountService, CartService};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Outcome of a completed checkout
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Receipt {
    pub order_total: f64,
    pub points_earned: i64,
}

/// Checkout service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Complete the purchase for the logged-in user.
    ///
    /// An empty cart checks out successfully with a zero receipt. The
    /// steps run in order without a surrounding transaction; a failure
    /// mid-sequence leaves earlier writes in place.
    async fn checkout(&self) -> StoreResult<Receipt>;
}

/// Concrete implementation of CheckoutService.
///
/// Orchestrates the account ledger, the cart and the session: records
/// the purchase, credits purchase points, refreshes the cached session
/// snapshot and empties the cart.
pub struct CheckoutOrchestrator {
    accounts: Arc<dyn AccountService>,
    cart: Arc<dyn CartService>,
    session: Arc<SessionStore>,
}

impl CheckoutOrchestrator {
    pub fn new(
        accounts: Arc<dyn AccountService>,
        cart: Arc<dyn CartService>,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            accounts,
            cart,
            session,
        }
    }
}

#[async_trait]
impl CheckoutService for CheckoutOrchestrator {
    async fn checkout(&self) -> StoreResult<Receipt> {
        let user_id = self.session.user_id().ok_or(StoreError::NotAuthenticated)?;
        let user = self.accounts.get_user(user_id).await?;

        let snapshot = self.cart.snapshot(user.duoc_eligible).await?;
        if snapshot.is_empty() {
            self.cart.clear().await?;
            return Ok(Receipt {
                order_total: 0.0,
                points_earned: 0,
            });
        }

        let codes: Vec<String> = snapshot.lines.iter().map(|l| l.code.clone()).collect();
        self.accounts.record_purchase(user_id, &codes).await?;

        let order_total = snapshot.total;
        let points_earned = self
            .accounts
            .add_points_for_purchase(user_id, order_total)
            .await?;

        // The session caches the loyalty fields; refresh from the store
        let refreshed = self.accounts.get_user(user_id).await?;
        self.session.update_points(refreshed.points, refreshed.level);

        self.cart.clear().await?;

        tracing::info!(user_id = %user_id, order_total, points_earned, "checkout completed");
        Ok(Receipt {
            order_total,
            points_earned,
        })
    }
}
