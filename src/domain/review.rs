//! Review entity, input DTO and per-product aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Product review. At most one per (user_id, product_code) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub product_code: String,
    pub user_id: Uuid,
    pub user_name: String,
    /// Whole stars, 1-5
    pub rating: u8,
    pub comment: String,
    pub posted_at: DateTime<Utc>,
}

impl Review {
    /// Stars as the app renders them: ★★★★☆
    pub fn stars_text(&self) -> String {
        let full = self.rating.min(5) as usize;
        format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
    }
}

/// Input for a new review
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReview {
    pub product_code: String,
    pub user_id: Uuid,
    pub user_name: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(min = 10, max = 500, message = "Comment must be 10-500 characters"))]
    pub comment: String,
}

/// Per-product review aggregates, recomputed from the ledger on every write
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReviewStats {
    pub average_rating: f32,
    pub review_count: u32,
}

impl ReviewStats {
    pub fn full_stars(&self) -> u8 {
        (self.average_rating as u8).min(5)
    }

    pub fn has_half_star(&self) -> bool {
        self.average_rating.fract() >= 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_text() {
        let review = Review {
            id: Uuid::new_v4(),
            product_code: "AC001".to_string(),
            user_id: Uuid::new_v4(),
            user_name: "GamerPro".to_string(),
            rating: 4,
            comment: "Great controller overall".to_string(),
            posted_at: Utc::now(),
        };
        assert_eq!(review.stars_text(), "★★★★☆");
    }

    #[test]
    fn test_review_stats_star_helpers() {
        let stats = ReviewStats {
            average_rating: 4.6,
            review_count: 3,
        };
        assert_eq!(stats.full_stars(), 4);
        assert!(stats.has_half_star());

        let low = ReviewStats {
            average_rating: 3.2,
            review_count: 5,
        };
        assert!(!low.has_half_star());
    }

    #[test]
    fn test_new_review_validation() {
        let input = NewReview {
            product_code: "AC001".to_string(),
            user_id: Uuid::new_v4(),
            user_name: "GamerPro".to_string(),
            rating: 5,
            comment: "Solid build quality".to_string(),
        };
        assert!(input.validate().is_ok());

        let bad_rating = NewReview {
            rating: 6,
            ..input.clone()
        };
        assert!(bad_rating.validate().is_err());

        let short_comment = NewReview {
            comment: "meh".to_string(),
            ..input
        };
        assert!(short_comment.validate().is_err());
    }
}
