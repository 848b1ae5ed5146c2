//! User entity, loyalty helpers and registration/login DTOs.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::{
    DUOC_DISCOUNT_MULTIPLIER, DUOC_EMAIL_MARKER, POINTS_PER_LEVEL, REFERRAL_CODE_ALPHABET,
    REFERRAL_CODE_PREFIX, REFERRAL_CODE_SUFFIX_LEN,
};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// Level is a pure function of points: one level per 500 points,
/// starting at level 1. The single source of truth for the formula.
pub fn level_for_points(points: i64) -> i64 {
    points / POINTS_PER_LEVEL + 1
}

/// Generate a referral code: `LUG` + 6 random uppercase alphanumerics.
/// Uniqueness against the user store is the account ledger's job.
pub fn generate_referral_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..REFERRAL_CODE_SUFFIX_LEN)
        .map(|_| REFERRAL_CODE_ALPHABET[rng.gen_range(0..REFERRAL_CODE_ALPHABET.len())] as char)
        .collect();
    format!("{REFERRAL_CODE_PREFIX}{suffix}")
}

/// Registered storefront user.
///
/// `purchased_codes` only ever grows; a user may review a product only if
/// its code appears there. `duoc_eligible` is derived from the email once
/// at registration and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: u8,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub points: i64,
    pub level: i64,
    pub referral_code: String,
    /// Code of the user who referred this one, set once at creation
    pub referred_by: Option<String>,
    pub referral_count: u32,
    pub duoc_eligible: bool,
    pub purchased_codes: Vec<String>,
    pub role: UserRole,
    pub registered_at: DateTime<Utc>,
}

impl User {
    /// Points still needed to reach the next level
    pub fn points_to_next_level(&self) -> i64 {
        self.level * POINTS_PER_LEVEL - self.points
    }

    /// Progress through the current level, clamped to [0, 1]
    pub fn level_progress(&self) -> f32 {
        let floor = (self.level - 1) * POINTS_PER_LEVEL;
        let earned = (self.points - floor) as f32;
        (earned / POINTS_PER_LEVEL as f32).clamp(0.0, 1.0)
    }

    /// Price multiplier applied at checkout (0.8 for DUOC, 1.0 otherwise)
    pub fn discount_multiplier(&self) -> f64 {
        if self.duoc_eligible {
            DUOC_DISCOUNT_MULTIPLIER
        } else {
            1.0
        }
    }

    /// User-facing discount label
    pub fn discount_label(&self) -> &'static str {
        if self.duoc_eligible {
            "20% DUOC DISCOUNT"
        } else {
            "No discount"
        }
    }

    /// A user may review only products they have purchased
    pub fn can_review(&self, product_code: &str) -> bool {
        self.purchased_codes.iter().any(|c| c == product_code)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Whether an email marks its owner as DUOC-discount eligible
pub fn is_duoc_email(email: &str) -> bool {
    email.to_lowercase().contains(DUOC_EMAIL_MARKER)
}

/// Registration input
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(range(min = 18, message = "You must be at least 18 years old"))]
    pub age: u8,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Optional referral code from an existing user
    pub referral_code: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Aggregate counts over the user base (admin panel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total_users: u64,
    pub duoc_users: u64,
    pub regular_users: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_points(points: i64) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test Gamer".to_string(),
            email: "gamer@example.com".to_string(),
            age: 21,
            password_hash: "hash".to_string(),
            points,
            level: level_for_points(points),
            referral_code: generate_referral_code(),
            referred_by: None,
            referral_count: 0,
            duoc_eligible: false,
            purchased_codes: vec!["AC001".to_string()],
            role: UserRole::User,
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn test_level_formula() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(499), 1);
        assert_eq!(level_for_points(500), 2);
        assert_eq!(level_for_points(1499), 3);
    }

    #[test]
    fn test_points_to_next_level() {
        let u = user_with_points(350);
        assert_eq!(u.points_to_next_level(), 150);
    }

    #[test]
    fn test_level_progress_clamped() {
        let u = user_with_points(250);
        assert!((u.level_progress() - 0.5).abs() < f32::EPSILON);
        assert_eq!(user_with_points(0).level_progress(), 0.0);
    }

    #[test]
    fn test_referral_code_format() {
        let code = generate_referral_code();
        assert!(code.starts_with("LUG"));
        assert_eq!(code.len(), 9);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_duoc_email_detection_is_case_insensitive() {
        assert!(is_duoc_email("alum@DUOC.cl"));
        assert!(is_duoc_email("someone@duocuc.cl"));
        assert!(!is_duoc_email("gamer@gmail.com"));
    }

    #[test]
    fn test_can_review_requires_purchase() {
        let u = user_with_points(0);
        assert!(u.can_review("AC001"));
        assert!(!u.can_review("CO001"));
    }

    #[test]
    fn test_register_validation_rules() {
        let valid = RegisterUser {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            age: 18,
            password: "secret1".to_string(),
            referral_code: None,
        };
        assert!(valid.validate().is_ok());

        let minor = RegisterUser {
            age: 17,
            ..valid.clone()
        };
        assert!(minor.validate().is_err());

        let short_name = RegisterUser {
            name: "Al".to_string(),
            ..valid
        };
        assert!(short_name.validate().is_err());
    }
}
