//! Persisted record shapes.
//!
//! Mirrors what the store actually keeps per row where that differs from
//! the domain model: the purchased-product codes live as a JSON blob on
//! the user record, exactly as the storefront persists them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{User, UserRole};

/// User row as the store keeps it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: u8,
    pub password_hash: String,
    pub points: i64,
    pub level: i64,
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub referral_count: u32,
    pub duoc_eligible: bool,
    /// JSON-encoded array of purchased product codes
    pub purchased_codes_json: String,
    pub role: UserRole,
    pub registered_at: DateTime<Utc>,
}

/// Serialize purchased codes into the blob the store keeps
pub fn encode_purchased_codes(codes: &[String]) -> String {
    serde_json::to_string(codes).unwrap_or_else(|_| "[]".to_string())
}

/// Parse the purchased-codes blob; a corrupt blob reads as empty
pub fn decode_purchased_codes(json: &str) -> Vec<String> {
    serde_json::from_str(json).unwrap_or_default()
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age,
            password_hash: user.password_hash.clone(),
            points: user.points,
            level: user.level,
            referral_code: user.referral_code.clone(),
            referred_by: user.referred_by.clone(),
            referral_count: user.referral_count,
            duoc_eligible: user.duoc_eligible,
            purchased_codes_json: encode_purchased_codes(&user.purchased_codes),
            role: user.role,
            registered_at: user.registered_at,
        }
    }
}

impl From<&UserRecord> for User {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            age: record.age,
            password_hash: record.password_hash.clone(),
            points: record.points,
            level: record.level,
            referral_code: record.referral_code.clone(),
            referred_by: record.referred_by.clone(),
            referral_count: record.referral_count,
            duoc_eligible: record.duoc_eligible,
            purchased_codes: decode_purchased_codes(&record.purchased_codes_json),
            role: record.role,
            registered_at: record.registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{generate_referral_code, level_for_points};

    #[test]
    fn test_purchased_codes_round_trip_through_blob() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Gamer".to_string(),
            email: "gamer@example.com".to_string(),
            age: 25,
            password_hash: "hash".to_string(),
            points: 700,
            level: level_for_points(700),
            referral_code: generate_referral_code(),
            referred_by: None,
            referral_count: 0,
            duoc_eligible: false,
            purchased_codes: vec!["AC001".to_string(), "CO001".to_string()],
            role: UserRole::User,
            registered_at: Utc::now(),
        };

        let record = UserRecord::from(&user);
        assert_eq!(record.purchased_codes_json, r#"["AC001","CO001"]"#);

        let restored = User::from(&record);
        assert_eq!(restored.purchased_codes, user.purchased_codes);
    }

    #[test]
    fn test_corrupt_blob_reads_as_empty() {
        assert!(decode_purchased_codes("not-json").is_empty());
        assert!(decode_purchased_codes("").is_empty());
    }
}
