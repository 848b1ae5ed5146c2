//! Account service tests: registration, referrals, login and the
//! loyalty ledger.

use std::sync::Arc;

use levelup_core::config::Config;
use levelup_core::domain::{Credentials, RegisterUser};
use levelup_core::errors::StoreError;
use levelup_core::infra::repositories::{MockUserRepository, UserRepository, UserStore};
use levelup_core::services::{AccountManager, AccountService};

fn test_config() -> Config {
    Config::new(
        "http://localhost/api".to_string(),
        "admin".to_string(),
        "admin123",
    )
    .unwrap()
}

fn service() -> (Arc<UserStore>, AccountManager<UserStore>) {
    let store = Arc::new(UserStore::new());
    (store.clone(), AccountManager::new(store, test_config()))
}

fn registration(name: &str, email: &str) -> RegisterUser {
    RegisterUser {
        name: name.to_string(),
        email: email.to_string(),
        age: 25,
        password: "hunter22".to_string(),
        referral_code: None,
    }
}

#[tokio::test]
async fn test_register_creates_level_one_user_with_referral_code() {
    let (_, service) = service();

    let user = service
        .register(registration("Ana Gamer", "ana@gmail.com"))
        .await
        .unwrap();

    assert_eq!(user.points, 0);
    assert_eq!(user.level, 1);
    assert!(user.referral_code.starts_with("LUG"));
    assert_eq!(user.referral_code.len(), 9);
    assert!(!user.duoc_eligible);
    assert!(user.purchased_codes.is_empty());
    // The clear text must never be stored
    assert_ne!(user.password_hash, "hunter22");
}

#[tokio::test]
async fn test_register_detects_duoc_email_case_insensitively() {
    let (_, service) = service();

    let user = service
        .register(registration("Benja", "benja@DUOCUC.cl"))
        .await
        .unwrap();
    assert!(user.duoc_eligible);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let (_, service) = service();

    service
        .register(registration("Ana Gamer", "ana@gmail.com"))
        .await
        .unwrap();
    let second = service
        .register(registration("Other Ana", "ana@gmail.com"))
        .await;

    assert!(matches!(second.unwrap_err(), StoreError::DuplicateEmail));
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let (_, service) = service();

    let minor = RegisterUser {
        age: 17,
        ..registration("Kid Gamer", "kid@gmail.com")
    };
    assert!(matches!(
        service.register(minor).await.unwrap_err(),
        StoreError::Validation(_)
    ));

    let short_password = RegisterUser {
        password: "abc".to_string(),
        ..registration("Ana Gamer", "ana@gmail.com")
    };
    assert!(service.register(short_password).await.is_err());
}

#[tokio::test]
async fn test_valid_referral_code_credits_both_parties() {
    let (_, service) = service();

    let referrer = service
        .register(registration("Referrer", "ref@gmail.com"))
        .await
        .unwrap();

    let referred = service
        .register(RegisterUser {
            referral_code: Some(referrer.referral_code.clone()),
            ..registration("Referred", "new@gmail.com")
        })
        .await
        .unwrap();

    assert_eq!(referred.points, 100);
    assert_eq!(referred.referred_by.as_deref(), Some(referrer.referral_code.as_str()));

    let referrer = service.get_user(referrer.id).await.unwrap();
    assert_eq!(referrer.points, 100);
    assert_eq!(referrer.referral_count, 1);
}

#[tokio::test]
async fn test_unknown_referral_code_earns_nothing_but_registers() {
    let (_, service) = service();

    let user = service
        .register(RegisterUser {
            referral_code: Some("LUGXXXXXX".to_string()),
            ..registration("Hopeful", "hope@gmail.com")
        })
        .await
        .unwrap();

    assert_eq!(user.points, 0);
    assert!(user.referred_by.is_none());
}

#[tokio::test]
async fn test_login_round_trip() {
    let (_, service) = service();
    service
        .register(registration("Ana Gamer", "ana@gmail.com"))
        .await
        .unwrap();

    let ok = service
        .login(&Credentials {
            email: "ana@gmail.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();
    assert!(ok.is_some());

    let bad_password = service
        .login(&Credentials {
            email: "ana@gmail.com".to_string(),
            password: "wrong-pass".to_string(),
        })
        .await
        .unwrap();
    assert!(bad_password.is_none());

    let unknown_email = service
        .login(&Credentials {
            email: "nobody@gmail.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();
    assert!(unknown_email.is_none());
}

#[tokio::test]
async fn test_login_admin_uses_configured_credentials() {
    let (_, service) = service();

    assert!(service.login_admin("admin", "admin123"));
    assert!(!service.login_admin("admin", "nope"));
    assert!(!service.login_admin("root", "admin123"));
}

#[tokio::test]
async fn test_purchase_points_are_one_per_thousand_floored() {
    let (_, service) = service();
    let user = service
        .register(registration("Buyer", "buyer@gmail.com"))
        .await
        .unwrap();

    let earned = service
        .add_points_for_purchase(user.id, 2500.0)
        .await
        .unwrap();
    assert_eq!(earned, 2);

    let user = service.get_user(user.id).await.unwrap();
    assert_eq!(user.points, 2);
    assert_eq!(user.level, 1);

    // Sub-1000 totals earn nothing
    let earned = service
        .add_points_for_purchase(user.id, 999.0)
        .await
        .unwrap();
    assert_eq!(earned, 0);
}

#[tokio::test]
async fn test_points_drive_level_ups() {
    let (_, service) = service();
    let user = service
        .register(registration("Grinder", "grind@gmail.com"))
        .await
        .unwrap();

    service
        .add_points_for_purchase(user.id, 480_000.0)
        .await
        .unwrap();
    assert_eq!(service.get_user(user.id).await.unwrap().level, 1);

    service.add_points_for_review(user.id).await.unwrap();
    let user = service.get_user(user.id).await.unwrap();
    assert_eq!(user.points, 530);
    assert_eq!(user.level, 2);
}

#[tokio::test]
async fn test_record_purchase_appends_codes_once() {
    let (_, service) = service();
    let user = service
        .register(registration("Buyer", "buyer@gmail.com"))
        .await
        .unwrap();

    let codes = vec!["AC001".to_string(), "CO001".to_string()];
    service.record_purchase(user.id, &codes).await.unwrap();
    service
        .record_purchase(user.id, &["AC001".to_string(), "MS001".to_string()])
        .await
        .unwrap();

    let user = service.get_user(user.id).await.unwrap();
    assert_eq!(user.purchased_codes, vec!["AC001", "CO001", "MS001"]);
    assert!(user.can_review("AC001"));
    assert!(!user.can_review("PP001"));
}

#[tokio::test]
async fn test_update_profile_validates_fields() {
    let (_, service) = service();
    let user = service
        .register(registration("Ana Gamer", "ana@gmail.com"))
        .await
        .unwrap();

    let updated = service
        .update_profile(user.id, Some("Ana Maria".to_string()), Some(30))
        .await
        .unwrap();
    assert_eq!(updated.name, "Ana Maria");
    assert_eq!(updated.age, 30);

    assert!(service
        .update_profile(user.id, Some("Al".to_string()), None)
        .await
        .is_err());
    assert!(service.update_profile(user.id, None, Some(17)).await.is_err());
}

#[tokio::test]
async fn test_user_stats_split_by_duoc_eligibility() {
    let (_, service) = service();
    service
        .register(registration("Ana", "ana@gmail.com"))
        .await
        .unwrap();
    service
        .register(registration("Benja", "benja@duoc.cl"))
        .await
        .unwrap();

    let stats = service.user_stats().await.unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.duoc_users, 1);
    assert_eq!(stats.regular_users, 1);
}

#[tokio::test]
async fn test_watch_users_replays_current_snapshot() {
    let (store, service) = service();
    service
        .register(registration("Ana", "ana@gmail.com"))
        .await
        .unwrap();

    // A late subscriber still sees the existing users
    let feed = store.watch();
    assert_eq!(feed.borrow().len(), 1);
}

#[tokio::test]
async fn test_get_user_not_found_with_mocked_store() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = AccountManager::new(Arc::new(repo), test_config());
    let result = service.get_user(uuid::Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), StoreError::NotFound));
}

#[tokio::test]
async fn test_validate_referral_code_with_mocked_store() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_referral_code()
        .returning(|_| Ok(None));

    let service = AccountManager::new(Arc::new(repo), test_config());
    assert!(!service.validate_referral_code("LUGZZZZZZ").await.unwrap());
}
