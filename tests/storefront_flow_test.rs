//! End-to-end flow through the service container: seed, register,
//! shop, check out and review the purchase.

use levelup_core::config::Config;
use levelup_core::domain::{NewReview, RegisterUser};
use levelup_core::errors::StoreError;
use levelup_core::services::ServiceContainer;
use levelup_core::Services;

fn container() -> Services {
    let config = Config::new(
        "http://localhost/api".to_string(),
        "admin".to_string(),
        "admin123",
    )
    .unwrap();
    Services::in_memory(config).unwrap()
}

#[tokio::test]
async fn test_full_purchase_and_review_journey() {
    let services = container();
    services.catalog().seed().await.unwrap();

    // A DUOC student signs up and logs in
    let user = services
        .accounts()
        .register(RegisterUser {
            name: "Benja Torres".to_string(),
            email: "benja@duocuc.cl".to_string(),
            age: 22,
            password: "hunter22".to_string(),
            referral_code: None,
        })
        .await
        .unwrap();
    assert!(user.duoc_eligible);
    services.session().save_user_session((&user).into());

    // Two controllers and a headset go into the cart
    let controller = services
        .catalog()
        .get_product_by_code("AC001")
        .await
        .unwrap();
    let headset = services
        .catalog()
        .get_product_by_code("AC002")
        .await
        .unwrap();
    services.cart().add_product(&controller, 2).await.unwrap();
    services.cart().add_product(&headset, 1).await.unwrap();

    // 2×59,990 + 79,990 = 199,970, minus the 20% student discount
    let receipt = services.checkout().checkout().await.unwrap();
    assert!((receipt.order_total - 159_976.0).abs() < 1e-6);
    assert_eq!(receipt.points_earned, 159);

    let user = services.accounts().get_user(user.id).await.unwrap();
    assert_eq!(user.points, 159);
    assert_eq!(user.level, 1);
    assert!(user.can_review("AC001"));
    assert!(!user.can_review("CO001"));

    // The purchase unlocks reviewing, once
    let before = services
        .catalog()
        .get_product_by_code("AC001")
        .await
        .unwrap();
    services
        .reviews()
        .add_review(NewReview {
            product_code: "AC001".to_string(),
            user_id: user.id,
            user_name: user.name.clone(),
            rating: 5,
            comment: "Buttons feel amazing after a month of play".to_string(),
        })
        .await
        .unwrap();
    services.accounts().add_points_for_review(user.id).await.unwrap();

    let after = services
        .catalog()
        .get_product_by_code("AC001")
        .await
        .unwrap();
    assert_eq!(after.review_count, before.review_count + 1);

    let again = services
        .reviews()
        .add_review(NewReview {
            product_code: "AC001".to_string(),
            user_id: user.id,
            user_name: user.name.clone(),
            rating: 1,
            comment: "Trying to double-dip on the bonus".to_string(),
        })
        .await;
    assert!(matches!(again.unwrap_err(), StoreError::DuplicateReview));

    // Review bonus landed on top of the purchase points
    let user = services.accounts().get_user(user.id).await.unwrap();
    assert_eq!(user.points, 209);
}

#[tokio::test]
async fn test_admin_session_lifecycle() {
    let services = container();

    assert!(!services.session().is_admin_logged_in());
    assert!(services.accounts().login_admin("admin", "admin123"));
    services.session().save_admin_session("admin".to_string());
    assert!(services.session().is_admin_logged_in());
    assert_eq!(services.session().admin_username().as_deref(), Some("admin"));

    services.session().clear_admin_session();
    assert!(!services.session().is_admin_logged_in());
}

#[tokio::test]
async fn test_logout_clears_only_the_user_session() {
    let services = container();

    let user = services
        .accounts()
        .register(RegisterUser {
            name: "Ana Gamer".to_string(),
            email: "ana@gmail.com".to_string(),
            age: 25,
            password: "hunter22".to_string(),
            referral_code: None,
        })
        .await
        .unwrap();
    services.session().save_user_session((&user).into());
    services.session().save_admin_session("admin".to_string());

    services.session().clear_user_session();
    assert!(!services.session().is_user_logged_in());
    assert!(services.session().is_admin_logged_in());

    // Checking out after logout is rejected
    let result = services.checkout().checkout().await;
    assert!(matches!(result.unwrap_err(), StoreError::NotAuthenticated));
}
