#![allow(clippy::unwrap_used, clippy::expect_used)]

use casemall_sdk::NewCartItem;

use crate::domain::error::DomainError;
use crate::test_support::{add_to_cart, seed_product, seed_user, services};

#[tokio::test]
async fn new_user_has_an_empty_cart() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;

    let cart = svc.carts.get_cart("alice").await.unwrap();
    assert_eq!(cart.cart_id, None);
    assert_eq!(cart.user_id, "alice");
    assert!(cart.items.is_empty());

    assert!(matches!(
        svc.carts.get_cart("ghost").await,
        Err(DomainError::UserNotFound { .. })
    ));
}

#[tokio::test]
async fn adding_the_same_variant_sums_counts() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 9_000, &[("iPhone 15", 10)]).await;

    let first = add_to_cart(&svc, "alice", &case, 0, 2).await;
    let second = add_to_cart(&svc, "alice", &case, 0, 3).await;
    assert_eq!(first.id, second.id);
    assert_eq!(second.count, 5);

    let cart = svc.carts.get_cart("alice").await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].total_price, 45_000);
    assert_eq!(cart.total_price, 45_000);
    assert!(cart.items[0].img_url.is_some());
}

#[tokio::test]
async fn model_must_belong_to_product() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let a = seed_product(&svc, "A", 1_000, &[("iPhone 15", 1)]).await;
    let b = seed_product(&svc, "B", 1_000, &[("iPhone 15", 1)]).await;

    let err = svc
        .carts
        .add_item(
            "alice",
            NewCartItem {
                product_id: a.product.id,
                product_model_id: b.models[0].id,
                count: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ProductModelNotFound { .. }));
}

#[tokio::test]
async fn counts_below_one_are_rejected() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 9_000, &[("iPhone 15", 10)]).await;
    let item = add_to_cart(&svc, "alice", &case, 0, 1).await;

    let err = svc
        .carts
        .update_item_count("alice", item.id, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "count"));
}

#[tokio::test]
async fn other_users_items_are_forbidden() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    seed_user(&svc, "bob").await;
    let case = seed_product(&svc, "Clear jelly", 9_000, &[("iPhone 15", 10)]).await;
    let item = add_to_cart(&svc, "alice", &case, 0, 1).await;

    assert!(matches!(
        svc.carts.update_item_count("bob", item.id, 4).await,
        Err(DomainError::Forbidden { .. })
    ));
    assert!(matches!(
        svc.carts.remove_item("bob", item.id).await,
        Err(DomainError::Forbidden { .. })
    ));

    svc.carts.remove_item("alice", item.id).await.unwrap();
    assert!(svc.carts.get_cart("alice").await.unwrap().items.is_empty());
}
