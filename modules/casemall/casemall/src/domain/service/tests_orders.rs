#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::domain::error::DomainError;
use crate::test_support::{add_to_cart, seed_product, seed_user, services, stock_of};

#[tokio::test]
async fn create_order_captures_price_and_takes_stock() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 12_000, &[("iPhone 15", 10)]).await;
    let item = add_to_cart(&svc, "alice", &case, 0, 3).await;

    let view = svc.orders.create_order("alice", vec![item.id]).await.unwrap();

    assert!(view.order_no.is_some());
    assert_eq!(view.total_price, 36_000);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].price, 12_000);
    assert_eq!(view.items[0].model_select, "iPhone 15");
    assert_eq!(view.user_name.as_deref(), Some("alice name"));
    assert_eq!(stock_of(&svc, &case, 0).await, 7);
}

#[tokio::test]
async fn out_of_stock_aborts_the_whole_order() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 12_000, &[("iPhone 15", 5), ("Galaxy S24", 1)])
        .await;
    let first = add_to_cart(&svc, "alice", &case, 0, 2).await;
    let second = add_to_cart(&svc, "alice", &case, 1, 4).await;

    let err = svc
        .orders
        .create_order("alice", vec![first.id, second.id])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::OutOfStock {
            requested: 4,
            available: 1,
            ..
        }
    ));
    // rolled back: first line's stock is untouched and no order exists
    assert_eq!(stock_of(&svc, &case, 0).await, 5);
    assert!(svc.orders.get_order("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn cart_items_of_another_user_are_forbidden() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    seed_user(&svc, "bob").await;
    let case = seed_product(&svc, "Clear jelly", 12_000, &[("iPhone 15", 5)]).await;
    let bobs = add_to_cart(&svc, "bob", &case, 0, 1).await;

    let err = svc.orders.create_order("alice", vec![bobs.id]).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));

    let err = svc.orders.create_order("alice", vec![9_999]).await.unwrap_err();
    assert!(matches!(err, DomainError::CartItemNotFound { id: 9_999 }));
}

#[tokio::test]
async fn empty_selection_and_unknown_user_are_rejected() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;

    let err = svc.orders.create_order("alice", vec![]).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let err = svc.orders.create_order("ghost", vec![1]).await.unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { .. }));
}

#[tokio::test]
async fn existing_order_is_returned_and_reconciled() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 10_000, &[("iPhone 15", 10), ("Galaxy S24", 10)])
        .await;
    let item = add_to_cart(&svc, "alice", &case, 0, 2).await;
    let first = svc.orders.create_order("alice", vec![item.id]).await.unwrap();
    assert_eq!(stock_of(&svc, &case, 0).await, 8);

    // raise the count and add a second variant to the cart
    svc.carts.update_item_count("alice", item.id, 5).await.unwrap();
    add_to_cart(&svc, "alice", &case, 1, 1).await;

    let again = svc.orders.create_order("alice", vec![item.id]).await.unwrap();
    assert_eq!(again.order_no, first.order_no);
    assert_eq!(again.items.len(), 2);
    assert_eq!(again.total_price, 60_000);
    assert_eq!(stock_of(&svc, &case, 0).await, 5);
    assert_eq!(stock_of(&svc, &case, 1).await, 9);
}

#[tokio::test]
async fn get_order_shows_reconciled_counts_without_persisting() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 10_000, &[("iPhone 15", 10)]).await;
    let item = add_to_cart(&svc, "alice", &case, 0, 6).await;
    svc.orders.create_order("alice", vec![item.id]).await.unwrap();
    assert_eq!(stock_of(&svc, &case, 0).await, 4);

    svc.carts.update_item_count("alice", item.id, 2).await.unwrap();
    let view = svc.orders.get_order("alice").await.unwrap();
    assert_eq!(view.items[0].count, 2);
    assert_eq!(view.total_price, 20_000);
    assert_eq!(stock_of(&svc, &case, 0).await, 4);

    // placing the order again writes the reconciliation
    let placed = svc.orders.create_order("alice", vec![item.id]).await.unwrap();
    assert_eq!(placed.items[0].count, 2);
    assert_eq!(stock_of(&svc, &case, 0).await, 8);
}

#[tokio::test]
async fn appended_cart_line_takes_stock_when_order_is_placed_again() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 10_000, &[("iPhone 15", 10), ("Galaxy S24", 5)])
        .await;
    let first = add_to_cart(&svc, "alice", &case, 0, 1).await;
    svc.orders.create_order("alice", vec![first.id]).await.unwrap();
    let late = add_to_cart(&svc, "alice", &case, 1, 2).await;

    let preview = svc.orders.get_order("alice").await.unwrap();
    assert_eq!(preview.items.len(), 2);
    assert_eq!(stock_of(&svc, &case, 1).await, 5);

    let placed = svc.orders.create_order("alice", vec![first.id]).await.unwrap();
    assert_eq!(placed.items.len(), 2);
    assert_eq!(stock_of(&svc, &case, 0).await, 9);
    assert_eq!(stock_of(&svc, &case, 1).await, 3);

    // the appended detail is stored: removing it returns its units
    let view = svc.orders.remove_order(late.id, "alice").await.unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(stock_of(&svc, &case, 1).await, 5);
}

#[tokio::test]
async fn reconciliation_failing_on_stock_leaves_order_unchanged() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 10_000, &[("iPhone 15", 3)]).await;
    let item = add_to_cart(&svc, "alice", &case, 0, 2).await;
    svc.orders.create_order("alice", vec![item.id]).await.unwrap();

    svc.carts.update_item_count("alice", item.id, 9).await.unwrap();
    let err = svc.orders.get_order("alice").await.unwrap_err();
    assert!(matches!(err, DomainError::OutOfStock { .. }));
    assert_eq!(stock_of(&svc, &case, 0).await, 1);
}

#[tokio::test]
async fn get_order_without_pending_order_is_empty() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;

    let view = svc.orders.get_order("alice").await.unwrap();
    assert!(view.is_empty());
    assert_eq!(view.order_no, None);
    assert_eq!(view.total_price, 0);
}

#[tokio::test]
async fn removing_last_item_restores_stock_and_deletes_order() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 10_000, &[("iPhone 15", 10), ("Galaxy S24", 10)])
        .await;
    let a = add_to_cart(&svc, "alice", &case, 0, 2).await;
    let b = add_to_cart(&svc, "alice", &case, 1, 3).await;
    svc.orders.create_order("alice", vec![a.id, b.id]).await.unwrap();

    svc.orders.remove_order(a.id, "alice").await.unwrap();
    assert_eq!(stock_of(&svc, &case, 0).await, 10);
    svc.carts.remove_item("alice", a.id).await.unwrap();
    let view = svc.orders.get_order("alice").await.unwrap();
    assert_eq!(view.items.len(), 1);

    let view = svc.orders.remove_order(b.id, "alice").await.unwrap();
    assert!(view.is_empty());
    assert_eq!(stock_of(&svc, &case, 1).await, 10);
    let err = svc.orders.remove_order(b.id, "alice").await.unwrap_err();
    assert!(matches!(err, DomainError::OrderNotFound(_)));
}

#[tokio::test]
async fn removed_detail_stays_removed_while_cart_line_remains() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 10_000, &[("iPhone 15", 10), ("Galaxy S24", 10)])
        .await;
    let a = add_to_cart(&svc, "alice", &case, 0, 2).await;
    let b = add_to_cart(&svc, "alice", &case, 1, 3).await;
    svc.orders.create_order("alice", vec![a.id, b.id]).await.unwrap();
    assert_eq!(stock_of(&svc, &case, 0).await, 8);
    assert_eq!(stock_of(&svc, &case, 1).await, 7);

    let view = svc.orders.remove_order(a.id, "alice").await.unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].product_model_id, b.product_model_id);
    assert_eq!(view.total_price, 30_000);
    assert_eq!(stock_of(&svc, &case, 0).await, 10);

    // reading the order does not write the cart line back into it
    svc.orders.get_order("alice").await.unwrap();
    assert_eq!(stock_of(&svc, &case, 0).await, 10);

    // only b is stored, so removing it empties and deletes the order
    let view = svc.orders.remove_order(b.id, "alice").await.unwrap();
    assert!(view.is_empty());
    let err = svc.orders.remove_order(a.id, "alice").await.unwrap_err();
    assert!(matches!(err, DomainError::OrderNotFound(_)));
}

#[tokio::test]
async fn remove_order_reports_missing_detail() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 10_000, &[("iPhone 15", 10), ("Galaxy S24", 10)])
        .await;
    let a = add_to_cart(&svc, "alice", &case, 0, 1).await;
    svc.orders.create_order("alice", vec![a.id]).await.unwrap();
    let late = add_to_cart(&svc, "alice", &case, 1, 1).await;

    let err = svc.orders.remove_order(late.id, "alice").await.unwrap_err();
    assert!(matches!(err, DomainError::OrderItemNotFound { cart_item_id } if cart_item_id == late.id));
}

#[tokio::test]
async fn cancel_returns_all_units_and_is_owner_only() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    seed_user(&svc, "bob").await;
    let case = seed_product(&svc, "Clear jelly", 10_000, &[("iPhone 15", 10)]).await;
    let item = add_to_cart(&svc, "alice", &case, 0, 4).await;
    let order_no = svc
        .orders
        .create_order("alice", vec![item.id])
        .await
        .unwrap()
        .order_no
        .unwrap();

    let err = svc.orders.cancel_order("bob", order_no).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));

    svc.orders.cancel_order("alice", order_no).await.unwrap();
    assert_eq!(stock_of(&svc, &case, 0).await, 10);

    let err = svc.orders.cancel_order("alice", order_no).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "status"));
}
