#![allow(clippy::unwrap_used, clippy::expect_used)]

use casemall_sdk::{NewProductModel, PageRequest, ProductCategory, ProductSearch, ProductType, SellStatus};

use crate::domain::error::DomainError;
use crate::test_support::{add_to_cart, form, png, seed_product, seed_user, services};

#[tokio::test]
async fn save_keeps_only_models_with_label_and_stock() {
    let (svc, dir) = services().await;
    let mut f = form("Clear jelly", 9_900, &[("iPhone 15", 3), ("Galaxy S24", 0)]);
    f.models.push(NewProductModel {
        model_select: None,
        stock: Some(4),
    });

    let id = svc
        .products
        .save_product(f, vec![png("front.png"), png("back.png")])
        .await
        .unwrap();
    let detail = svc.products.get_product_detail(id).await.unwrap();

    assert_eq!(detail.models.len(), 1);
    assert_eq!(detail.models[0].model_select, "iPhone 15");
    assert_eq!(detail.images.len(), 2);
    assert_eq!(detail.main_image().unwrap().ori_img_name, "front.png");
    assert!(dir.path().join(&detail.images[1].img_name).exists());
}

#[tokio::test]
async fn save_without_valid_models_or_images_fails() {
    let (svc, dir) = services().await;

    let err = svc
        .products
        .save_product(form("Empty", 1_000, &[("iPhone 15", 0)]), vec![png("a.png")])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NoValidModels));

    let err = svc
        .products
        .save_product(form("No images", 1_000, &[("iPhone 15", 1)]), vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyImageList));
    assert_eq!(std::fs::read_dir(dir.path()).map(Iterator::count).unwrap_or(0), 0);
}

#[tokio::test]
async fn update_replaces_images_and_syncs_models() {
    let (svc, dir) = services().await;
    let case = seed_product(&svc, "Clear jelly", 9_900, &[("iPhone 15", 3), ("iPhone 14", 2)]).await;
    let old_file = case.images[0].img_name.clone();

    let mut f = form("Clear jelly v2", 10_900, &[("iPhone 15", 8), ("iPhone 16", 5)]);
    f.sell_status = SellStatus::SoldOut;
    let updated = svc
        .products
        .update_product(case.product.id, f, vec![png("new.png")])
        .await
        .unwrap();

    assert_eq!(updated.product.name, "Clear jelly v2");
    assert_eq!(updated.product.sell_status, SellStatus::SoldOut);
    let labels: Vec<_> = updated.models.iter().map(|m| m.model_select.as_str()).collect();
    assert_eq!(labels, ["iPhone 15", "iPhone 16"]);
    // surviving label keeps its id
    assert_eq!(updated.models[0].id, case.models[0].id);
    assert_eq!(updated.models[0].stock, 8);
    assert_eq!(updated.images.len(), 1);
    assert!(!dir.path().join(old_file).exists());
}

#[tokio::test]
async fn update_checks_existence_before_images() {
    let (svc, _dir) = services().await;

    let err = svc
        .products
        .update_product(404, form("x", 1, &[("a", 1)]), vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ProductNotFound { id: 404 }));

    let case = seed_product(&svc, "Clear jelly", 9_900, &[("iPhone 15", 3)]).await;
    let err = svc
        .products
        .update_product(case.product.id, form("x", 1, &[("a", 1)]), vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyImageList));
}

#[tokio::test]
async fn delete_removes_rows_files_and_cart_lines() {
    let (svc, dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 9_900, &[("iPhone 15", 3)]).await;
    add_to_cart(&svc, "alice", &case, 0, 1).await;

    svc.products.delete_product(case.product.id).await.unwrap();

    assert!(matches!(
        svc.products.get_product_detail(case.product.id).await,
        Err(DomainError::ProductNotFound { .. })
    ));
    assert!(!dir.path().join(&case.images[0].img_name).exists());
    assert!(svc.carts.get_cart("alice").await.unwrap().items.is_empty());
}

#[tokio::test]
async fn ordered_products_cannot_be_deleted() {
    let (svc, _dir) = services().await;
    seed_user(&svc, "alice").await;
    let case = seed_product(&svc, "Clear jelly", 9_900, &[("iPhone 15", 3)]).await;
    let item = add_to_cart(&svc, "alice", &case, 0, 1).await;
    svc.orders.create_order("alice", vec![item.id]).await.unwrap();

    let err = svc.products.delete_product(case.product.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn main_page_lists_only_products_on_sale() {
    let (svc, _dir) = services().await;
    for i in 0..5 {
        seed_product(&svc, &format!("Case {i}"), 1_000 + i, &[("iPhone 15", 1)]).await;
    }
    let mut sold_out = form("Sold out case", 500, &[("iPhone 15", 1)]);
    sold_out.sell_status = SellStatus::SoldOut;
    svc.products
        .save_product(sold_out, vec![png("s.png")])
        .await
        .unwrap();

    let page = svc
        .products
        .get_main_product_page(&ProductSearch::default(), PageRequest::new(0, 2))
        .await
        .unwrap();
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
    // newest first
    assert_eq!(page.items[0].name, "Case 4");
    assert!(page.items[0].img_url.as_deref().unwrap().starts_with("/images/"));

    let admin = svc
        .products
        .get_admin_product_page(&ProductSearch::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(admin.total_items, 6);
    assert_eq!(admin.size, 12);
}

#[tokio::test]
async fn search_filters_by_name_category_and_type() {
    let (svc, _dir) = services().await;
    seed_product(&svc, "Clear jelly", 9_900, &[("iPhone 15", 3)]).await;
    let mut tok = form("Heart tok", 5_000, &[("Universal", 3)]);
    tok.category = ProductCategory::Tok;
    tok.product_type = ProductType::Heart;
    svc.products.save_product(tok, vec![png("t.png")]).await.unwrap();

    let by_name = ProductSearch {
        search_query: Some("jelly".to_owned()),
        ..ProductSearch::default()
    };
    let page = svc
        .products
        .get_admin_product_page(&by_name, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);

    let toks = svc
        .products
        .get_products_by_category(ProductCategory::Tok)
        .await
        .unwrap();
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].name, "Heart tok");

    let hearts = svc
        .products
        .get_products_by_type(ProductType::Heart)
        .await
        .unwrap();
    assert_eq!(hearts.len(), 1);
    assert_eq!(svc.products.get_all_products().await.unwrap().len(), 2);
    assert_eq!(
        svc.products
            .get_all_products_page(PageRequest::new(1, 1))
            .await
            .unwrap()
            .items
            .len(),
        1
    );
}

#[tokio::test]
async fn page_beyond_addressable_offset_is_rejected() {
    let (svc, _dir) = services().await;
    seed_product(&svc, "Clear jelly", 9_900, &[("iPhone 15", 3)]).await;

    let err = svc
        .products
        .get_main_product_page(&ProductSearch::default(), PageRequest::new(u64::MAX, 12))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "page"));

    let err = svc
        .products
        .get_admin_product_page(&ProductSearch::default(), PageRequest::new(u64::MAX / 2, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}
