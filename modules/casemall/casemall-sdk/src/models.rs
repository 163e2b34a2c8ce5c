//! Public models for the `casemall` module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the `casemall` module and its consumers.

use time::OffsetDateTime;

use crate::catalog::{ProductCategory, ProductType, SellStatus};
use crate::errors::StockError;

// ==================== Users ====================

/// A storefront customer, keyed by login id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Data for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

// ==================== Products ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i32,
    pub detail: String,
    pub category: ProductCategory,
    pub product_type: ProductType,
    pub sell_status: SellStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A purchasable variant of a product (e.g. "Galaxy S24") with its own stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductModel {
    pub id: i64,
    pub product_id: i64,
    pub model_select: String,
    pub stock: i32,
}

impl ProductModel {
    /// Return `quantity` units to stock.
    pub fn add_stock(&mut self, quantity: i32) -> Result<(), StockError> {
        if quantity < 0 {
            return Err(StockError::NegativeQuantity(quantity));
        }
        self.stock = self
            .stock
            .checked_add(quantity)
            .ok_or(StockError::Overflow { model_id: self.id })?;
        Ok(())
    }

    /// Take `quantity` units out of stock; fails without mutating when short.
    pub fn remove_stock(&mut self, quantity: i32) -> Result<(), StockError> {
        if quantity < 0 {
            return Err(StockError::NegativeQuantity(quantity));
        }
        let rest = self.stock - quantity;
        if rest < 0 {
            return Err(StockError::Insufficient {
                model_id: self.id,
                requested: quantity,
                available: self.stock,
            });
        }
        self.stock = rest;
        Ok(())
    }
}

/// Model row as submitted in a product form. Rows without a label or with
/// no stock are ignored on save.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewProductModel {
    pub model_select: Option<String>,
    pub stock: Option<i32>,
}

impl NewProductModel {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.stock.is_some_and(|s| s > 0)
            && self
                .model_select
                .as_deref()
                .is_some_and(|m| !m.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub id: i64,
    pub product_id: i64,
    pub img_name: String,
    pub ori_img_name: String,
    pub img_url: String,
    pub main: bool,
}

/// Uploaded image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub original_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Create / update form for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: i32,
    pub detail: String,
    pub category: ProductCategory,
    pub product_type: ProductType,
    pub sell_status: SellStatus,
    pub models: Vec<NewProductModel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    pub product: Product,
    pub models: Vec<ProductModel>,
    pub images: Vec<ProductImage>,
}

impl ProductDetail {
    #[must_use]
    pub fn main_image(&self) -> Option<&ProductImage> {
        self.images.iter().find(|i| i.main)
    }
}

/// Storefront listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainProductItem {
    pub id: i64,
    pub name: String,
    pub detail: String,
    pub price: i32,
    pub category: ProductCategory,
    pub product_type: ProductType,
    pub img_url: Option<String>,
}

/// Listing filters. All fields are optional and combined with AND.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductSearch {
    pub search_query: Option<String>,
    pub category: Option<ProductCategory>,
    pub product_type: Option<ProductType>,
    pub sell_status: Option<SellStatus>,
}

// ==================== Paging ====================

/// Zero-based page request; `size` falls back to the configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub page: u64,
    pub size: Option<u64>,
}

impl PageRequest {
    #[must_use]
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: Some(size),
        }
    }

    /// Effective page size clamped to `[1, max]`.
    #[must_use]
    pub fn effective_size(&self, default: u64, max: u64) -> u64 {
        self.size.unwrap_or(default).clamp(1, max.max(1))
    }

    /// Row offset of this page, `None` when it does not fit a signed 64-bit
    /// SQL offset.
    #[must_use]
    pub fn offset(&self, size: u64) -> Option<u64> {
        self.page
            .checked_mul(size)
            .filter(|offset| i64::try_from(*offset).is_ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, page: u64, size: u64, total_items: u64) -> Self {
        Self {
            items,
            page,
            size,
            total_items,
            total_pages: total_items.div_ceil(size.max(1)),
        }
    }

    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

// ==================== Carts ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: i64,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: i64,
    pub cart_id: i64,
    pub product_id: i64,
    pub product_model_id: i64,
    pub count: i32,
}

impl CartItem {
    /// Whether this cart item and an order detail refer to the same variant.
    #[must_use]
    pub fn same_variant(&self, detail: &OrderDetail) -> bool {
        self.product_id == detail.product_id && self.product_model_id == detail.product_model_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_id: i64,
    pub product_model_id: i64,
    pub count: i32,
}

/// Cart item enriched for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub cart_item_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_model_id: i64,
    pub model_select: String,
    pub price: i32,
    pub count: i32,
    pub total_price: i32,
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartView {
    pub cart_id: Option<i64>,
    pub user_id: String,
    pub items: Vec<CartLine>,
    pub total_price: i32,
}

// ==================== Orders ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Created and awaiting payment.
    #[default]
    Stay,
    Cancel,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stay => "STAY",
            Self::Cancel => "CANCEL",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = crate::catalog::UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STAY" => Ok(Self::Stay),
            "CANCEL" => Ok(Self::Cancel),
            other => Err(crate::catalog::UnknownVariant {
                kind: "order status",
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_model_id: i64,
    pub count: i32,
    /// Unit price captured when the detail was created.
    pub price: i32,
}

impl OrderDetail {
    #[must_use]
    pub fn total_price(&self) -> i32 {
        self.price.saturating_mul(self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderDetail {
    pub product_id: i64,
    pub product_model_id: i64,
    pub count: i32,
    pub price: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub user_id: String,
    pub status: OrderStatus,
    pub order_date: OffsetDateTime,
    pub items: Vec<OrderDetail>,
}

impl Order {
    #[must_use]
    pub fn total_price(&self) -> i32 {
        self.items
            .iter()
            .fold(0_i32, |acc, d| acc.saturating_add(d.total_price()))
    }

    #[must_use]
    pub fn find_item_for(&self, cart_item: &CartItem) -> Option<&OrderDetail> {
        self.items.iter().find(|d| cart_item.same_variant(d))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemView {
    pub order_detail_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_model_id: i64,
    pub model_select: String,
    pub count: i32,
    pub price: i32,
    pub total_price: i32,
    pub img_url: Option<String>,
}

/// Order summary shown on the payment page. `Default` is the empty order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderView {
    pub order_no: Option<i64>,
    pub total_price: i32,
    pub items: Vec<OrderItemView>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl OrderView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order_no.is_none()
    }
}
