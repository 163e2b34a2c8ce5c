//! Casemall SDK
//!
//! This crate provides the public API for the `casemall` module:
//! - `CasemallClientV1` trait
//! - Model types for products, carts and orders
//! - Catalog enums (`ProductCategory`, `ProductType`) with display labels
//! - Error types (`CasemallError`, `StockError`)
//!
//! ## Usage
//!
//! ```ignore
//! use casemall_sdk::CasemallClientV1;
//!
//! let order = client.create_order("alice", vec![cart_item_id]).await?;
//! println!("order #{:?} total {}", order.order_no, order.total_price);
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod catalog;
pub mod client;
pub mod errors;
pub mod models;

pub use catalog::{ProductCategory, ProductType, SellStatus, UnknownVariant};
pub use client::CasemallClientV1;
pub use errors::{CasemallError, StockError};
pub use models::{
    Cart, CartItem, CartLine, CartView, ImageUpload, MainProductItem, NewCartItem, NewOrderDetail,
    NewProductModel, NewUser, Order, OrderDetail, OrderItemView, OrderStatus, OrderView, Page,
    PageRequest, Product, ProductDetail, ProductForm, ProductImage, ProductModel, ProductSearch,
    User,
};
