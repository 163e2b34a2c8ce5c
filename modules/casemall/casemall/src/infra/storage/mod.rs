//! Infrastructure storage layer - database persistence.
//!
//! This module contains ALL SeaORM-specific code:
//! - `entity/` - SeaORM entity definitions, one per table
//! - `mapper.rs` - Conversions between SeaORM models and SDK contract types
//! - `migrations/` - Database schema migrations
//! - `*_sea_repo.rs` - Repository implementations over any `ConnectionTrait`

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;

mod carts_sea_repo;
mod orders_sea_repo;
mod products_sea_repo;
mod users_sea_repo;

pub use carts_sea_repo::SeaCartsRepository;
pub use orders_sea_repo::SeaOrdersRepository;
pub use products_sea_repo::SeaProductsRepository;
pub use users_sea_repo::SeaUsersRepository;
