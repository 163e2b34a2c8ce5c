//! Repository ports. Implementations live in `infra::storage`.
//!
//! Every method takes a generic connection so services can run a sequence
//! of calls inside one `DatabaseTransaction`.

mod carts_repo;
mod orders_repo;
mod products_repo;
mod users_repo;

pub use sea_orm::ConnectionTrait as DbConnTrait;

pub use carts_repo::CartsRepository;
pub use orders_repo::OrdersRepository;
pub use products_repo::{NewProductImage, ProductsRepository};
pub use users_repo::UsersRepository;
