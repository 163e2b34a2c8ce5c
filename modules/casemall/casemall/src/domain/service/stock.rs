//! Stock movements shared by the order flows.
//!
//! The in-memory check on `ProductModel` produces the error the caller sees;
//! the guarded UPDATE in the repository is what actually keeps the column
//! from going negative when two transactions race.

use casemall_sdk::ProductModel;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::repos::{DbConnTrait, ProductsRepository};

pub(super) async fn load_model<PR, C>(
    repo: &PR,
    conn: &C,
    model_id: i64,
) -> Result<ProductModel, DomainError>
where
    PR: ProductsRepository,
    C: DbConnTrait + Send + Sync,
{
    repo.get_model(conn, model_id)
        .await?
        .ok_or_else(|| DomainError::product_model_not_found(model_id))
}

/// Take `quantity` units of a model out of stock.
pub(super) async fn remove_stock<PR, C>(
    repo: &PR,
    conn: &C,
    model_id: i64,
    quantity: i32,
) -> Result<ProductModel, DomainError>
where
    PR: ProductsRepository,
    C: DbConnTrait + Send + Sync,
{
    let mut model = load_model(repo, conn, model_id).await?;
    let available = model.stock;
    model.remove_stock(quantity)?;

    if !repo.decrease_stock(conn, model_id, quantity).await? {
        return Err(DomainError::OutOfStock {
            model_id,
            requested: quantity,
            available,
        });
    }

    debug!(model_id, quantity, stock = model.stock, "stock removed");
    Ok(model)
}

/// Return `quantity` units of a model to stock.
pub(super) async fn add_stock<PR, C>(
    repo: &PR,
    conn: &C,
    model_id: i64,
    quantity: i32,
) -> Result<ProductModel, DomainError>
where
    PR: ProductsRepository,
    C: DbConnTrait + Send + Sync,
{
    let mut model = load_model(repo, conn, model_id).await?;
    model.add_stock(quantity)?;
    repo.increase_stock(conn, model_id, quantity).await?;

    debug!(model_id, quantity, stock = model.stock, "stock restored");
    Ok(model)
}
