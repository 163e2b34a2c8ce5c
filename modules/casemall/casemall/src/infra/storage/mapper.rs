//! Conversions between SeaORM models and SDK contract types.
//!
//! Enum columns are stored as wire names; a row that fails to parse is
//! reported as a database error rather than silently defaulted.

use std::str::FromStr;

use casemall_sdk::{
    Cart, CartItem, OrderDetail, OrderStatus, Product, ProductImage, ProductModel, User,
};

use crate::domain::error::DomainError;
use crate::infra::storage::entity::{
    cart, cart_item, order_detail, product, product_image, product_model, user,
};

fn parse_column<T>(column: &'static str, value: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| DomainError::database(format!("corrupt {column} column: {e}")))
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            user_id: m.user_id,
            name: m.name,
            email: m.email,
            phone: m.phone,
        }
    }
}

impl TryFrom<product::Model> for Product {
    type Error = DomainError;

    fn try_from(m: product::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_column("products.category", &m.category)?,
            product_type: parse_column("products.product_type", &m.product_type)?,
            sell_status: parse_column("products.sell_status", &m.sell_status)?,
            id: m.id,
            name: m.name,
            price: m.price,
            detail: m.detail,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

impl From<product_model::Model> for ProductModel {
    fn from(m: product_model::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            model_select: m.model_select,
            stock: m.stock,
        }
    }
}

impl From<product_image::Model> for ProductImage {
    fn from(m: product_image::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            img_name: m.img_name,
            ori_img_name: m.ori_img_name,
            img_url: m.img_url,
            main: m.main,
        }
    }
}

impl From<cart::Model> for Cart {
    fn from(m: cart::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
        }
    }
}

impl From<cart_item::Model> for CartItem {
    fn from(m: cart_item::Model) -> Self {
        Self {
            id: m.id,
            cart_id: m.cart_id,
            product_id: m.product_id,
            product_model_id: m.product_model_id,
            count: m.count,
        }
    }
}

impl From<order_detail::Model> for OrderDetail {
    fn from(m: order_detail::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            product_id: m.product_id,
            product_model_id: m.product_model_id,
            count: m.count,
            price: m.price,
        }
    }
}

pub fn order_status(value: &str) -> Result<OrderStatus, DomainError> {
    parse_column("orders.status", value)
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    fn product_row(category: &str) -> product::Model {
        product::Model {
            id: 1,
            name: "Heart tok".to_owned(),
            price: 5_000,
            detail: String::new(),
            category: category.to_owned(),
            product_type: "HEART".to_owned(),
            sell_status: "SOLD_OUT".to_owned(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn product_row_maps_wire_names() {
        let p = Product::try_from(product_row("TOK")).unwrap();
        assert_eq!(p.category, casemall_sdk::ProductCategory::Tok);
        assert_eq!(p.product_type, casemall_sdk::ProductType::Heart);
        assert_eq!(p.sell_status, casemall_sdk::SellStatus::SoldOut);
    }

    #[test]
    fn corrupt_enum_column_is_a_database_error() {
        let err = Product::try_from(product_row("KEYRING")).unwrap_err();
        assert!(
            matches!(err, DomainError::Database { ref message } if message.contains("products.category"))
        );
        assert!(order_status("PAID").is_err());
    }
}
