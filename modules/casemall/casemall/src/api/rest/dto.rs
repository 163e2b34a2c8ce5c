use std::str::FromStr;

use casemall_sdk::{
    CartItem, CartLine, CartView, MainProductItem, NewCartItem, NewProductModel, NewUser,
    OrderItemView, OrderView, Page, PageRequest, Product, ProductCategory, ProductDetail,
    ProductForm, ProductImage, ProductModel, ProductSearch, ProductType, SellStatus,
    UnknownVariant, User,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use super::problem::{self, Problem};

fn parse_enum<T>(field: &str, value: &str) -> Result<T, Problem>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .parse()
        .map_err(|e: UnknownVariant| problem::unprocessable(field, e.to_string()))
}

fn parse_opt_enum<T>(field: &str, value: Option<&str>) -> Result<Option<T>, Problem>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .filter(|v| !v.is_empty())
        .map(|v| parse_enum(field, v))
        .transpose()
}

// ==================== Users ====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserReq {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<RegisterUserReq> for NewUser {
    fn from(req: RegisterUserReq) -> Self {
        Self {
            user_id: req.user_id,
            name: req.name,
            email: req.email,
            phone: req.phone,
        }
    }
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            name: u.name,
            email: u.email,
            phone: u.phone,
        }
    }
}

// ==================== Products ====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub price: i32,
    pub detail: String,
    pub category: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub sell_status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductModelDto {
    pub id: i64,
    pub product_id: i64,
    pub model_select: String,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductImageDto {
    pub id: i64,
    pub img_name: String,
    pub ori_img_name: String,
    pub img_url: String,
    pub main: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailDto {
    pub product: ProductDto,
    pub models: Vec<ProductModelDto>,
    pub images: Vec<ProductImageDto>,
}

/// Storefront listing entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MainProductDto {
    pub id: i64,
    pub name: String,
    pub detail: String,
    pub price: i32,
    pub category: String,
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductModelReq {
    pub model_select: Option<String>,
    pub stock: Option<i32>,
}

/// JSON `product` part of the admin multipart form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductFormReq {
    pub name: String,
    pub price: i32,
    #[serde(default)]
    pub detail: String,
    pub category: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub sell_status: Option<String>,
    #[serde(default)]
    pub models: Vec<ProductModelReq>,
}

impl ProductFormReq {
    pub fn into_form(self) -> Result<ProductForm, Problem> {
        Ok(ProductForm {
            category: parse_enum("category", &self.category)?,
            product_type: parse_enum("type", &self.product_type)?,
            sell_status: parse_opt_enum("sell_status", self.sell_status.as_deref())?
                .unwrap_or_default(),
            name: self.name,
            price: self.price,
            detail: self.detail,
            models: self
                .models
                .into_iter()
                .map(|m| NewProductModel {
                    model_select: m.model_select,
                    stock: m.stock,
                })
                .collect(),
        })
    }
}

/// Listing query string; enum filters use their wire names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListQuery {
    pub search_query: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub sell_status: Option<String>,
    #[serde(default)]
    pub page: u64,
    pub size: Option<u64>,
}

impl ProductListQuery {
    pub fn into_search(self) -> Result<(ProductSearch, PageRequest), Problem> {
        let search = ProductSearch {
            search_query: self.search_query.filter(|q| !q.trim().is_empty()),
            category: parse_opt_enum("category", self.category.as_deref())?,
            product_type: parse_opt_enum("type", self.product_type.as_deref())?,
            sell_status: parse_opt_enum("sell_status", self.sell_status.as_deref())?,
        };
        let page = PageRequest {
            page: self.page,
            size: self.size,
        };
        // the service clamps the size later; any size of at least 1 must fit
        if page.offset(self.size.unwrap_or(1).max(1)).is_none() {
            return Err(problem::unprocessable("page", "page is out of range"));
        }
        Ok((search, page))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> PageDto<T> {
    pub fn from_page<S>(page: Page<S>) -> Self
    where
        T: From<S>,
    {
        let page = page.map_items(T::from);
        Self {
            items: page.items,
            page: page.page,
            size: page.size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductTypeDto {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub code: String,
    pub label: String,
    pub types: Vec<ProductTypeDto>,
}

impl From<ProductCategory> for CategoryDto {
    fn from(c: ProductCategory) -> Self {
        Self {
            code: c.as_str().to_owned(),
            label: c.label().to_owned(),
            types: c.types().into_iter().map(ProductTypeDto::from).collect(),
        }
    }
}

impl From<ProductType> for ProductTypeDto {
    fn from(t: ProductType) -> Self {
        Self {
            code: t.as_str().to_owned(),
            label: t.label().to_owned(),
        }
    }
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            detail: p.detail,
            category: p.category.to_string(),
            product_type: p.product_type.to_string(),
            sell_status: p.sell_status.to_string(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<ProductModel> for ProductModelDto {
    fn from(m: ProductModel) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            model_select: m.model_select,
            stock: m.stock,
        }
    }
}

impl From<ProductImage> for ProductImageDto {
    fn from(i: ProductImage) -> Self {
        Self {
            id: i.id,
            img_name: i.img_name,
            ori_img_name: i.ori_img_name,
            img_url: i.img_url,
            main: i.main,
        }
    }
}

impl From<ProductDetail> for ProductDetailDto {
    fn from(d: ProductDetail) -> Self {
        Self {
            product: d.product.into(),
            models: d.models.into_iter().map(Into::into).collect(),
            images: d.images.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<MainProductItem> for MainProductDto {
    fn from(i: MainProductItem) -> Self {
        Self {
            id: i.id,
            name: i.name,
            detail: i.detail,
            price: i.price,
            category: i.category.to_string(),
            product_type: i.product_type.to_string(),
            img_url: i.img_url,
        }
    }
}

// ==================== Cart ====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddCartItemReq {
    pub product_id: i64,
    pub product_model_id: i64,
    pub count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCartItemReq {
    pub count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItemDto {
    pub id: i64,
    pub cart_id: i64,
    pub product_id: i64,
    pub product_model_id: i64,
    pub count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartLineDto {
    pub cart_item_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_model_id: i64,
    pub model_select: String,
    pub price: i32,
    pub count: i32,
    pub total_price: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartDto {
    pub cart_id: Option<i64>,
    pub user_id: String,
    pub items: Vec<CartLineDto>,
    pub total_price: i32,
}

impl From<AddCartItemReq> for NewCartItem {
    fn from(req: AddCartItemReq) -> Self {
        Self {
            product_id: req.product_id,
            product_model_id: req.product_model_id,
            count: req.count,
        }
    }
}

impl From<CartItem> for CartItemDto {
    fn from(i: CartItem) -> Self {
        Self {
            id: i.id,
            cart_id: i.cart_id,
            product_id: i.product_id,
            product_model_id: i.product_model_id,
            count: i.count,
        }
    }
}

impl From<CartLine> for CartLineDto {
    fn from(l: CartLine) -> Self {
        Self {
            cart_item_id: l.cart_item_id,
            product_id: l.product_id,
            product_name: l.product_name,
            product_model_id: l.product_model_id,
            model_select: l.model_select,
            price: l.price,
            count: l.count,
            total_price: l.total_price,
            img_url: l.img_url,
        }
    }
}

impl From<CartView> for CartDto {
    fn from(v: CartView) -> Self {
        Self {
            cart_id: v.cart_id,
            user_id: v.user_id,
            items: v.items.into_iter().map(Into::into).collect(),
            total_price: v.total_price,
        }
    }
}

// ==================== Orders ====================

/// Where the ordered lines come from. Only `cart` is supported.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderReq {
    #[serde(rename = "type")]
    pub source: String,
    #[serde(default)]
    pub cart_item_ids: Vec<i64>,
}

impl OrderReq {
    pub const CART: &'static str = "cart";

    pub fn cart_item_ids(self) -> Result<Vec<i64>, Problem> {
        if self.source != Self::CART {
            return Err(problem::unprocessable(
                "type",
                format!("unsupported order type '{}'", self.source),
            ));
        }
        Ok(self.cart_item_ids)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemoveOrderItemReq {
    pub cart_item_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDto {
    pub order_detail_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_model_id: i64,
    pub model_select: String,
    pub count: i32,
    pub price: i32,
    pub total_price: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub order_no: Option<i64>,
    pub total_price: i32,
    pub items: Vec<OrderItemDto>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<OrderItemView> for OrderItemDto {
    fn from(i: OrderItemView) -> Self {
        Self {
            order_detail_id: i.order_detail_id,
            product_id: i.product_id,
            product_name: i.product_name,
            product_model_id: i.product_model_id,
            model_select: i.model_select,
            count: i.count,
            price: i.price,
            total_price: i.total_price,
            img_url: i.img_url,
        }
    }
}

impl From<OrderView> for OrderDto {
    fn from(v: OrderView) -> Self {
        Self {
            order_no: v.order_no,
            total_price: v.total_price,
            items: v.items.into_iter().map(Into::into).collect(),
            user_name: v.user_name,
            email: v.email,
            phone: v.phone,
        }
    }
}
