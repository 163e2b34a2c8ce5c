pub mod cart;
pub mod cart_item;
pub mod order;
pub mod order_detail;
pub mod product;
pub mod product_image;
pub mod product_model;
pub mod user;
