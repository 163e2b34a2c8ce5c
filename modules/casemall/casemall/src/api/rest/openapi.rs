use utoipa::OpenApi;

use super::dto::{
    AddCartItemReq, CartDto, CartItemDto, CartLineDto, CategoryDto, MainProductDto, OrderDto,
    OrderItemDto, OrderReq, PageDto, ProductDetailDto, ProductDto, ProductFormReq,
    ProductImageDto, ProductModelDto, ProductModelReq, ProductTypeDto, RegisterUserReq,
    RemoveOrderItemReq, UpdateCartItemReq, UserDto,
};
use super::handlers::HealthDto;
use super::problem::{Problem, ValidationViolation};

#[derive(OpenApi)]
#[openapi(
    info(title = "Casemall API", description = "Phone accessory storefront"),
    components(schemas(
        Problem,
        ValidationViolation,
        HealthDto,
        RegisterUserReq,
        UserDto,
        ProductDto,
        ProductModelDto,
        ProductImageDto,
        ProductDetailDto,
        ProductFormReq,
        ProductModelReq,
        MainProductDto,
        PageDto<MainProductDto>,
        PageDto<ProductDto>,
        CategoryDto,
        ProductTypeDto,
        AddCartItemReq,
        UpdateCartItemReq,
        CartItemDto,
        CartLineDto,
        CartDto,
        OrderReq,
        RemoveOrderItemReq,
        OrderItemDto,
        OrderDto,
    ))
)]
pub struct ApiDoc;
