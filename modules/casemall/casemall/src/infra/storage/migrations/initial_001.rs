use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(users_table()).await?;
        manager.create_table(products_table()).await?;
        manager.create_table(product_models_table()).await?;
        manager.create_table(product_images_table()).await?;
        manager.create_table(carts_table()).await?;
        manager.create_table(cart_items_table()).await?;
        manager.create_index(ux_cart_items_variant_index()).await?;
        manager.create_table(orders_table()).await?;
        manager.create_index(ix_orders_user_status_index()).await?;
        manager.create_table(order_details_table()).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderDetails::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CartItems::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Carts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductImages::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductModels::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await
    }
}

fn users_table() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Users::UserId)
                .string_len(64)
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(Users::Name).string().not_null())
        .col(ColumnDef::new(Users::Email).string().not_null())
        .col(ColumnDef::new(Users::Phone).string().not_null())
        .to_owned()
}

fn products_table() -> TableCreateStatement {
    Table::create()
        .table(Products::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Products::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Products::Name).string().not_null())
        .col(ColumnDef::new(Products::Price).integer().not_null())
        .col(ColumnDef::new(Products::Detail).text().not_null())
        .col(ColumnDef::new(Products::Category).string_len(32).not_null())
        .col(
            ColumnDef::new(Products::ProductType)
                .string_len(32)
                .not_null(),
        )
        .col(
            ColumnDef::new(Products::SellStatus)
                .string_len(16)
                .not_null(),
        )
        .col(
            ColumnDef::new(Products::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Products::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

fn product_models_table() -> TableCreateStatement {
    Table::create()
        .table(ProductModels::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(ProductModels::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(ProductModels::ProductId)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(ProductModels::ModelSelect)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(ProductModels::Stock).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_product_models_product")
                .from(ProductModels::Table, ProductModels::ProductId)
                .to(Products::Table, Products::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn product_images_table() -> TableCreateStatement {
    Table::create()
        .table(ProductImages::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(ProductImages::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(ProductImages::ProductId)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(ProductImages::ImgName).string().not_null())
        .col(
            ColumnDef::new(ProductImages::OriImgName)
                .string()
                .not_null(),
        )
        .col(ColumnDef::new(ProductImages::ImgUrl).string().not_null())
        .col(
            ColumnDef::new(ProductImages::Main)
                .boolean()
                .not_null()
                .default(false),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_product_images_product")
                .from(ProductImages::Table, ProductImages::ProductId)
                .to(Products::Table, Products::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn carts_table() -> TableCreateStatement {
    Table::create()
        .table(Carts::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Carts::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Carts::UserId)
                .string_len(64)
                .not_null()
                .unique_key(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_carts_user")
                .from(Carts::Table, Carts::UserId)
                .to(Users::Table, Users::UserId)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn cart_items_table() -> TableCreateStatement {
    Table::create()
        .table(CartItems::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(CartItems::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(CartItems::CartId).big_integer().not_null())
        .col(
            ColumnDef::new(CartItems::ProductId)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(CartItems::ProductModelId)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(CartItems::Count).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_cart_items_cart")
                .from(CartItems::Table, CartItems::CartId)
                .to(Carts::Table, Carts::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_cart_items_product")
                .from(CartItems::Table, CartItems::ProductId)
                .to(Products::Table, Products::Id),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_cart_items_product_model")
                .from(CartItems::Table, CartItems::ProductModelId)
                .to(ProductModels::Table, ProductModels::Id),
        )
        .to_owned()
}

fn ux_cart_items_variant_index() -> IndexCreateStatement {
    Index::create()
        .name("ux_cart_items_variant")
        .table(CartItems::Table)
        .col(CartItems::CartId)
        .col(CartItems::ProductId)
        .col(CartItems::ProductModelId)
        .unique()
        .to_owned()
}

fn orders_table() -> TableCreateStatement {
    Table::create()
        .table(Orders::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Orders::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Orders::UserId).string_len(64).not_null())
        .col(ColumnDef::new(Orders::Status).string_len(16).not_null())
        .col(
            ColumnDef::new(Orders::OrderDate)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_orders_user")
                .from(Orders::Table, Orders::UserId)
                .to(Users::Table, Users::UserId),
        )
        .to_owned()
}

fn ix_orders_user_status_index() -> IndexCreateStatement {
    Index::create()
        .name("ix_orders_user_status")
        .table(Orders::Table)
        .col(Orders::UserId)
        .col(Orders::Status)
        .to_owned()
}

fn order_details_table() -> TableCreateStatement {
    Table::create()
        .table(OrderDetails::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(OrderDetails::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(OrderDetails::OrderId)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(OrderDetails::ProductId)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(OrderDetails::ProductModelId)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(OrderDetails::Count).integer().not_null())
        .col(ColumnDef::new(OrderDetails::Price).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_order_details_order")
                .from(OrderDetails::Table, OrderDetails::OrderId)
                .to(Orders::Table, Orders::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_order_details_product")
                .from(OrderDetails::Table, OrderDetails::ProductId)
                .to(Products::Table, Products::Id),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_order_details_product_model")
                .from(OrderDetails::Table, OrderDetails::ProductModelId)
                .to(ProductModels::Table, ProductModels::Id),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
    Name,
    Email,
    Phone,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Price,
    Detail,
    Category,
    ProductType,
    SellStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProductModels {
    Table,
    Id,
    ProductId,
    ModelSelect,
    Stock,
}

#[derive(DeriveIden)]
enum ProductImages {
    Table,
    Id,
    ProductId,
    ImgName,
    OriImgName,
    ImgUrl,
    Main,
}

#[derive(DeriveIden)]
enum Carts {
    Table,
    Id,
    UserId,
}

#[derive(DeriveIden)]
enum CartItems {
    Table,
    Id,
    CartId,
    ProductId,
    ProductModelId,
    Count,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    UserId,
    Status,
    OrderDate,
}

#[derive(DeriveIden)]
enum OrderDetails {
    Table,
    Id,
    OrderId,
    ProductId,
    ProductModelId,
    Count,
    Price,
}
