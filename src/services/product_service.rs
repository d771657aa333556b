use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    db::OrmConn,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    services::category_service::resolve_category_name,
};

pub async fn list_products(orm: &OrmConn) -> AppResult<ApiResponse<ProductList>> {
    let models = Products::find().order_by_asc(Column::Id).all(orm).await?;

    let mut items = Vec::with_capacity(models.len());
    for model in models {
        items.push(product_to_api(orm, model).await?);
    }

    Ok(ApiResponse::success("Products", ProductList { items }, None))
}

/// An unknown category id yields an empty list, not an error.
pub async fn list_products_by_category(
    orm: &OrmConn,
    category_id: i32,
) -> AppResult<ApiResponse<ProductList>> {
    let models = Products::find()
        .filter(Column::CategoryId.eq(category_id))
        .order_by_asc(Column::Id)
        .all(orm)
        .await?;

    let mut items = Vec::with_capacity(models.len());
    for model in models {
        items.push(product_to_api(orm, model).await?);
    }

    Ok(ApiResponse::success("Products", ProductList { items }, None))
}

pub async fn get_product(orm: &OrmConn, id: i32) -> AppResult<ApiResponse<Product>> {
    let model = Products::find_by_id(id).one(orm).await?;
    let model = match model {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let product = product_to_api(orm, model).await?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    orm: &OrmConn,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let active = ActiveModel {
        id: NotSet,
        title: Set(payload.title),
        price: Set(payload.price),
        description: Set(payload.description),
        image: Set(payload.image),
        count: Set(payload.count),
        rate: Set(payload.rate),
        category_id: Set(payload.category_id),
    };
    let product = active.insert(orm).await?;

    tracing::info!(product_id = product.id, "product created");

    let product = product_to_api(orm, product).await?;
    Ok(ApiResponse::success(
        "Product created successfully",
        product,
        Some(Meta::empty()),
    ))
}

/// Unguarded `UPDATE ... WHERE id = ?`: succeeds even when the id matches no
/// row. TODO: decide whether an unmatched id should become a NotFound.
pub async fn update_product(
    orm: &OrmConn,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    Products::update_many()
        .col_expr(Column::Title, Expr::value(payload.title))
        .col_expr(Column::Price, Expr::value(payload.price))
        .col_expr(Column::Description, Expr::value(payload.description))
        .col_expr(Column::Image, Expr::value(payload.image))
        .col_expr(Column::Count, Expr::value(payload.count))
        .col_expr(Column::Rate, Expr::value(payload.rate))
        .col_expr(Column::CategoryId, Expr::value(payload.category_id))
        .filter(Column::Id.eq(payload.id))
        .exec(orm)
        .await?;

    tracing::info!(product_id = payload.id, "product updated");

    Ok(ApiResponse::success(
        "Product modified successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Same permissive shape as `update_product`: no existence check.
pub async fn delete_product(orm: &OrmConn, id: i32) -> AppResult<ApiResponse<serde_json::Value>> {
    Products::delete_by_id(id).exec(orm).await?;

    tracing::info!(product_id = id, "product deleted");

    Ok(ApiResponse::success(
        "Product deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Serialize a product row, resolving the parent category's name live.
pub async fn product_to_api(orm: &OrmConn, model: ProductModel) -> AppResult<Product> {
    let category_name = resolve_category_name(orm, model.category_id).await?;
    Ok(Product {
        id: model.id,
        title: model.title,
        price: model.price,
        description: model.description,
        image: model.image,
        count: model.count,
        rate: model.rate,
        category_id: model.category_id,
        category_name,
    })
}
