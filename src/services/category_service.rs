use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    db::OrmConn,
    dto::categories::{CategoryList, CreateCategoryRequest},
    entity::categories::{ActiveModel, Column, Entity as Categories, Model as CategoryModel},
    error::{AppError, AppResult},
    models::Category,
    response::{ApiResponse, Meta},
};

pub async fn list_categories(orm: &OrmConn) -> AppResult<ApiResponse<CategoryList>> {
    let items = Categories::find()
        .order_by_asc(Column::Id)
        .all(orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        None,
    ))
}

pub async fn create_category(
    orm: &OrmConn,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let name = payload.name;
    let exist = Categories::find()
        .filter(Column::Name.eq(name.as_str()))
        .one(orm)
        .await?;

    if exist.is_some() {
        return Err(AppError::Conflict(format!(
            "Category {name} already exists"
        )));
    }

    let active = ActiveModel {
        id: NotSet,
        name: Set(name.clone()),
    };
    let category = active.insert(orm).await?;

    tracing::info!(category = %name, "category created");

    Ok(ApiResponse::success(
        format!("Category {name} created successfully"),
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

/// Resolve a category's current name. Called at serialization time, never
/// cached, so a rename retroactively changes every derived serialization.
pub async fn resolve_category_name(orm: &OrmConn, id: i32) -> AppResult<String> {
    let category = Categories::find_by_id(id).one(orm).await?;
    category
        .map(|c| c.name)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("category {id} is missing")))
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
    }
}
