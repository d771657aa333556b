use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub title: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image: String,
    pub count: i32,
    pub rate: Decimal,
    pub category_id: i32,
}

/// Full-replacement update: the product id rides in the PUT body and every
/// field is required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub id: i32,
    pub title: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image: String,
    pub count: i32,
    pub rate: Decimal,
    pub category_id: i32,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
