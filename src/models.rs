use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Serialized user record. `role_name` is resolved from `role_id` at
/// serialization time so a role rename shows up immediately, and
/// `profile_image` falls back to the bundled default avatar when unset.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub username: String,
    pub enabled: bool,
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub role_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// Serialized product record. `category_name` is a live lookup against the
/// parent category, same pattern as `User::role_name`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image: String,
    pub count: i32,
    pub rate: Decimal,
    pub category_id: i32,
    pub category_name: String,
}
