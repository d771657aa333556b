use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use sqlx::FromRow;

use crate::{
    config::{ASSETS_DIR, AppConfig},
    db::DbPool,
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest},
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
    token,
};

/// Every registrant gets this role; the role rows are seeded by migration.
const DEFAULT_ROLE_ID: i32 = 1;

/// Database row for a user, before serialization resolves the role name.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub enabled: bool,
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub role_id: i32,
}

/// Legacy credential digest: `hex(md5(password + key))`, no per-user salt.
/// Kept for stored-hash compatibility; a hardened replacement needs a
/// migration plan for existing rows.
pub fn hash_password(password: &str, key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify_password(password: &str, key: &str, stored: &str) -> bool {
    hash_password(password, key) == stored
}

pub async fn register_user(
    pool: &DbPool,
    config: &AppConfig,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    // Duplicate check is by username only; email uniqueness is left to the
    // database constraint.
    let exist: Option<(i32,)> = sqlx::query_as("SELECT id FROM users WHERE username = $1")
        .bind(payload.username.as_str())
        .fetch_optional(pool)
        .await?;

    if exist.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password = hash_password(&payload.password, &config.password_key);
    let now = Utc::now();

    let user: UserRow = sqlx::query_as(
        r#"
        INSERT INTO users (name, email, username, password, enabled, profile_image,
                           created_at, updated_at, role_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8)
        RETURNING *
        "#,
    )
    .bind(payload.name.as_str())
    .bind(payload.email.as_str())
    .bind(payload.username.as_str())
    .bind(password)
    .bind(payload.enabled)
    .bind(payload.profile_image.as_str())
    .bind(now)
    .bind(DEFAULT_ROLE_ID)
    .fetch_one(pool)
    .await?;

    tracing::info!(username = %user.username, "user registered");

    let user = user_to_api(pool, config, user).await?;
    Ok(ApiResponse::success(
        "User registered successfully",
        user,
        None,
    ))
}

pub async fn login_user(
    pool: &DbPool,
    config: &AppConfig,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(payload.username.as_str())
        .fetch_optional(pool)
        .await?;

    // Unknown user and wrong password are indistinguishable to the caller.
    let user = match user {
        Some(u) => u,
        None => return Err(AppError::InvalidCredentials),
    };

    if !verify_password(&payload.password, &config.password_key, &user.password) {
        return Err(AppError::InvalidCredentials);
    }

    // The enabled flag is only consulted once the password has verified.
    if !user.enabled {
        return Err(AppError::Disabled);
    }

    let token = token::issue_token(&config.jwt_secret, &user.username)?;

    tracing::info!(username = %user.username, "user logged in");

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse { token },
        Some(Meta::empty()),
    ))
}

/// Resolve the identity extracted from a verified token to a full user record.
pub async fn current_user(
    pool: &DbPool,
    config: &AppConfig,
    username: &str,
) -> AppResult<ApiResponse<User>> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::NotFound),
    };

    let user = user_to_api(pool, config, user).await?;
    Ok(ApiResponse::success("Current user", user, None))
}

/// Serialize a user row. The role name is looked up live, every time, so a
/// role rename propagates to all derived serializations immediately.
pub async fn user_to_api(pool: &DbPool, config: &AppConfig, row: UserRow) -> AppResult<User> {
    let role: Option<(String,)> = sqlx::query_as("SELECT name FROM roles WHERE id = $1")
        .bind(row.role_id)
        .fetch_optional(pool)
        .await?;
    let role_name = role
        .map(|r| r.0)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("role {} is missing", row.role_id)))?;

    let profile_image = if row.profile_image.is_empty() {
        format!("{}/{}/user.png", config.public_url, ASSETS_DIR)
    } else {
        row.profile_image
    };

    Ok(User {
        id: row.id,
        name: row.name,
        email: row.email,
        username: row.username,
        enabled: row.enabled,
        profile_image,
        created_at: row.created_at,
        updated_at: row.updated_at,
        role_name,
    })
}
