use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use storefront_api::{
    config::AppConfig,
    db::{DbPool, OrmConn, create_orm_conn, create_pool},
    entity::{categories, products},
    services::auth_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    ensure_user(&pool, &config, "Admin", "admin", "admin@example.com", "admin123", 2).await?;
    ensure_user(&pool, &config, "Demo Shopper", "demo", "demo@example.com", "demo123", 1).await?;

    let books = ensure_category(&orm, "Books").await?;
    let gadgets = ensure_category(&orm, "Gadgets").await?;

    ensure_product(&orm, "The Rust Book", "19.99", "Learn Rust from scratch", 40, "4.8", books).await?;
    ensure_product(&orm, "Async Patterns", "24.50", "Async Rust in practice", 25, "4.5", books).await?;
    ensure_product(&orm, "Ferris Plush", "12.00", "A soft crab companion", 100, "4.9", gadgets).await?;

    println!("Seed completed");
    Ok(())
}

async fn ensure_user(
    pool: &DbPool,
    config: &AppConfig,
    name: &str,
    username: &str,
    email: &str,
    password: &str,
    role_id: i32,
) -> anyhow::Result<()> {
    let password = hash_password(password, &config.password_key);
    sqlx::query(
        r#"
        INSERT INTO users (name, email, username, password, enabled, profile_image, role_id)
        VALUES ($1, $2, $3, $4, TRUE, '', $5)
        ON CONFLICT (username) DO NOTHING
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(username)
    .bind(password)
    .bind(role_id)
    .execute(pool)
    .await?;

    println!("Ensured user {username} (role_id={role_id})");
    Ok(())
}

async fn ensure_category(orm: &OrmConn, name: &str) -> anyhow::Result<i32> {
    let existing = categories::Entity::find()
        .filter(categories::Column::Name.eq(name))
        .one(orm)
        .await?;
    if let Some(category) = existing {
        return Ok(category.id);
    }

    let category = categories::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
    }
    .insert(orm)
    .await?;

    println!("Seeded category {name}");
    Ok(category.id)
}

async fn ensure_product(
    orm: &OrmConn,
    title: &str,
    price: &str,
    description: &str,
    count: i32,
    rate: &str,
    category_id: i32,
) -> anyhow::Result<()> {
    let existing = products::Entity::find()
        .filter(products::Column::Title.eq(title))
        .one(orm)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    products::ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        price: Set(price.parse::<Decimal>()?),
        description: Set(Some(description.to_string())),
        image: Set(String::new()),
        count: Set(count),
        rate: Set(rate.parse::<Decimal>()?),
        category_id: Set(category_id),
    }
    .insert(orm)
    .await?;

    println!("Seeded product {title}");
    Ok(())
}
