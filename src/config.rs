use std::env;

/// Directory served at `/static` that holds bundled assets (default avatar).
pub const ASSETS_DIR: &str = "static/assets";
/// Directory uploaded images are written to, also served at `/static`.
pub const UPLOAD_DIR: &str = "static/uploads";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub password_key: String,
    pub public_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => database_url_from_parts()?,
        };
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(4000);
        let jwt_secret = env::var("JWT_SECRET_KEY")?;
        let password_key = env::var("PASSWORD_KEY")?;
        let public_url = env::var("PUBLIC_URL").unwrap_or_else(|_| format!("http://{host}:{port}"));
        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            password_key,
            public_url,
        })
    }
}

fn database_url_from_parts() -> anyhow::Result<String> {
    let user = env::var("DB_USER")?;
    let password = env::var("DB_PASSWORD")?;
    let host = env::var("DB_HOST")?;
    let port = env::var("DB_PORT")?;
    let name = env::var("DB_NAME")?;
    Ok(format!("postgres://{user}:{password}@{host}:{port}/{name}"))
}
