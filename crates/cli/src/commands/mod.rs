//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

/// Resolve the catalog database URL from the environment.
///
/// Prefers `DATABASE_URL`; otherwise composes one from `DB_HOST`, `DB_PORT`,
/// `DB_NAME`, `DB_USER`, and `DB_PASS`, mirroring the server's defaults.
fn database_url() -> SecretString {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return SecretString::from(url);
    }

    let host = env_or("DB_HOST", "127.0.0.1");
    let port = env_or("DB_PORT", "5432");
    let name = env_or("DB_NAME", "partdesk");
    let user = env_or("DB_USER", "postgres");
    let pass = env_or("DB_PASS", "");

    let url = if pass.is_empty() {
        format!("postgres://{user}@{host}:{port}/{name}")
    } else {
        format!("postgres://{user}:{pass}@{host}:{port}/{name}")
    };
    SecretString::from(url)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Connect to the catalog database using the environment configuration.
async fn connect() -> Result<PgPool, sqlx::Error> {
    dotenvy::dotenv().ok();
    PgPool::connect(database_url().expose_secret()).await
}
