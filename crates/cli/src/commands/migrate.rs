//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! partdesk migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - Full `PostgreSQL` connection string, or the
//!   `DB_HOST`/`DB_PORT`/`DB_NAME`/`DB_USER`/`DB_PASS` parts

use tracing::info;

/// Run the catalog migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Connecting to catalog database...");
    let pool = super::connect().await?;

    info!("Running catalog migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    info!("Catalog migrations complete!");
    Ok(())
}
