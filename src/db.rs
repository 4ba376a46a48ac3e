use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::error::HrError;

/// Opens the pool and applies pending migrations.
///
/// An in-memory database only exists while its connection is open, so
/// `sqlite::memory:` gets a single connection that is never recycled.
pub async fn init_db(database_url: &str) -> Result<SqlitePool, HrError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new().connect_with(options).await?
    };

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database ready");

    Ok(pool)
}
