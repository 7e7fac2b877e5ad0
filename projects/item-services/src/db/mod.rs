use anyhow::Result;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;

pub mod items;
pub mod models;
pub mod tracked_items;
pub mod users;

pub type DbPool = SqlitePool;

pub static AUTH_MIGRATIONS: Migrator = sqlx::migrate!("./src/db/migrations/auth");
pub static METERED_MIGRATIONS: Migrator = sqlx::migrate!("./src/db/migrations/metered");

const IN_MEMORY: &str = ":memory:";

/// Open a pool on `path`. `:memory:` yields a single long-lived connection so
/// every query sees the same database.
pub async fn connect(path: &str) -> Result<DbPool> {
    if path == IN_MEMORY {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?;
        return Ok(pool);
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await?;

    tracing::info!("Database connected: {}", path);
    Ok(pool)
}

/// Pool for the auth/items store with its schema applied.
pub async fn init_auth_store(path: &str) -> Result<DbPool> {
    let pool = connect(path).await?;
    AUTH_MIGRATIONS.run(&pool).await?;
    Ok(pool)
}

/// Pool for the metered items store with its schema applied.
pub async fn init_metered_store(path: &str) -> Result<DbPool> {
    let pool = connect(path).await?;
    METERED_MIGRATIONS.run(&pool).await?;
    Ok(pool)
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}
