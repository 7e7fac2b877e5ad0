use async_trait::async_trait;

use super::models::tracked_item::TrackedItem;
use super::DbPool;

/// Persistence port for the metered service's `items(id, name)` table.
#[async_trait]
pub trait TrackedItemRepository: Send + Sync {
    async fn create(&self, name: &str) -> sqlx::Result<TrackedItem>;
    async fn list_all(&self) -> sqlx::Result<Vec<TrackedItem>>;
}

pub struct SqliteTrackedItemRepository {
    pool: DbPool,
}

impl SqliteTrackedItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackedItemRepository for SqliteTrackedItemRepository {
    async fn create(&self, name: &str) -> sqlx::Result<TrackedItem> {
        let result = sqlx::query("INSERT INTO items (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(TrackedItem {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    async fn list_all(&self) -> sqlx::Result<Vec<TrackedItem>> {
        sqlx::query_as::<_, TrackedItem>("SELECT id, name FROM items ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
    }
}
