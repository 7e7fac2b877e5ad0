use async_trait::async_trait;

use super::models::item::{Item, NewItem};
use super::DbPool;

/// Persistence port for items of the auth/items service.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> sqlx::Result<Option<Item>>;
    async fn list_all(&self) -> sqlx::Result<Vec<Item>>;
    async fn create(&self, item: NewItem) -> sqlx::Result<Item>;
    /// Persist every column of an existing item.
    async fn save(&self, item: &Item) -> sqlx::Result<()>;
    /// Returns false when no row had that id.
    async fn delete(&self, id: i64) -> sqlx::Result<bool>;
}

pub struct SqliteItemRepository {
    pool: DbPool,
}

impl SqliteItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    async fn find_by_id(&self, id: i64) -> sqlx::Result<Option<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT id, name, description, price, image FROM items WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_all(&self) -> sqlx::Result<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT id, name, description, price, image FROM items ORDER BY id ASC"
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn create(&self, item: NewItem) -> sqlx::Result<Item> {
        let result = sqlx::query(
            "INSERT INTO items (name, description, price, image) VALUES (?, ?, ?, ?)"
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.image)
        .execute(&self.pool)
        .await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            name: item.name,
            description: item.description,
            price: item.price,
            image: item.image,
        })
    }

    async fn save(&self, item: &Item) -> sqlx::Result<()> {
        sqlx::query(
            "UPDATE items SET name = ?, description = ?, price = ?, image = ? WHERE id = ?"
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.image)
        .bind(item.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
