use async_trait::async_trait;
use chrono::Utc;

use super::models::user::User;
use super::DbPool;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> sqlx::Result<Option<User>>;
    /// Insert a user; fails with a unique violation if the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> sqlx::Result<User>;
}

pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_username(&self, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE username = ?"
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create(&self, username: &str, password_hash: &str) -> sqlx::Result<User> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO users (username, password, created_at) VALUES (?, ?, ?)"
        )
        .bind(username)
        .bind(password_hash)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            password: password_hash.to_string(),
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_auth_store, is_unique_violation};

    #[tokio::test]
    async fn test_duplicate_username_is_a_unique_violation() {
        let pool = init_auth_store(":memory:").await.expect("store");
        let repo = SqliteUserRepository::new(pool);

        repo.create("alice", "$argon2id$stub").await.expect("first insert");
        let err = repo.create("alice", "$argon2id$other").await.expect_err("second insert");
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_lookup_by_username() {
        let pool = init_auth_store(":memory:").await.expect("store");
        let repo = SqliteUserRepository::new(pool);

        let created = repo.create("bob", "$argon2id$stub").await.expect("insert");
        let found = repo.find_by_username("bob").await.expect("query").expect("present");
        assert_eq!(found.id, created.id);
        assert!(repo.find_by_username("nobody").await.expect("query").is_none());
    }
}
