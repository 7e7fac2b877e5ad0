use serde::Deserialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// argon2 PHC string, never the plaintext.
    pub password: String,
    pub created_at: String,
}

/// Body of `/api/register` and `/api/login`.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
