use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{parse_timestamp, SqliteConnection};
use crate::domain::models::user::User;
use crate::storage::traits::UserStorage;

/// Repository for user operations
#[derive(Clone)]
pub struct UserRepository {
    db: SqliteConnection,
}

impl UserRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }

    fn row_to_user(row: &SqliteRow) -> Result<User> {
        let created_at: String = row.get("created_at");
        Ok(User {
            id: row.get("id"),
            name: row.get("name"),
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn store_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(user.created_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM users
            ORDER BY created_at DESC, ROWID DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_user).collect()
    }
}
