//! User operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewUser, User};
use crate::repository::Database;

impl Database {
    /// Insert a new user
    ///
    /// No uniqueness check: a second registration under the same
    /// username inserts a second row.
    pub async fn insert_user(&self, user: NewUser) -> Result<User, DbError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(User {
            id,
            username: user.username,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a user by username
    ///
    /// Resolves the lowest-id row when duplicates exist.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM users
            WHERE username = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        result
            .map(|row| User::try_from(&row).map_err(DbError::from))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_db;

    #[tokio::test]
    async fn test_insert_and_lookup_user() {
        let db = test_db().await;

        let user = db
            .insert_user(NewUser {
                username: "alice".to_string(),
                password_hash: "$argon2id$fake".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.username, "alice");

        let found = db.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password_hash, "$argon2id$fake");
    }

    #[tokio::test]
    async fn test_lookup_missing_user() {
        let db = test_db().await;
        assert!(db.get_user_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_usernames_allowed() {
        let db = test_db().await;

        let first = db
            .insert_user(NewUser {
                username: "bob".to_string(),
                password_hash: "hash-1".to_string(),
            })
            .await
            .unwrap();
        db.insert_user(NewUser {
            username: "bob".to_string(),
            password_hash: "hash-2".to_string(),
        })
        .await
        .unwrap();

        // Lookup resolves the earliest row
        let found = db.get_user_by_username("bob").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.password_hash, "hash-1");
    }
}
