//! Book operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Book, BookPatch, NewBook};
use crate::repository::Database;

impl Database {
    /// Insert a new book
    pub async fn insert_book(&self, book: NewBook) -> Result<Book, DbError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Book {
            id,
            title: book.title,
            author: book.author,
            created_at: now,
            updated_at: now,
        })
    }

    /// List all books in store order
    pub async fn list_books(&self) -> Result<Vec<Book>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, created_at, updated_at
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Book::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Apply a merge-patch to a book
    ///
    /// Only fields present in the patch overwrite stored values; absent
    /// fields are preserved. Returns whether any row matched — callers
    /// treat an unmatched id as a successful no-op.
    pub async fn update_book(&self, id: i64, patch: BookPatch) -> Result<bool, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = COALESCE(?, title),
                author = COALESCE(?, author),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.author)
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a book
    ///
    /// Returns whether any row matched; an unmatched id is not an error.
    pub async fn delete_book(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_db;

    #[tokio::test]
    async fn test_insert_and_list_books() {
        let db = test_db().await;

        let book = db
            .insert_book(NewBook {
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
            })
            .await
            .unwrap();

        let books = db.list_books().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, book.id);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].author, "Herbert");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let db = test_db().await;
        assert!(db.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_is_merge_patch() {
        let db = test_db().await;
        let book = db
            .insert_book(NewBook {
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
            })
            .await
            .unwrap();

        let matched = db
            .update_book(
                book.id,
                BookPatch {
                    title: Some("Dune Messiah".to_string()),
                    author: None,
                },
            )
            .await
            .unwrap();
        assert!(matched);

        let books = db.list_books().await.unwrap();
        assert_eq!(books[0].title, "Dune Messiah");
        // Author untouched by the patch
        assert_eq!(books[0].author, "Herbert");
    }

    #[tokio::test]
    async fn test_update_unmatched_id_is_noop() {
        let db = test_db().await;
        let matched = db
            .update_book(
                9999,
                BookPatch {
                    title: Some("Ghost".to_string()),
                    author: None,
                },
            )
            .await
            .unwrap();
        assert!(!matched);
    }

    #[tokio::test]
    async fn test_delete_book() {
        let db = test_db().await;
        let book = db
            .insert_book(NewBook {
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
            })
            .await
            .unwrap();

        assert!(db.delete_book(book.id).await.unwrap());
        assert!(db.list_books().await.unwrap().is_empty());

        // Second delete matches nothing
        assert!(!db.delete_book(book.id).await.unwrap());
    }
}
