//! Store collaborator for saved posts (per-user bookmarks on news items).

use sqlx::{PgPool, Pool, Postgres};
use tracing::{debug, info};

use crate::news_manager::item_from_row;
use crate::types::{FeedItem, PortalError, Result};

pub struct SavedPostManager {
    db: Pool<Postgres>,
}

impl SavedPostManager {
    pub async fn new(database_url: &str) -> Result<Self> {
        let db = PgPool::connect(database_url).await?;
        Ok(Self { db })
    }

    pub fn with_pool(db: Pool<Postgres>) -> Self {
        Self { db }
    }

    /// The caller's saved items joined with author identity, most recently
    /// saved first.
    pub async fn my_saved(&self, user_id: i64) -> Result<Vec<FeedItem>> {
        let rows = sqlx::query(
            r#"
            SELECT n.*, u.name AS author_name, u.email AS author_email,
                   sp.created_at AS saved_at
            FROM saved_posts sp
            JOIN news_items n ON sp.news_item_id = n.id
            JOIN users u ON n.user_id = u.id
            WHERE sp.user_id = $1
            ORDER BY sp.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        debug!("Fetched {} saved posts for user {}", rows.len(), user_id);
        Ok(rows.iter().map(item_from_row).collect())
    }

    /// Saving twice is idempotent; saving a nonexistent item is not-found.
    pub async fn save(&self, user_id: i64, news_item_id: i64) -> Result<()> {
        let mut tx = self.db.begin().await?;

        // Share-lock the item so a concurrent delete cannot slip in between
        // the existence check and the link insert.
        let exists = sqlx::query("SELECT id FROM news_items WHERE id = $1 FOR SHARE")
            .bind(news_item_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(PortalError::ItemNotFound { id: news_item_id });
        }

        sqlx::query(
            r#"
            INSERT INTO saved_posts (user_id, news_item_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, news_item_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(news_item_id)
        .execute(&mut *tx)
        .await
        .map_err(|err| missing_item_on_fk(err, news_item_id))?;

        tx.commit().await?;

        info!("User {} saved news item {}", user_id, news_item_id);
        Ok(())
    }

    pub async fn unsave(&self, user_id: i64, news_item_id: i64) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM saved_posts WHERE user_id = $1 AND news_item_id = $2",
        )
        .bind(user_id)
        .bind(news_item_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PortalError::ItemNotFound { id: news_item_id });
        }
        info!("User {} unsaved news item {}", user_id, news_item_id);
        Ok(())
    }
}

/// A foreign-key violation on the link insert means the item vanished
/// mid-save; report it the same way as any other missing item.
fn missing_item_on_fk(err: sqlx::Error, id: i64) -> PortalError {
    match err {
        sqlx::Error::Database(db)
            if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
        {
            PortalError::ItemNotFound { id }
        }
        other => PortalError::Database(other),
    }
}
